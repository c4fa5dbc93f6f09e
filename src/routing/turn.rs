/// Number of distinct turn degrees, `0..=180`.
pub const TURN_DEGREES: usize = 181;

/// Penalty of each turn degree, decaying exponentially from a U-turn
/// (zero degrees) to continuing straight (180 degrees).
#[derive(Clone, Debug, PartialEq)]
pub struct TurnCostTable {
    costs: [f64; TURN_DEGREES],
}

impl TurnCostTable {
    /// A table of `factor * e^(-degree / 45)`, or all zeros when the factor
    /// is not positive.
    pub fn new(factor: f64) -> Self {
        let mut costs = [0.0; TURN_DEGREES];

        if factor > 0.0 {
            for (degree, cost) in costs.iter_mut().enumerate() {
                *cost = factor * (-(degree as f64) / 45.0).exp();
            }
        }

        Self { costs }
    }

    #[inline]
    pub fn cost(&self, degree: u16) -> f64 {
        self.costs[(degree as usize).min(TURN_DEGREES - 1)]
    }

    #[inline]
    pub fn u_turn(&self) -> f64 {
        self.costs[0]
    }
}

impl Default for TurnCostTable {
    fn default() -> Self {
        Self::new(0.0)
    }
}
