use crate::matching::{StateId, Time};
use log::debug;

/// The costs a [`ViterbiSearch`] minimises over.
///
/// Costs are negative log-likelihoods, such that lower is more likely.
pub trait ViterbiModel {
    type Error;

    fn emission_cost(&self, state: StateId) -> f64;

    /// The cost of moving from `left` to `right`, having arrived at `left`
    /// from `predecessor`. Returns `None` if `right` is unreachable from `left`.
    fn transition_cost(
        &mut self,
        left: StateId,
        right: StateId,
        predecessor: Option<StateId>,
    ) -> Result<Option<f64>, Self::Error>;

    fn cost_so_far(&self, prev_cost_so_far: f64, transition_cost: f64, emission_cost: f64) -> f64 {
        prev_cost_so_far + transition_cost + emission_cost
    }
}

/// A forward dynamic-programming decoder over columns of states.
///
/// Columns are evaluated lazily, up to the time requested.
/// A column which none of its states can be reached in begins
/// anew from its emission costs, breaking the path.
#[derive(Debug, Default)]
pub struct ViterbiSearch {
    columns: Vec<Vec<StateId>>,
    winners: Vec<Option<StateId>>,
    cost_so_far: Vec<Option<f64>>,
    predecessors: Vec<Option<StateId>>,
}

impl ViterbiSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column of states, returning its time.
    pub fn add_column(&mut self, states: Vec<StateId>) -> Time {
        let size = states.iter().max().map_or(0, |max| max + 1);
        if self.cost_so_far.len() < size {
            self.cost_so_far.resize(size, None);
            self.predecessors.resize(size, None);
        }

        self.columns.push(states);
        self.columns.len() - 1
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, time: Time) -> &[StateId] {
        self.columns.get(time).map_or(&[], Vec::as_slice)
    }

    /// The state the best path to `state` arrived from, if any.
    pub fn predecessor(&self, state: StateId) -> Option<StateId> {
        self.predecessors.get(state).copied().flatten()
    }

    /// The cost of the best path to `state`, if it has been evaluated and reached.
    pub fn cost_so_far(&self, state: StateId) -> Option<f64> {
        self.cost_so_far.get(state).copied().flatten()
    }

    /// The state of least cost at `time`.
    pub fn search_winner<M: ViterbiModel>(
        &mut self,
        model: &mut M,
        time: Time,
    ) -> Result<Option<StateId>, M::Error> {
        while self.winners.len() <= time && self.winners.len() < self.columns.len() {
            self.evaluate(model)?;
        }

        Ok(self.winners.get(time).copied().flatten())
    }

    /// Iterates the most likely state of every column, from `time` back to the first.
    ///
    /// Yields `None` for columns without any states.
    pub fn search_path<M: ViterbiModel>(
        &mut self,
        model: &mut M,
        time: Time,
    ) -> Result<PathIter<'_>, M::Error> {
        let winner = self.search_winner(model, time)?;

        Ok(PathIter {
            search: self,
            time: (time < self.columns.len()).then_some(time),
            state: winner,
        })
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.winners.clear();
        self.cost_so_far.clear();
        self.predecessors.clear();
    }

    /// Evaluates the next column.
    fn evaluate<M: ViterbiModel>(&mut self, model: &mut M) -> Result<(), M::Error> {
        let time = self.winners.len();
        let Some(column) = self.columns.get(time).cloned() else {
            return Ok(());
        };

        let previous = match time.checked_sub(1) {
            Some(previous) => self.column(previous).to_vec(),
            None => vec![],
        };

        let mut reached = false;
        for &right in &column {
            let emission = model.emission_cost(right);
            let mut best: Option<(f64, StateId)> = None;

            for &left in &previous {
                let Some(prev_cost) = self.cost_so_far(left) else {
                    continue;
                };

                let Some(transition) = model.transition_cost(left, right, self.predecessor(left))?
                else {
                    continue;
                };

                let cost = model.cost_so_far(prev_cost, transition, emission);
                if best.is_none_or(|(best, _)| cost < best) {
                    best = Some((cost, left));
                }
            }

            if let Some((cost, left)) = best {
                self.cost_so_far[right] = Some(cost);
                self.predecessors[right] = Some(left);
                reached = true;
            }
        }

        if !reached {
            if time > 0 {
                debug!("Path breaks at time {time}, restarting from emission costs");
            }

            for &state in &column {
                self.cost_so_far[state] = Some(model.emission_cost(state));
                self.predecessors[state] = None;
            }
        }

        // The first of equally likely states wins
        let winner = column
            .iter()
            .filter_map(|&state| self.cost_so_far(state).map(|cost| (cost, state)))
            .fold(None, |winner: Option<(f64, StateId)>, (cost, state)| match winner {
                Some((best, _)) if best <= cost => winner,
                _ => Some((cost, state)),
            });

        self.winners.push(winner.map(|(_, state)| state));
        Ok(())
    }
}

/// Walks the decoded path backwards through time.
///
/// Created by [`ViterbiSearch::search_path`].
#[derive(Debug)]
pub struct PathIter<'a> {
    search: &'a ViterbiSearch,
    time: Option<Time>,
    state: Option<StateId>,
}

impl Iterator for PathIter<'_> {
    type Item = Option<StateId>;

    fn next(&mut self) -> Option<Self::Item> {
        let time = self.time?;
        let current = self.state;

        self.time = time.checked_sub(1);
        if let Some(previous) = self.time {
            self.state = current
                .and_then(|state| self.search.predecessor(state))
                .or_else(|| self.search.winners.get(previous).copied().flatten());
        }

        Some(current)
    }
}
