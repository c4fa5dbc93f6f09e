use crate::matching::StateId;
use crate::network::GraphElement;
use geo::Point;
use strum::{Display, EnumString};

/// The kind of network element a measurement was matched onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum GraphType {
    Node,
    Edge,
    Unknown,
}

/// The matched position of a single measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// The matched position, or the measured one if unmatched.
    pub point: Point,
    /// Distance (metres) between the measurement and `point`.
    pub distance: f64,
    pub element: Option<GraphElement>,
    /// The state the measurement was decoded to, if it was not interpolated.
    pub state: Option<StateId>,
}

impl MatchResult {
    /// An unmatched result, positioned at the measurement itself.
    pub fn raw(point: Point) -> Self {
        Self {
            point,
            distance: 0.0,
            element: None,
            state: None,
        }
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        self.element.is_some()
    }

    pub fn graph_type(&self) -> GraphType {
        match self.element {
            Some(GraphElement::Node(_)) => GraphType::Node,
            Some(GraphElement::Edge(_)) => GraphType::Edge,
            None => GraphType::Unknown,
        }
    }
}
