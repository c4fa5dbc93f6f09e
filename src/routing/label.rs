use crate::costing::{EdgeLabel, TravelMode};
use crate::network::{EdgeId, GraphElement, NodeId};

/// Index of a label within its [`crate::routing::LabelSet`].
pub type LabelIdx = u32;

/// Reserved destination index, never a valid [`LabelKey::Destination`].
pub const INVALID_DESTINATION: u16 = u16::MAX;

/// What a label arrives at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelKey {
    Node(NodeId),
    /// The index of a destination, part way along an edge.
    Destination(u16),
}

/// One step of a path search.
///
/// The step traverses `edge` from the fraction `source` to `target`
/// and arrives at `key`. Following the predecessors back to the origin
/// yields the path in reverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    pub key: LabelKey,
    /// The traversed edge, unset for the labels seeding a search.
    pub edge: Option<EdgeId>,
    pub source: f64,
    pub target: f64,
    /// Length (metres) of the path up to and including this step.
    pub cost: f64,
    pub turn_cost: f64,
    /// The cost plus an estimate of the remaining distance.
    pub sort_cost: f64,
    pub predecessor: Option<LabelIdx>,
    pub travel_mode: TravelMode,
    /// The edge by which this label was reached, if known.
    pub edge_label: Option<EdgeLabel>,
}

impl Label {
    /// A zero-cost label from which a search begins.
    pub fn seed(key: LabelKey, travel_mode: TravelMode, edge_label: Option<EdgeLabel>) -> Self {
        Self {
            key,
            edge: None,
            source: 0.0,
            target: 0.0,
            cost: 0.0,
            turn_cost: 0.0,
            sort_cost: 0.0,
            predecessor: None,
            travel_mode,
            edge_label,
        }
    }

    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        match self.key {
            LabelKey::Node(node) => Some(node),
            LabelKey::Destination(_) => None,
        }
    }

    #[inline]
    pub fn destination(&self) -> Option<u16> {
        match self.key {
            LabelKey::Node(_) => None,
            LabelKey::Destination(dest) => Some(dest),
        }
    }

    /// The network element this label identifies: its node, or
    /// otherwise the edge it traversed.
    pub fn element(&self) -> Option<GraphElement> {
        self.node()
            .filter(NodeId::is_valid)
            .map(GraphElement::Node)
            .or_else(|| self.edge.filter(EdgeId::is_valid).map(GraphElement::Edge))
    }
}
