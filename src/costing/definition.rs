use crate::costing::TravelMode;
use crate::network::{DirectedEdge, EdgeId, NodeInfo};
use std::fmt::Debug;

/// The edge by which a path arrived at its current position.
///
/// Carried on every label of a path search, this is the context
/// against which the next hop's permissions and turn cost are judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeLabel {
    pub edge: EdgeId,
    /// The traversed edge's position at its start node.
    pub local_idx: u8,
    /// The opposite edge's position at the traversed edge's end node.
    pub opp_local_idx: u8,
    /// Whether the traversed edge ends in a node with no other way out.
    pub dead_end: bool,
}

impl EdgeLabel {
    pub fn new(id: EdgeId, edge: &DirectedEdge, end_node: Option<&NodeInfo>) -> Self {
        Self {
            edge: id,
            local_idx: edge.local_idx,
            opp_local_idx: edge.opp_local_idx,
            dead_end: end_node.is_some_and(|node| node.edge_count <= 1),
        }
    }

    /// Whether taking `edge` after this one reverses back along it.
    #[inline]
    pub fn is_reversed_by(&self, id: EdgeId, edge: &DirectedEdge) -> bool {
        self.edge != id && self.opp_local_idx == edge.local_idx
    }
}

/// Decides which parts of the network a mode of transport may use.
pub trait CostModel: Debug {
    fn travel_mode(&self) -> TravelMode;

    /// Whether `edge` may be taken, having arrived through `pred`.
    fn allowed(&self, edge: &DirectedEdge, pred: &EdgeLabel, id: EdgeId) -> bool;

    /// Whether a path may pass through `node`.
    fn node_allowed(&self, node: &NodeInfo) -> bool;

    /// Returns `true` for edges which must be excluded outright,
    /// such as when searching for candidates.
    fn filter(&self, edge: &DirectedEdge) -> bool;
}
