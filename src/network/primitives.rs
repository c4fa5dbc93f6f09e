use crate::network::{EdgeId, NodeId};
use bitflags::bitflags;
use geo::Point;

/// Number of outgoing edges per node for which a heading is stored.
pub const MAX_LOCAL_HEADINGS: usize = 8;

bitflags! {
    /// The modes of transport permitted upon an element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        const AUTO = 1 << 0;
        const BICYCLE = 1 << 1;
        const PEDESTRIAN = 1 << 2;

        const ALL = Self::AUTO.bits() | Self::BICYCLE.bits() | Self::PEDESTRIAN.bits();
    }
}

/// One traversal direction of a physical road segment.
///
/// Both directions share a single polyline, stored in the orientation
/// of the edge whose `forward` flag is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectedEdge {
    /// Length of the edge, in metres.
    pub length: f64,
    /// Whether the edge travels in the same order as its shape.
    pub forward: bool,
    /// The edge travelling in the opposite direction.
    pub opposite: EdgeId,
    /// The node this edge arrives at.
    pub end_node: NodeId,
    /// Index of the edge's shape within its partition.
    pub shape: u32,
    /// Position of this edge among the outgoing edges of its start node.
    pub local_idx: u8,
    /// Position of the opposite edge among the outgoing edges of this edge's end node.
    pub opp_local_idx: u8,
    /// Modes permitted to travel this direction.
    pub access: Access,
}

/// An intersection within the network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeInfo {
    pub position: Point,
    /// Index of the first outgoing edge, within the node's partition.
    pub edge_index: u32,
    pub edge_count: u32,
    /// Headings (degrees from north, within `[0, 359]`) of the first
    /// [`MAX_LOCAL_HEADINGS`] outgoing edges.
    pub headings: [u16; MAX_LOCAL_HEADINGS],
    pub access: Access,
}

impl NodeInfo {
    /// The heading of the outgoing edge at `local_idx`, if one is stored.
    #[inline]
    pub fn heading(&self, local_idx: u8) -> Option<u16> {
        self.headings.get(local_idx as usize).copied()
    }
}
