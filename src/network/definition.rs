use crate::network::{DirectedEdge, EdgeId, NodeId, NodeInfo, PartitionId};
use geo::{LineString, Point, Rect};

/// Read access to a road network split into spatial partitions.
///
/// Identifiers are dense within their partition, such that the edges
/// of a partition are addressed by the indices `0..partition_edge_count`,
/// and the outgoing edges of a node are contiguous from its `edge_index`.
///
/// ### Note
/// Implementors are free to page partitions in and out of memory,
/// reporting memory pressure through [`RoadNetwork::over_committed`] and
/// releasing it through [`RoadNetwork::clear_cache`].
pub trait RoadNetwork {
    /// The partition containing `point`, if it holds any data.
    fn partition_at(&self, point: &Point) -> Option<PartitionId>;

    /// The bounding box of the partition, if it exists.
    fn partition_bounds(&self, partition: PartitionId) -> Option<Rect>;

    /// The width (and height) of a partition, in degrees.
    fn partition_size(&self) -> f64;

    fn partition_edge_count(&self, partition: PartitionId) -> u32;

    fn edge(&self, id: EdgeId) -> Option<&DirectedEdge>;

    fn node(&self, id: NodeId) -> Option<&NodeInfo>;

    /// The polyline of the physical edge `id` belongs to,
    /// in the orientation of its forward direction.
    fn shape(&self, id: EdgeId) -> Option<&LineString>;

    fn partition_edges(&self, partition: PartitionId) -> impl Iterator<Item = EdgeId> {
        (0..self.partition_edge_count(partition)).map(move |index| EdgeId(partition.id(index)))
    }

    /// Returns the opposing direction of an edge, alongside its identifier.
    fn opposite(&self, id: EdgeId) -> Option<(EdgeId, &DirectedEdge)> {
        let edge = self.edge(id)?;
        self.edge(edge.opposite).map(|opposite| (edge.opposite, opposite))
    }

    fn start_node(&self, id: EdgeId) -> Option<NodeId> {
        self.opposite(id)
            .map(|(_, opposite)| opposite.end_node)
            .filter(NodeId::is_valid)
    }

    fn end_node(&self, id: EdgeId) -> Option<NodeId> {
        self.edge(id).map(|edge| edge.end_node).filter(NodeId::is_valid)
    }

    /// Iterates the outgoing edges of a node.
    fn outgoing(&self, id: NodeId) -> impl Iterator<Item = (EdgeId, &DirectedEdge)> {
        let partition = id.partition();
        let range = self
            .node(id)
            .map(|node| node.edge_index..node.edge_index + node.edge_count)
            .unwrap_or(0..0);

        range.filter_map(move |index| {
            let edge_id = EdgeId(partition.id(index));
            self.edge(edge_id).map(|edge| (edge_id, edge))
        })
    }

    /// Whether the provider holds more data in memory than it would like.
    fn over_committed(&self) -> bool {
        false
    }

    /// Releases any cached partitions.
    fn clear_cache(&self) {}
}
