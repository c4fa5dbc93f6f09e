//! A reference [`RoadNetwork`] held entirely in memory.

use crate::network::{
    Access, DirectedEdge, EdgeId, MAX_LOCAL_HEADINGS, NodeId, NodeInfo, PartitionId, RoadNetwork,
};
use geo::{Distance, Haversine, LineString, Point, Rect, coord};
use log::{debug, warn};
use rustc_hash::FxHashMap;
use trellis_geo::{clamp_heading, heading, line_length};
use wkt::TryFromWkt;

/// Default partition width, in degrees.
pub const DEFAULT_PARTITION_SIZE: f64 = 0.25;

/// The level at which every partition of an [`InMemoryNetwork`] lives.
const LOCAL_LEVEL: u8 = 0;

/// Uniform tiling of the globe into square partitions.
#[derive(Clone, Copy, Debug)]
struct Tiling {
    size: f64,
    columns: u32,
    rows: u32,
}

impl Tiling {
    fn new(size: f64) -> Self {
        Self {
            size,
            columns: (360.0 / size).ceil() as u32,
            rows: (180.0 / size).ceil() as u32,
        }
    }

    fn partition(&self, point: &Point) -> PartitionId {
        let column = ((point.x() + 180.0) / self.size).floor();
        let row = ((point.y() + 90.0) / self.size).floor();

        let column = (column.max(0.0) as u32).min(self.columns - 1);
        let row = (row.max(0.0) as u32).min(self.rows - 1);

        PartitionId::new(LOCAL_LEVEL, row * self.columns + column)
    }

    fn bounds(&self, partition: PartitionId) -> Rect {
        let column = (partition.tile % self.columns) as f64;
        let row = (partition.tile / self.columns) as f64;

        let min = coord! { x: -180.0 + column * self.size, y: -90.0 + row * self.size };
        let max = coord! { x: min.x + self.size, y: min.y + self.size };
        Rect::new(min, max)
    }
}

#[derive(Debug)]
struct Partition {
    bounds: Rect,
    nodes: Vec<NodeInfo>,
    edges: Vec<DirectedEdge>,
    shapes: Vec<LineString>,
}

/// A fully materialised, partitioned road network.
///
/// Created using a [`NetworkBuilder`].
#[derive(Debug)]
pub struct InMemoryNetwork {
    tiling: Tiling,
    partitions: FxHashMap<PartitionId, Partition>,
}

impl InMemoryNetwork {
    pub fn node_count(&self) -> usize {
        self.partitions.values().map(|p| p.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.partitions.values().map(|p| p.edges.len()).sum()
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Iterates every node of the network, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeInfo)> {
        self.partitions.iter().flat_map(|(partition, data)| {
            data.nodes
                .iter()
                .enumerate()
                .map(|(index, node)| (NodeId(partition.id(index as u32)), node))
        })
    }

    /// The node positioned exactly at `point`, if any.
    pub fn node_at(&self, point: &Point) -> Option<NodeId> {
        let partition = self.tiling.partition(point);
        self.partitions.get(&partition).and_then(|data| {
            data.nodes
                .iter()
                .position(|node| node.position == *point)
                .map(|index| NodeId(partition.id(index as u32)))
        })
    }

    /// The edge leaving `from` and arriving at `to`, if any.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.outgoing(from)
            .find(|(_, edge)| edge.end_node == to)
            .map(|(id, _)| id)
    }
}

impl RoadNetwork for InMemoryNetwork {
    fn partition_at(&self, point: &Point) -> Option<PartitionId> {
        let partition = self.tiling.partition(point);
        self.partitions.contains_key(&partition).then_some(partition)
    }

    fn partition_bounds(&self, partition: PartitionId) -> Option<Rect> {
        self.partitions.get(&partition).map(|data| data.bounds)
    }

    fn partition_size(&self) -> f64 {
        self.tiling.size
    }

    fn partition_edge_count(&self, partition: PartitionId) -> u32 {
        self.partitions
            .get(&partition)
            .map_or(0, |data| data.edges.len() as u32)
    }

    fn edge(&self, id: EdgeId) -> Option<&DirectedEdge> {
        self.partitions
            .get(&id.partition())?
            .edges
            .get(id.index() as usize)
    }

    fn node(&self, id: NodeId) -> Option<&NodeInfo> {
        self.partitions
            .get(&id.partition())?
            .nodes
            .get(id.index() as usize)
    }

    fn shape(&self, id: EdgeId) -> Option<&LineString> {
        let data = self.partitions.get(&id.partition())?;
        let edge = data.edges.get(id.index() as usize)?;
        data.shapes.get(edge.shape as usize)
    }
}

#[derive(Debug)]
struct PendingNode {
    position: Point,
    access: Access,
}

#[derive(Debug)]
struct PendingWay {
    from: usize,
    to: usize,
    shape: LineString,
    access: [Access; 2],
}

/// Index into `[forward, backward]` pairs.
#[inline]
const fn direction(forward: bool) -> usize {
    if forward { 0 } else { 1 }
}

/// Assembles an [`InMemoryNetwork`] from polylines.
///
/// Every way becomes a physical edge with two directed edges, joined at
/// nodes which are shared between ways whose endpoints coincide exactly.
///
/// ### Example
/// ```rust
/// use trellis::network::{NetworkBuilder, RoadNetwork};
/// use geo::wkt;
///
/// let mut builder = NetworkBuilder::default();
/// builder.add_two_way(wkt! { LINESTRING(0.0 0.0, 0.001 0.0) });
/// builder.add_two_way(wkt! { LINESTRING(0.001 0.0, 0.001 0.001) });
///
/// let network = builder.build();
/// assert_eq!(network.node_count(), 3);
/// assert_eq!(network.edge_count(), 4);
/// ```
#[derive(Debug)]
pub struct NetworkBuilder {
    partition_size: f64,
    nodes: Vec<PendingNode>,
    ways: Vec<PendingWay>,
    lookup: FxHashMap<(u64, u64), usize>,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PARTITION_SIZE)
    }
}

impl NetworkBuilder {
    pub fn new(partition_size: f64) -> Self {
        Self {
            partition_size,
            nodes: vec![],
            ways: vec![],
            lookup: FxHashMap::default(),
        }
    }

    /// Adds a node at `position`, or returns the existing node at that position.
    pub fn add_node(&mut self, position: Point) -> usize {
        let key = (position.x().to_bits(), position.y().to_bits());
        *self.lookup.entry(key).or_insert_with(|| {
            self.nodes.push(PendingNode {
                position,
                access: Access::ALL,
            });
            self.nodes.len() - 1
        })
    }

    /// Restricts the modes which may pass through a node.
    pub fn restrict_node(&mut self, node: usize, access: Access) {
        if let Some(pending) = self.nodes.get_mut(node) {
            pending.access = access;
        }
    }

    /// Adds a way following `shape`, permitting `forward` modes along the
    /// shape's order and `backward` modes against it.
    ///
    /// Returns `None` if the shape has fewer than two points.
    pub fn add_way(&mut self, shape: LineString, forward: Access, backward: Access) -> Option<usize> {
        if shape.0.len() < 2 {
            return None;
        }

        let from = self.add_node(Point(*shape.0.first()?));
        let to = self.add_node(Point(*shape.0.last()?));

        self.ways.push(PendingWay {
            from,
            to,
            shape,
            access: [forward, backward],
        });

        Some(self.ways.len() - 1)
    }

    pub fn add_two_way(&mut self, shape: LineString) -> Option<usize> {
        self.add_way(shape, Access::ALL, Access::ALL)
    }

    pub fn add_one_way(&mut self, shape: LineString) -> Option<usize> {
        self.add_way(shape, Access::ALL, Access::empty())
    }

    /// Adds a two-way road from a well-known-text `LINESTRING`.
    pub fn add_wkt(&mut self, wkt: &str) -> Option<usize> {
        match LineString::try_from_wkt_str(wkt) {
            Ok(shape) => self.add_two_way(shape),
            Err(err) => {
                warn!("Skipping way which could not be parsed: {err:?}");
                None
            }
        }
    }

    /// Adds every way of a collection of well-known-text `LINESTRING`s.
    pub fn with_wkt(mut self, ways: &[&str]) -> Self {
        for way in ways {
            self.add_wkt(way);
        }

        self
    }

    pub fn build(self) -> InMemoryNetwork {
        let tiling = Tiling::new(self.partition_size);

        // Outgoing (way, forward) pairs of every node
        let mut outgoing: Vec<Vec<(usize, bool)>> = vec![vec![]; self.nodes.len()];
        for (index, way) in self.ways.iter().enumerate() {
            outgoing[way.from].push((index, true));
            outgoing[way.to].push((index, false));
        }

        // Nodes of each partition, in insertion order
        let mut members: FxHashMap<PartitionId, Vec<usize>> = FxHashMap::default();
        let mut node_ids = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            let partition = tiling.partition(&node.position);
            let local = members.entry(partition).or_default();
            node_ids.push(NodeId(partition.id(local.len() as u32)));
            local.push(index);
        }

        // Edges of a partition are contiguous per node, in node order
        let mut edge_ids = vec![[EdgeId::INVALID; 2]; self.ways.len()];
        let mut local_idx = vec![[u8::MAX; 2]; self.ways.len()];
        let mut layout: FxHashMap<PartitionId, Vec<(usize, bool)>> = FxHashMap::default();

        for (partition, nodes) in &members {
            let order = layout.entry(*partition).or_default();
            for &node in nodes {
                for (position, &(way, forward)) in outgoing[node].iter().enumerate() {
                    edge_ids[way][direction(forward)] = EdgeId(partition.id(order.len() as u32));
                    local_idx[way][direction(forward)] = u8::try_from(position).unwrap_or(u8::MAX);
                    order.push((way, forward));
                }
            }
        }

        let lengths = self
            .ways
            .iter()
            .map(|way| line_length(&way.shape))
            .collect::<Vec<_>>();

        let mut partitions = FxHashMap::default();
        for (partition, nodes) in members {
            let order = layout.remove(&partition).unwrap_or_default();

            let mut shapes: Vec<LineString> = vec![];
            let mut shape_index: FxHashMap<usize, u32> = FxHashMap::default();

            let edges = order
                .iter()
                .map(|&(way, forward)| {
                    let pending = &self.ways[way];
                    let shape = *shape_index.entry(way).or_insert_with(|| {
                        shapes.push(pending.shape.clone());
                        (shapes.len() - 1) as u32
                    });

                    DirectedEdge {
                        length: lengths[way],
                        forward,
                        opposite: edge_ids[way][direction(!forward)],
                        end_node: node_ids[if forward { pending.to } else { pending.from }],
                        shape,
                        local_idx: local_idx[way][direction(forward)],
                        opp_local_idx: local_idx[way][direction(!forward)],
                        access: pending.access[direction(forward)],
                    }
                })
                .collect::<Vec<_>>();

            let mut edge_index = 0u32;
            let infos = nodes
                .iter()
                .map(|&node| {
                    let mut headings = [0u16; MAX_LOCAL_HEADINGS];
                    for (slot, &(way, forward)) in headings.iter_mut().zip(&outgoing[node]) {
                        *slot = departure_heading(&self.ways[way].shape, forward);
                    }

                    let info = NodeInfo {
                        position: self.nodes[node].position,
                        edge_index,
                        edge_count: outgoing[node].len() as u32,
                        headings,
                        access: self.nodes[node].access,
                    };

                    edge_index += info.edge_count;
                    info
                })
                .collect::<Vec<_>>();

            partitions.insert(
                partition,
                Partition {
                    bounds: tiling.bounds(partition),
                    nodes: infos,
                    edges,
                    shapes,
                },
            );
        }

        debug!(
            "Built network of {} nodes and {} ways across {} partitions",
            self.nodes.len(),
            self.ways.len(),
            partitions.len()
        );

        InMemoryNetwork { tiling, partitions }
    }
}

/// Heading of a way as it departs its start (`forward`) or end node.
fn departure_heading(shape: &LineString, forward: bool) -> u16 {
    let points = &shape.0;
    if points.len() < 2 {
        return 0;
    }

    let (from, to) = if forward {
        (points[0], points[1])
    } else {
        (points[points.len() - 1], points[points.len() - 2])
    };

    // Degenerate segments carry no direction
    if Haversine.distance(Point(from), Point(to)) <= 0.0 {
        return 0;
    }

    clamp_heading(heading(&Point(from), &Point(to)))
}
