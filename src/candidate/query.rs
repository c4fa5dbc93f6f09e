use crate::candidate::{Candidate, PathEdge};
use crate::network::{DirectedEdge, EdgeId, NodeId, PartitionId, RoadNetwork};
use geo::{Point, Rect, coord};
use itertools::Itertools;
use log::trace;
use rustc_hash::FxHashSet;
use trellis_geo::{DistanceApproximator, Projection, expand_meters, project};

/// Excludes an edge from correlation when it returns `true`.
pub type EdgeFilter<'f> = &'f dyn Fn(&DirectedEdge) -> bool;

/// Finds the candidates of a measurement.
pub trait CandidateQuery {
    /// Returns the candidates within the squared radius (metres²) of `location`.
    fn query(
        &mut self,
        location: &Point,
        sq_search_radius: f64,
        filter: Option<EdgeFilter>,
    ) -> Vec<Candidate>;

    fn query_bulk(
        &mut self,
        locations: &[Point],
        sq_search_radius: f64,
        filter: Option<EdgeFilter>,
    ) -> Vec<Vec<Candidate>> {
        locations
            .iter()
            .map(|location| self.query(location, sq_search_radius, filter))
            .collect()
    }
}

/// The search box of a query, and the distinct partitions at its corners.
pub(crate) fn corner_partitions<N: RoadNetwork>(
    network: &N,
    location: &Point,
    sq_search_radius: f64,
) -> (Rect, Vec<PartitionId>) {
    let range = expand_meters(location, sq_search_radius.max(0.0).sqrt());
    let (min, max) = (range.min(), range.max());

    let partitions = [
        min,
        max,
        coord! { x: min.x, y: max.y },
        coord! { x: max.x, y: min.y },
    ]
    .into_iter()
    .filter_map(|corner| network.partition_at(&Point(corner)))
    .unique()
    .collect();

    (range, partitions)
}

/// Correlates `location` with the given edges.
///
/// Each physical edge is considered once, through whichever of its
/// directions comes first. Both directions which are not filtered
/// are correlated into the same [`Candidate`]. Candidates snapping onto
/// a node which an earlier candidate snapped onto are dropped.
pub fn within_squared_distance<N: RoadNetwork>(
    network: &N,
    location: &Point,
    sq_search_radius: f64,
    edges: impl IntoIterator<Item = EdgeId>,
    filter: Option<EdgeFilter>,
) -> Vec<Candidate> {
    let approximator = DistanceApproximator::new(*location);
    let excluded = |edge: &DirectedEdge| filter.is_some_and(|filter| filter(edge));

    let mut candidates = Vec::new();
    let mut visited_edges = FxHashSet::<EdgeId>::default();
    let mut visited_nodes = FxHashSet::<NodeId>::default();

    for id in edges {
        if !id.is_valid() || !visited_edges.insert(id) {
            continue;
        }

        let Some(edge) = network.edge(id) else {
            continue;
        };

        let Some((opposite_id, opposite)) = network.opposite(id) else {
            continue;
        };

        visited_edges.insert(opposite_id);

        let Some(shape) = network.shape(id).filter(|shape| !shape.0.is_empty()) else {
            continue;
        };

        let mut projection: Option<Projection> = None;
        let mut snapped_node = None;
        let mut correlated = Candidate::new(*location);

        for (id, edge, other) in [(id, edge, opposite), (opposite_id, opposite, edge)] {
            if excluded(edge) {
                continue;
            }

            let Some(projected) = projection.or_else(|| project(location, shape, &approximator))
            else {
                continue;
            };
            projection = Some(projected);

            if projected.sq_distance > sq_search_radius {
                continue;
            }

            let dist = if edge.forward {
                projected.offset
            } else {
                1.0 - projected.offset
            };

            if dist == 1.0 {
                snapped_node = Some(edge.end_node);
            } else if dist == 0.0 {
                snapped_node = Some(other.end_node);
            }

            correlated.correlate(PathEdge::new(id, dist), projected.point);
        }

        if !correlated.is_correlated() {
            continue;
        }

        let snapped_node = snapped_node.filter(NodeId::is_valid);
        if snapped_node.is_some_and(|node| !visited_nodes.insert(node)) {
            continue;
        }

        correlated.node = snapped_node;
        if let Some(projected) = projection {
            correlated.sq_distance = projected.sq_distance;
        }

        candidates.push(correlated);
    }

    trace!("Correlated {} candidates", candidates.len());
    candidates
}

/// Scans every edge of the partitions around a measurement.
///
/// Suited to sparse queries, or as a reference for [`crate::candidate::CandidateGridQuery`].
#[derive(Debug)]
pub struct CandidateScan<'a, N: RoadNetwork> {
    network: &'a N,
}

impl<'a, N: RoadNetwork> CandidateScan<'a, N> {
    pub fn new(network: &'a N) -> Self {
        Self { network }
    }
}

impl<N: RoadNetwork> CandidateQuery for CandidateScan<'_, N> {
    fn query(
        &mut self,
        location: &Point,
        sq_search_radius: f64,
        filter: Option<EdgeFilter>,
    ) -> Vec<Candidate> {
        let (_, partitions) = corner_partitions(self.network, location, sq_search_radius);

        let edges = partitions
            .into_iter()
            .flat_map(|partition| self.network.partition_edges(partition));

        within_squared_distance(self.network, location, sq_search_radius, edges, filter)
    }
}
