use crate::network::{EdgeId, NodeId};
use geo::Point;
use smallvec::SmallVec;

/// A directed edge a [`Candidate`] lies upon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathEdge {
    pub id: EdgeId,
    /// Fraction of the edge, in its direction of travel, at which the candidate lies.
    pub dist: f64,
}

impl PathEdge {
    pub fn new(id: EdgeId, dist: f64) -> Self {
        Self { id, dist }
    }

    /// Whether the candidate lies at either end of the edge.
    #[inline]
    pub fn is_node(&self) -> bool {
        self.dist == 0.0 || self.dist == 1.0
    }
}

/// A position upon the road network which a measurement may
/// have been recorded at.
///
/// A candidate correlates a single physical edge, through one or both of
/// its directions, or the node at which the measurement snapped onto it.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    /// The queried position.
    pub location: Point,
    /// The snapped position upon the network.
    pub vertex: Point,
    /// Squared distance (metres²) between the location and vertex.
    pub sq_distance: f64,
    pub edges: SmallVec<[PathEdge; 2]>,
    /// The node the candidate snapped onto, if it lies at an end of its edges.
    pub node: Option<NodeId>,
}

impl Candidate {
    /// An uncorrelated candidate at `location`.
    pub fn new(location: Point) -> Self {
        Self {
            location,
            vertex: location,
            sq_distance: 0.0,
            edges: SmallVec::new(),
            node: None,
        }
    }

    #[inline]
    pub fn is_correlated(&self) -> bool {
        !self.edges.is_empty() || self.node.is_some()
    }

    /// Whether every edge of the candidate places it at a node.
    #[inline]
    pub fn is_node(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(PathEdge::is_node)
    }

    /// The distance (metres) between the location and vertex.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.sq_distance.sqrt()
    }

    pub(crate) fn correlate(&mut self, edge: PathEdge, vertex: Point) {
        self.edges.push(edge);
        self.vertex = vertex;
    }
}
