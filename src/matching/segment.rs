use crate::network::{EdgeId, RoadNetwork};
use geo::LineString;
use thiserror::Error;
use trellis_geo::clip_linestring;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SegmentError {
    #[error("expected 0 <= source <= target <= 1, got source = {from} and target = {to}")]
    OutOfRange { from: f64, to: f64 },
}

/// The portion of an edge between two fractions of its length,
/// measured in its direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    edge: EdgeId,
    source: f64,
    target: f64,
}

impl EdgeSegment {
    pub fn new(edge: EdgeId, source: f64, target: f64) -> Result<Self, SegmentError> {
        if !(0.0 <= source && source <= target && target <= 1.0) {
            return Err(SegmentError::OutOfRange {
                from: source,
                to: target,
            });
        }

        Ok(Self {
            edge,
            source,
            target,
        })
    }

    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    #[inline]
    pub fn source(&self) -> f64 {
        self.source
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The polyline of the segment, in its direction of travel.
    ///
    /// Empty if the edge does not exist.
    pub fn shape<N: RoadNetwork>(&self, network: &N) -> LineString {
        let (Some(edge), Some(shape)) = (network.edge(self.edge), network.shape(self.edge)) else {
            return LineString::new(vec![]);
        };

        if edge.forward {
            clip_linestring(shape, self.source, self.target)
        } else {
            let reversed = LineString::new(shape.0.iter().rev().copied().collect());
            clip_linestring(&reversed, self.source, self.target)
        }
    }

    /// Whether `other` continues directly from the end of this segment.
    ///
    /// ```text
    ///   this         other
    /// o======o    o=========o     Adjoined along the same edge
    ///        |    |               or across the node joining two.
    ///       0.4  0.4
    /// ```
    pub fn adjoined<N: RoadNetwork>(&self, network: &N, other: &EdgeSegment) -> bool {
        if self.edge != other.edge {
            if self.target == 1.0 && other.source == 0.0 {
                let end = network.end_node(self.edge);
                end.is_some() && end == network.start_node(other.edge)
            } else {
                false
            }
        } else {
            self.target == other.source
        }
    }

    /// Extends this segment by `other`, if both lie on the same edge
    /// and `other` begins where this segment ends.
    pub(crate) fn merge(&mut self, other: &EdgeSegment) -> bool {
        if self.edge == other.edge && self.target == other.source {
            self.target = other.target;
            true
        } else {
            false
        }
    }
}
