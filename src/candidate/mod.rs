//! Correlation of measurements with the road network.
//!
//! Both [`CandidateScan`] and [`CandidateGridQuery`] produce the same
//! candidates, differing only in how edges near the measurement are found.

pub mod entry;
pub mod grid;
pub mod grid_query;
pub mod query;


#[doc(inline)]
pub use entry::{Candidate, PathEdge};
#[doc(inline)]
pub use grid::{GridRangeQuery, MAX_GRID_CELLS};
#[doc(inline)]
pub use grid_query::{CandidateGridQuery, GridCache, GridMetadata};
#[doc(inline)]
pub use query::{CandidateQuery, CandidateScan, EdgeFilter, within_squared_distance};
