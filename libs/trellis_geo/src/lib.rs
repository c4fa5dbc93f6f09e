//! Geometric primitives used by the matcher.
//!
//! All positions are `geo::Point` values in longitude/latitude order
//! and all distances are expressed in metres.

/// Metres spanned by one degree of latitude.
pub const METERS_PER_DEGREE_LAT: f64 = 110_567.0;

pub const MEAN_EARTH_RADIUS: f64 = 6371008.8;

pub mod approximate;
pub mod bound;
pub mod clip;
pub mod heading;
pub mod project;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use approximate::DistanceApproximator;
#[doc(inline)]
pub use bound::expand_meters;
#[doc(inline)]
pub use clip::{clip_linestring, line_length};
#[doc(inline)]
pub use heading::{clamp_heading, heading, turn_degree180};
#[doc(inline)]
pub use project::{Projection, project};
