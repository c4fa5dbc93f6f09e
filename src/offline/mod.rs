//! Matching of complete traces, and reconstruction of the route driven.

pub mod interpolate;
pub mod pipeline;
pub mod result;
pub mod route;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use interpolate::{GraphSet, collect_graphset, guess_source, guess_target, interpolate};
#[doc(inline)]
pub use pipeline::offline_match;
#[doc(inline)]
pub use result::{GraphType, MatchResult};
#[doc(inline)]
pub use route::construct_route;
