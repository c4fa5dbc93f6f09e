#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod candidate;
pub mod config;
pub mod costing;
#[doc(hidden)]
pub mod error;
pub mod matcher;
pub mod matching;
pub mod network;
pub mod offline;
#[doc(hidden)]
pub mod primitives;
pub mod routing;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use matcher::{MapMatcher, MapMatcherFactory};
#[doc(inline)]
pub use matching::{MapMatching, Measurement};
#[doc(inline)]
pub use network::{InMemoryNetwork, NetworkBuilder, RoadNetwork};
#[doc(inline)]
pub use offline::{MatchResult, construct_route, offline_match};
