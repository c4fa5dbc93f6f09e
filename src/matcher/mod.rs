//! The entry point to matching: a factory of matchers per travel mode.

pub mod factory;


#[doc(inline)]
pub use factory::{MapMatcher, MapMatcherFactory};
