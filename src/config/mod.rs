//! Configuration of matching sessions, loaded through `serde`.

pub mod error;
pub mod options;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::ConfigError;
#[doc(inline)]
pub use options::{
    CostingConfig, GridConfig, MatchOptions, MatchPreferences, MatcherConfig,
};
