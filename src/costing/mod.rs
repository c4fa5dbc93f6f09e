//! Costing models, deciding which edges a travel mode may use.

pub mod definition;
pub mod mode;
pub mod profiles;
pub mod registry;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use definition::{CostModel, EdgeLabel};
#[doc(inline)]
pub use mode::TravelMode;
#[doc(inline)]
pub use profiles::{AccessCost, ProfileOptions};
#[doc(inline)]
pub use registry::ModeRegistry;
