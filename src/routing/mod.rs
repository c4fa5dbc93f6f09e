//! A bounded, multi-destination shortest path search over the road
//! network, routing between consecutive columns of the trellis.

pub mod error;
pub mod label;
pub mod labelset;
pub mod search;
pub mod turn;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::LabelError;
#[doc(inline)]
pub use label::{INVALID_DESTINATION, Label, LabelIdx, LabelKey};
#[doc(inline)]
pub use labelset::LabelSet;
#[doc(inline)]
pub use search::RoutingContext;
#[doc(inline)]
pub use turn::{TURN_DEGREES, TurnCostTable};
