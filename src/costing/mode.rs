use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, FromRepr};

/// The mode of transport a costing model evaluates.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TravelMode {
    Drive = 0,
    Pedestrian = 1,
    Bicycle = 2,
    Transit = 3,
    /// Any mode; used by multimodal matching.
    Universal = 4,
}

impl TravelMode {
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}
