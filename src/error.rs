use crate::config::ConfigError;
use crate::impl_err;
use crate::matching::SegmentError;
use crate::routing::LabelError;
use thiserror::Error;

/// Crate-level error, wrapping the error of each submodule.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(ConfigError),

    #[error("routing error: {0}")]
    Label(LabelError),

    #[error("segment error: {0}")]
    Segment(SegmentError),
}

impl_err!(ConfigError, Config);
impl_err!(LabelError, Label);
impl_err!(SegmentError, Segment);
