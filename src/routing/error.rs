use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    #[error("label targets an invalid node")]
    InvalidNode,

    #[error("label targets an invalid destination")]
    InvalidDestination,
}
