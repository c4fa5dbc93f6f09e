//! The hidden Markov model relating measurements to the states
//! (candidates) they may have been recorded at.
//!
//! Each measurement forms a column of states. Moving between the states
//! of consecutive columns costs the mismatch between the routed and
//! great-circle distances, and each state costs its distance from the
//! measurement. The [`ViterbiSearch`] finds the sequence of least cost.

pub mod mapmatching;
pub mod measurement;
pub mod segment;
pub mod state;
pub mod viterbi;


#[doc(inline)]
pub use mapmatching::{MapMatching, Trellis};
#[doc(inline)]
pub use measurement::Measurement;
#[doc(inline)]
pub use segment::{EdgeSegment, SegmentError};
#[doc(inline)]
pub use state::{Routes, State, StateId, Time};
#[doc(inline)]
pub use viterbi::{PathIter, ViterbiModel, ViterbiSearch};
