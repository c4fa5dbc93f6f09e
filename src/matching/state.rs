use crate::candidate::Candidate;
use crate::routing::{Label, LabelIdx, LabelSet};
use rustc_hash::FxHashMap;

pub type StateId = usize;

/// Index of a column of the trellis, one per matched measurement.
pub type Time = usize;

/// A candidate, placed within the trellis.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    id: StateId,
    time: Time,
    candidate: Candidate,
}

impl State {
    pub fn new(id: StateId, time: Time, candidate: Candidate) -> Self {
        Self {
            id,
            time,
            candidate,
        }
    }

    #[inline]
    pub fn id(&self) -> StateId {
        self.id
    }

    #[inline]
    pub fn time(&self) -> Time {
        self.time
    }

    #[inline]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }
}

/// The paths from a single state to the states of the following column.
#[derive(Debug)]
pub struct Routes {
    labelset: LabelSet,
    label_idx: FxHashMap<StateId, LabelIdx>,
}

impl Routes {
    pub fn new(labelset: LabelSet, label_idx: FxHashMap<StateId, LabelIdx>) -> Self {
        Self {
            labelset,
            label_idx,
        }
    }

    /// The label arriving at `target`, if it was reached.
    pub fn last_label(&self, target: StateId) -> Option<&Label> {
        self.label_idx
            .get(&target)
            .and_then(|idx| self.labelset.label(*idx))
    }

    /// Iterates the labels of the path to `target` in reverse,
    /// beginning with the label arriving at `target`.
    ///
    /// Empty if `target` was not reached.
    pub fn route(&self, target: StateId) -> impl Iterator<Item = &Label> + '_ {
        self.label_idx
            .get(&target)
            .into_iter()
            .flat_map(|idx| self.labelset.trace(*idx))
    }

    /// Whether `target` was reached.
    pub fn reaches(&self, target: StateId) -> bool {
        self.label_idx.contains_key(&target)
    }
}
