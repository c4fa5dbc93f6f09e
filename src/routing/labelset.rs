use crate::routing::{INVALID_DESTINATION, Label, LabelError, LabelIdx, LabelKey};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct Status {
    label_idx: LabelIdx,
    permanent: bool,
}

/// A queued label, ordered such that the heap yields the
/// lowest sort cost first and, amongst equals, the lowest index.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    sort_cost: f64,
    label_idx: LabelIdx,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .sort_cost
            .total_cmp(&self.sort_cost)
            .then_with(|| other.label_idx.cmp(&self.label_idx))
    }
}

/// The labels of a search, alongside the queue of those yet to be settled.
///
/// Each [`LabelKey`] holds at most one label. Once popped, a label is
/// permanent and is never replaced. Labels outlive the queue, such that
/// paths can be reconstructed once the search completes.
#[derive(Debug)]
pub struct LabelSet {
    max_cost: f64,
    labels: Vec<Label>,
    queue: BinaryHeap<QueueEntry>,
    status: FxHashMap<LabelKey, Status>,
}

impl LabelSet {
    /// Creates an empty set, rejecting labels whose sort cost exceeds `max_cost`.
    pub fn new(max_cost: f64) -> Self {
        Self {
            max_cost,
            labels: vec![],
            queue: BinaryHeap::new(),
            status: FxHashMap::default(),
        }
    }

    pub fn max_cost(&self) -> f64 {
        self.max_cost
    }

    /// Offers a label to the set.
    ///
    /// Returns `Ok(true)` if the label was added, or replaced a pending
    /// label of greater sort cost. Returns `Ok(false)` if the label was
    /// rejected, which occurs when it exceeds the maximum cost, or its
    /// key is already permanent or pending at a lower cost.
    pub fn put(&mut self, label: Label) -> Result<bool, LabelError> {
        match label.key {
            LabelKey::Node(node) if !node.is_valid() => return Err(LabelError::InvalidNode),
            LabelKey::Destination(INVALID_DESTINATION) => {
                return Err(LabelError::InvalidDestination);
            }
            _ => {}
        }

        if label.sort_cost.is_nan() || label.sort_cost > self.max_cost {
            return Ok(false);
        }

        match self.status.get(&label.key).copied() {
            None => {
                let label_idx = self.labels.len() as LabelIdx;
                self.labels.push(label);
                self.queue.push(QueueEntry {
                    sort_cost: label.sort_cost,
                    label_idx,
                });
                self.status.insert(
                    label.key,
                    Status {
                        label_idx,
                        permanent: false,
                    },
                );

                Ok(true)
            }
            Some(Status {
                label_idx,
                permanent: false,
            }) if label.sort_cost < self.labels[label_idx as usize].sort_cost => {
                // The previous entry is discarded once popped, as it no longer matches
                self.labels[label_idx as usize] = label;
                self.queue.push(QueueEntry {
                    sort_cost: label.sort_cost,
                    label_idx,
                });

                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Settles the pending label of least sort cost, returning its index.
    pub fn pop(&mut self) -> Option<LabelIdx> {
        while let Some(QueueEntry {
            sort_cost,
            label_idx,
        }) = self.queue.pop()
        {
            let Some(label) = self.labels.get(label_idx as usize) else {
                continue;
            };

            let Some(status) = self.status.get_mut(&label.key) else {
                continue;
            };

            if status.permanent || status.label_idx != label_idx || label.sort_cost != sort_cost {
                continue;
            }

            status.permanent = true;
            return Some(label_idx);
        }

        None
    }

    #[inline]
    pub fn label(&self, label_idx: LabelIdx) -> Option<&Label> {
        self.labels.get(label_idx as usize)
    }

    /// Iterates the path arriving at `label_idx`, from that label back to the origin.
    pub fn trace(&self, label_idx: LabelIdx) -> impl Iterator<Item = &Label> + '_ {
        std::iter::successors(self.label(label_idx), |label| {
            label.predecessor.and_then(|predecessor| self.label(predecessor))
        })
    }

    /// Whether the label of `key` has been settled.
    pub fn is_permanent(&self, key: LabelKey) -> bool {
        self.status
            .get(&key)
            .is_some_and(|status| status.permanent)
    }

    /// The number of labels held.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    pub fn clear(&mut self) {
        self.clear_queue();
        self.clear_status();
        self.labels.clear();
    }
}
