use std::iter::Rev;
use std::vec::Drain;

use crate::partcp_assert_simple;

/// A stack of undo entries, split into segments by checkpoints.
///
/// Checkpoint `0` is the root; it has no segment of its own and can never be undone.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    entries: Vec<T>,
    /// The length of `entries` at the moment each checkpoint was opened; its length is the
    /// current checkpoint.
    segment_starts: Vec<usize>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            entries: vec![],
            segment_starts: vec![],
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.segment_starts.push(self.entries.len());
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.segment_starts.len()
    }

    /// Closes every checkpoint after `checkpoint` and returns their entries, most recent first,
    /// which is the order in which they have to be undone.
    pub(crate) fn undo_to(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        partcp_assert_simple!(checkpoint < self.checkpoint());

        let start = self.segment_starts[checkpoint];
        self.segment_starts.truncate(checkpoint);
        self.entries.drain(start..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undoing_to_the_root_empties_the_checkpointed_entries() {
        let mut trail = Trail::default();
        trail.push('a');

        trail.new_checkpoint();
        trail.push('b');
        assert_eq!(1, trail.checkpoint());

        assert_eq!(vec!['b'], trail.undo_to(0).collect::<Vec<_>>());
        assert_eq!(0, trail.checkpoint());
        assert_eq!(1, trail.len());
    }

    #[test]
    fn entries_of_several_checkpoints_are_undone_in_reverse() {
        let mut trail = Trail::default();

        for entry in 1..=4 {
            trail.new_checkpoint();
            trail.push(entry);
        }

        assert_eq!(vec![4, 3], trail.undo_to(2).collect::<Vec<_>>());
        assert_eq!(2, trail.checkpoint());
        assert_eq!(2, trail.len());
    }
}
