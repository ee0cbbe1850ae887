use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::constraints::Priority;
use crate::containers::KeyedVec;
use crate::engine::ConstraintId;
use crate::partcp_assert_moderate;

/// The work queue of constraints which have to be propagated. Constraints are popped by priority
/// and in FIFO order within a priority. A constraint is in the queue at most once.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<ConstraintId>>,
    is_enqueued: KeyedVec<ConstraintId, bool>,
    num_enqueued: usize,
    present_priorities: BinaryHeap<Reverse<u8>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        Self::new(3)
    }
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u8) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            is_enqueued: KeyedVec::default(),
            num_enqueued: 0,
            present_priorities: BinaryHeap::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn enqueue(&mut self, constraint_id: ConstraintId, priority: Priority) {
        partcp_assert_moderate!((priority as usize) < self.queues.len());

        if !self.is_enqueued(constraint_id) {
            self.is_enqueued.accomodate(constraint_id, false);
            self.is_enqueued[constraint_id] = true;
            self.num_enqueued += 1;

            if self.queues[priority as usize].is_empty() {
                self.present_priorities.push(Reverse(priority as u8));
            }
            self.queues[priority as usize].push_back(constraint_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<ConstraintId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        partcp_assert_moderate!(!self.queues[top_priority].is_empty());

        let next_constraint = self.queues[top_priority].pop_front()?;
        self.is_enqueued[next_constraint] = false;
        self.num_enqueued -= 1;

        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }

        Some(next_constraint)
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(priority)) = self.present_priorities.pop() {
            self.queues[priority as usize].clear();
        }

        for is_enqueued in self.is_enqueued.iter_mut() {
            *is_enqueued = false;
        }

        self.num_enqueued = 0;
    }

    pub(crate) fn is_enqueued(&self, constraint_id: ConstraintId) -> bool {
        self.is_enqueued
            .get(constraint_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_priorities_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue(ConstraintId(1), Priority::Low);
        queue.enqueue(ConstraintId(0), Priority::Medium);
        queue.enqueue(ConstraintId(3), Priority::High);
        queue.enqueue(ConstraintId(4), Priority::High);

        assert_eq!(Some(ConstraintId(3)), queue.pop());
        assert_eq!(Some(ConstraintId(4)), queue.pop());
        assert_eq!(Some(ConstraintId(0)), queue.pop());
        assert_eq!(Some(ConstraintId(1)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn constraints_are_enqueued_at_most_once() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue(ConstraintId(2), Priority::High);
        queue.enqueue(ConstraintId(2), Priority::High);

        assert_eq!(Some(ConstraintId(2)), queue.pop());
        assert!(queue.is_empty());
        assert!(!queue.is_enqueued(ConstraintId(2)));
    }

    #[test]
    fn clear_empties_every_priority() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue(ConstraintId(0), Priority::High);
        queue.enqueue(ConstraintId(1), Priority::Low);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(None, queue.pop());

        queue.enqueue(ConstraintId(1), Priority::Low);
        assert_eq!(Some(ConstraintId(1)), queue.pop());
    }
}
