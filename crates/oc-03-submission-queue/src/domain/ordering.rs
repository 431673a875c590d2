//! Processing order of pending submissions.

use std::cmp::Ordering;

use oc_01_collections::SortedPriorityQueue;
use shared_types::Submission;

/// Comparator type of the processing queue.
pub type DueDateOrder = fn(&Submission, &Submission) -> Ordering;

/// Pending submissions, earliest due date first. Submissions sharing a due
/// date leave in arrival order.
pub type ProcessingQueue = SortedPriorityQueue<Submission, DueDateOrder>;

/// Orders submissions by their assignment's due date, ascending.
pub fn by_due_date(a: &Submission, b: &Submission) -> Ordering {
    a.due_date.cmp(&b.due_date)
}

/// Empty processing queue.
pub fn processing_queue() -> ProcessingQueue {
    SortedPriorityQueue::new(by_due_date as DueDateOrder)
}
