//! Value objects for the Submission Processing Queue

use serde::{Deserialize, Serialize};
use shared_types::{AssignmentId, Submission};

/// Submission counts and mean score of one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStatistics {
    pub assignment_id: AssignmentId,
    pub total_submissions: usize,
    pub graded_submissions: usize,
    pub ungraded_submissions: usize,
    /// Mean of the graded scores, 0.0 when nothing is graded
    pub average_score: f64,
}

impl AssignmentStatistics {
    /// Derives the statistics from the assignment's full and graded lists.
    pub fn from_lists(assignment_id: AssignmentId, all: &[Submission], graded: &[Submission]) -> Self {
        let scores: Vec<f64> = graded.iter().filter_map(|s| s.score).collect();
        let average_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            assignment_id,
            total_submissions: all.len(),
            graded_submissions: graded.len(),
            ungraded_submissions: all.len().saturating_sub(graded.len()),
            average_score,
        }
    }
}
