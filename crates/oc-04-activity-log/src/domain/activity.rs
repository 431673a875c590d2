//! Activity payloads

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    ReportGenerated,
    Enrollment,
    Submission,
    Grading,
    CourseChange,
    #[default]
    Custom,
}

/// One entry of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub message: String,
}

impl Activity {
    pub fn new(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Free-form activity.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(ActivityKind::Custom, message)
    }

    /// "Student Performance Report Generated for {username}"
    pub fn student_report_generated(username: &str) -> Self {
        Self::new(
            ActivityKind::ReportGenerated,
            format!("Student Performance Report Generated for {username}"),
        )
    }

    /// "Course Completion Report Generated for {course_title}"
    pub fn course_report_generated(course_title: &str) -> Self {
        Self::new(
            ActivityKind::ReportGenerated,
            format!("Course Completion Report Generated for {course_title}"),
        )
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
