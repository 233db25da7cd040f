//! Grade reporting over enrollment rows.
//!
//! The functions here are pure: the store supplies the rows, this module
//! folds them. Grouping uses ordered maps so output never depends on the
//! order the rows arrive in.

pub mod average;
pub mod metrics;

use serde::{Deserialize, Serialize};

pub use average::average_grade;
pub use metrics::{metrics_by_program, ProgramMetricsMap};

/// Grades strictly below this count as failures.
pub const FAILURE_THRESHOLD: f64 = 5.75;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AverageGrade {
    pub average_grade: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramMetrics {
    pub program_name: String,
    pub average_grade: f64,
    pub failure_rate: f64,
    /// Not part of the API payload; kept for CLI reports.
    #[serde(skip)]
    pub total_enrollments: usize,
}

/// One enrollment grade tagged with the program that owns its course.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramGrade {
    pub program_code: String,
    pub program_name: String,
    pub grade: f64,
}

pub fn is_failing(grade: f64) -> bool {
    grade < FAILURE_THRESHOLD
}
