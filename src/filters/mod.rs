//! Query-parameter narrowing for course and enrollment listings.
//!
//! Raw parameters arrive as optional strings; each filter struct enumerates
//! the parameters it recognises and parses them up front so the store only
//! ever sees typed values.

use serde::Deserialize;

use crate::error::{RecordsError, Result};

pub const NO_COURSES_FOUND: &str = "No courses found.";
pub const NO_ENROLLMENTS_FOUND: &str = "No enrollments found.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseQuery {
    pub program_code: Option<String>,
    pub semester: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentQuery {
    pub course_code: Option<String>,
}

/// Exact-match restrictions on the course listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub program_code: Option<String>,
    pub semester: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentFilter {
    pub course_code: Option<String>,
}

impl CourseFilter {
    pub fn from_query(query: CourseQuery) -> Result<Self> {
        let semester = non_blank(query.semester)
            .map(|raw| parse_semester(&raw))
            .transpose()?;
        Ok(Self {
            program_code: non_blank(query.program_code),
            semester,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.program_code.is_none() && self.semester.is_none()
    }
}

impl EnrollmentFilter {
    pub fn from_query(query: EnrollmentQuery) -> Self {
        Self {
            course_code: non_blank(query.course_code),
        }
    }

    pub fn for_course(code: impl Into<String>) -> Self {
        Self {
            course_code: Some(code.into()),
        }
    }
}

pub fn parse_semester(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RecordsError::InvalidParameter {
            name: "semester",
            value: raw.to_string(),
        })
}

/// Empty listings are reported as not-found rather than as an empty list.
pub fn require_any<T>(items: Vec<T>, message: &str) -> Result<Vec<T>> {
    if items.is_empty() {
        return Err(RecordsError::not_found(message));
    }
    Ok(items)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_course_parameters() {
        let filter = CourseFilter::from_query(CourseQuery {
            program_code: Some("EMC".to_string()),
            semester: Some("3".to_string()),
        })
        .expect("valid query");
        assert_eq!(filter.program_code.as_deref(), Some("EMC"));
        assert_eq!(filter.semester, Some(3));
    }

    #[test]
    fn non_numeric_semester_is_invalid_parameter() {
        let err = CourseFilter::from_query(CourseQuery {
            program_code: None,
            semester: Some("abc".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, RecordsError::InvalidParameter { name: "semester", .. }));
        assert_eq!(err.to_string(), "Invalid semester parameter: abc");
    }

    #[test]
    fn blank_parameters_are_ignored() {
        let filter = CourseFilter::from_query(CourseQuery {
            program_code: Some(String::new()),
            semester: Some(String::new()),
        })
        .expect("blank query");
        assert!(filter.is_empty());

        let filter = EnrollmentFilter::from_query(EnrollmentQuery {
            course_code: Some(String::new()),
        });
        assert_eq!(filter, EnrollmentFilter::default());
    }

    #[test]
    fn empty_listing_becomes_not_found() {
        let err = require_any(Vec::<u8>::new(), NO_COURSES_FOUND).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), NO_COURSES_FOUND);
        assert_eq!(require_any(vec![1], NO_COURSES_FOUND).expect("non-empty"), vec![1]);
    }
}
