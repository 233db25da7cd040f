use crate::error::{RecordsError, Result};
use crate::filters::NO_ENROLLMENTS_FOUND;
use crate::reports::AverageGrade;

/// Arithmetic mean of the given grades; an empty set is not-found.
pub fn average_grade(grades: &[f64]) -> Result<AverageGrade> {
    if grades.is_empty() {
        return Err(RecordsError::not_found(NO_ENROLLMENTS_FOUND));
    }
    let total: f64 = grades.iter().sum();
    Ok(AverageGrade {
        average_grade: total / grades.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::average_grade;

    #[test]
    fn averages_course_grades() {
        let result = average_grade(&[8.0, 4.0]).expect("non-empty");
        assert!((result.average_grade - 6.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_is_not_found_rather_than_nan() {
        let err = average_grade(&[]).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No enrollments found.");
    }

    #[test]
    fn single_grade_is_its_own_average() {
        let result = average_grade(&[0.0]).expect("non-empty");
        assert_eq!(result.average_grade, 0.0);
    }
}
