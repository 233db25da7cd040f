use rusqlite::params;

use crate::error::Result;
use crate::filters::EnrollmentFilter;
use crate::reports::ProgramGrade;
use crate::store::RecordStore;

impl RecordStore {
    /// Grades of all enrollments, optionally restricted to courses with the given code.
    pub fn enrollment_grades(&self, filter: &EnrollmentFilter) -> Result<Vec<f64>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT e.grade
FROM enrollment e
JOIN course c ON c.id = e.course_id
WHERE (?1 IS NULL OR c.code = ?1)
ORDER BY e.id
"#,
        )?;
        let grades = stmt
            .query_map(params![filter.course_code], |row| row.get(0))?
            .collect::<std::result::Result<Vec<f64>, _>>()?;
        Ok(grades)
    }

    pub fn program_grades(&self) -> Result<Vec<ProgramGrade>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT p.code, p.name, e.grade
FROM enrollment e
JOIN course c ON c.id = e.course_id
JOIN undergraduate_program p ON p.id = c.undergraduate_program_id
ORDER BY e.id
"#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ProgramGrade {
                    program_code: row.get(0)?,
                    program_name: row.get(1)?,
                    grade: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::filters::{EnrollmentFilter, EnrollmentQuery};
    use crate::reports::{average_grade, metrics_by_program};
    use crate::store::test_support::{course, enroll, program, student};
    use crate::store::RecordStore;

    #[test]
    fn average_for_one_course() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let a = course(&store, emc, "A", 1);
        let b = course(&store, emc, "B", 1);
        let ana = student(&store, "1");
        enroll(&store, ana, a, 8.0);
        enroll(&store, ana, a, 4.0);
        enroll(&store, ana, b, 10.0);

        let grades = store
            .enrollment_grades(&EnrollmentFilter::for_course("A"))
            .expect("grades");
        assert_eq!(average_grade(&grades).expect("avg").average_grade, 6.0);

        let missing = store
            .enrollment_grades(&EnrollmentFilter::for_course("ZZZ"))
            .expect("grades");
        assert!(average_grade(&missing).unwrap_err().is_not_found());
    }

    #[test]
    fn metrics_skip_programs_without_enrollments() {
        let store = RecordStore::open_in_memory().expect("store");
        let p = program(&store, "P");
        program(&store, "EMPTY");
        let c1 = course(&store, p, "C1", 1);
        let c2 = course(&store, p, "C2", 2);
        let ana = student(&store, "1");
        enroll(&store, ana, c1, 5.0);
        enroll(&store, ana, c1, 6.0);
        enroll(&store, ana, c2, 7.0);

        let metrics = metrics_by_program(&store.program_grades().expect("rows")).expect("metrics");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics["P"].average_grade, 6.0);
        assert!((metrics["P"].failure_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn blank_course_code_matches_every_enrollment() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let a = course(&store, emc, "A", 1);
        let b = course(&store, emc, "B", 1);
        let ana = student(&store, "1");
        enroll(&store, ana, a, 8.0);
        enroll(&store, ana, b, 5.0);

        let filter = EnrollmentFilter::from_query(EnrollmentQuery {
            course_code: Some(String::new()),
        });
        let grades = store.enrollment_grades(&filter).expect("grades");
        assert_eq!(average_grade(&grades).expect("avg").average_grade, 6.5);
    }
}
