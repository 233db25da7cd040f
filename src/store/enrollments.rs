use chrono::{NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::error::Result;
use crate::records::{Enrollment, EnrollmentPatch, NewEnrollment, RecordId};
use crate::store::{not_found, RecordStore, Table};

const SELECT_ENROLLMENT: &str = "SELECT id, student_id, course_id, grade, date FROM enrollment";

impl RecordStore {
    /// Records an enrollment dated today.
    pub fn create_enrollment(&self, input: &NewEnrollment) -> Result<Enrollment> {
        self.create_enrollment_on(input, Utc::now().date_naive())
    }

    pub(crate) fn create_enrollment_on(
        &self,
        input: &NewEnrollment,
        date: NaiveDate,
    ) -> Result<Enrollment> {
        input.validate()?;
        self.require_reference(Table::Student, input.student)?;
        self.require_reference(Table::Course, input.course)?;
        self.conn.execute(
            r#"
INSERT INTO enrollment(student_id, course_id, grade, date)
VALUES (?1, ?2, ?3, ?4)
"#,
            params![input.student, input.course, input.grade, date],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, student = input.student, course = input.course, "created enrollment");
        self.get_enrollment(id)
    }

    pub fn get_enrollment(&self, id: RecordId) -> Result<Enrollment> {
        self.conn
            .query_row(
                &format!("{SELECT_ENROLLMENT} WHERE id = ?1"),
                params![id],
                row_to_enrollment,
            )
            .optional()?
            .ok_or_else(|| not_found(Table::Enrollment, id))
    }

    pub fn list_enrollments(&self) -> Result<Vec<Enrollment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_ENROLLMENT} ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_enrollment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The enrollment date is fixed at creation and never rewritten here.
    pub fn update_enrollment(&self, id: RecordId, patch: EnrollmentPatch) -> Result<Enrollment> {
        let mut enrollment = self.get_enrollment(id)?;
        enrollment.apply(patch);
        enrollment.validate()?;
        self.require_reference(Table::Student, enrollment.student)?;
        self.require_reference(Table::Course, enrollment.course)?;
        self.conn.execute(
            "UPDATE enrollment SET student_id = ?1, course_id = ?2, grade = ?3 WHERE id = ?4",
            params![enrollment.student, enrollment.course, enrollment.grade, id],
        )?;
        info!(id, "updated enrollment");
        Ok(enrollment)
    }

    pub fn delete_enrollment(&self, id: RecordId) -> Result<()> {
        self.delete_row(Table::Enrollment, id)?;
        info!(id, "deleted enrollment");
        Ok(())
    }
}

fn row_to_enrollment(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
    Ok(Enrollment {
        id: row.get(0)?,
        student: row.get(1)?,
        course: row.get(2)?,
        grade: row.get(3)?,
        date: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use crate::error::RecordsError;
    use crate::records::{EnrollmentPatch, NewEnrollment};
    use crate::store::test_support::{course, enroll, program, student};
    use crate::store::RecordStore;

    #[test]
    fn grade_outside_range_is_rejected() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let calc = course(&store, emc, "MAT01", 1);
        let ana = student(&store, "1");
        for grade in [-1.0, 10.5, f64::NAN] {
            let err = store
                .create_enrollment(&NewEnrollment {
                    student: ana,
                    course: calc,
                    grade,
                })
                .unwrap_err();
            assert!(matches!(err, RecordsError::Validation(_)));
        }
        assert!(store.list_enrollments().expect("list").is_empty());
    }

    #[test]
    fn enrollment_is_dated_on_creation() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let calc = course(&store, emc, "MAT01", 1);
        let ana = student(&store, "1");
        let id = enroll(&store, ana, calc, 7.25);
        let enrollment = store.get_enrollment(id).expect("get");
        assert_eq!(enrollment.date, Utc::now().date_naive());
        assert_eq!(enrollment.grade, 7.25);
    }

    #[test]
    fn update_keeps_original_date() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let calc = course(&store, emc, "MAT01", 1);
        let ana = student(&store, "1");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        let created = store
            .create_enrollment_on(
                &NewEnrollment {
                    student: ana,
                    course: calc,
                    grade: 4.0,
                },
                date,
            )
            .expect("create");
        let updated = store
            .update_enrollment(
                created.id,
                EnrollmentPatch {
                    grade: Some(6.5),
                    ..EnrollmentPatch::default()
                },
            )
            .expect("update");
        assert_eq!(updated.grade, 6.5);
        assert_eq!(updated.date, date);
    }

    #[test]
    fn enrollment_requires_existing_student_and_course() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let calc = course(&store, emc, "MAT01", 1);
        let ana = student(&store, "1");

        let missing_student = store.create_enrollment(&NewEnrollment {
            student: 77,
            course: calc,
            grade: 5.0,
        });
        assert!(matches!(missing_student, Err(RecordsError::Validation(_))));

        let missing_course = store.create_enrollment(&NewEnrollment {
            student: ana,
            course: 77,
            grade: 5.0,
        });
        assert!(matches!(missing_course, Err(RecordsError::Validation(_))));
    }
}
