use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::error::Result;
use crate::records::{NewStudent, RecordId, Student, StudentPatch};
use crate::store::{not_found, RecordStore, Table};

const SELECT_STUDENT: &str = "SELECT id, name, email, registration FROM student";

impl RecordStore {
    pub fn create_student(&self, input: &NewStudent) -> Result<Student> {
        input.validate()?;
        self.conn.execute(
            "INSERT INTO student(name, email, registration) VALUES (?1, ?2, ?3)",
            params![input.name, input.email, input.registration],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, registration = %input.registration, "created student");
        self.get_student(id)
    }

    pub fn get_student(&self, id: RecordId) -> Result<Student> {
        self.conn
            .query_row(
                &format!("{SELECT_STUDENT} WHERE id = ?1"),
                params![id],
                row_to_student,
            )
            .optional()?
            .ok_or_else(|| not_found(Table::Student, id))
    }

    pub fn list_students(&self) -> Result<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_STUDENT} ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_student)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn update_student(&self, id: RecordId, patch: StudentPatch) -> Result<Student> {
        let mut student = self.get_student(id)?;
        student.apply(patch);
        student.validate()?;
        self.conn.execute(
            "UPDATE student SET name = ?1, email = ?2, registration = ?3 WHERE id = ?4",
            params![student.name, student.email, student.registration, id],
        )?;
        info!(id, "updated student");
        Ok(student)
    }

    /// Removes the student together with all of their enrollments.
    pub fn delete_student(&self, id: RecordId) -> Result<()> {
        self.delete_row(Table::Student, id)?;
        info!(id, "deleted student");
        Ok(())
    }
}

fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        registration: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::RecordsError;
    use crate::records::{NewStudent, StudentPatch};
    use crate::store::test_support::{course, enroll, program, student};
    use crate::store::RecordStore;

    #[test]
    fn create_and_read_back() {
        let store = RecordStore::open_in_memory().expect("store");
        let created = store
            .create_student(&NewStudent {
                name: "Ana Souza".to_string(),
                email: "ana@unb.br".to_string(),
                registration: "19010001".to_string(),
            })
            .expect("create");
        let fetched = store.get_student(created.id).expect("get");
        assert_eq!(created, fetched);
    }

    #[test]
    fn invalid_email_is_rejected_before_insert() {
        let store = RecordStore::open_in_memory().expect("store");
        let err = store
            .create_student(&NewStudent {
                name: "Ana".to_string(),
                email: "not-an-email".to_string(),
                registration: "1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
        assert!(store.list_students().expect("list").is_empty());
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let store = RecordStore::open_in_memory().expect("store");
        let id = student(&store, "42");
        let updated = store
            .update_student(
                id,
                StudentPatch {
                    email: Some("new@example.com".to_string()),
                    ..StudentPatch::default()
                },
            )
            .expect("update");
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.registration, "42");
        assert_eq!(store.get_student(id).expect("get"), updated);
    }

    #[test]
    fn missing_student_is_not_found() {
        let store = RecordStore::open_in_memory().expect("store");
        assert!(store.get_student(99).unwrap_err().is_not_found());
        assert!(store
            .update_student(99, StudentPatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(store.delete_student(99).unwrap_err().is_not_found());
    }

    #[test]
    fn deleting_student_removes_their_enrollments() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let calc = course(&store, emc, "MAT01", 1);
        let ana = student(&store, "1");
        let bia = student(&store, "2");
        enroll(&store, ana, calc, 7.0);
        enroll(&store, bia, calc, 9.0);

        store.delete_student(ana).expect("delete");

        let remaining = store.list_enrollments().expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].student, bia);
    }
}
