//! SQLite-backed record store.
//!
//! Each entity gets its own `impl RecordStore` block in a sibling module.
//! Referential integrity and cascade deletes are left to SQLite, so every
//! connection turns foreign-key enforcement on before it is handed out.

pub mod courses;
pub mod enrollments;
pub mod migrations;
pub mod programs;
pub mod reports;
pub mod students;

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::{RecordsError, Result};
use crate::records::RecordId;
use crate::store::migrations::BASE_MIGRATION;

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        debug!("opened record store at {}", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(BASE_MIGRATION)?;
        Ok(())
    }

    /// Runs `work` inside a single transaction, rolling back if it fails.
    pub fn in_transaction<T>(&self, work: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = work(self)?;
        tx.commit()?;
        Ok(value)
    }

    fn exists(&self, table: Table, id: RecordId) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table.name());
        let found: bool = self.conn.query_row(&sql, params![id], |row| row.get(0))?;
        Ok(found)
    }

    fn require_reference(&self, table: Table, id: RecordId) -> Result<()> {
        if self.exists(table, id)? {
            return Ok(());
        }
        Err(RecordsError::validation(format!(
            "{} {id} does not exist",
            table.label()
        )))
    }

    fn delete_row(&self, table: Table, id: RecordId) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table.name());
        let removed = self.conn.execute(&sql, params![id])?;
        if removed == 0 {
            return Err(not_found(table, id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Student,
    Program,
    Course,
    Enrollment,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Program => "undergraduate_program",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Program => "undergraduate program",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
        }
    }
}

fn not_found(table: Table, id: RecordId) -> RecordsError {
    RecordsError::not_found(format!("{} {id} not found.", table.label()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::records::{NewCourse, NewEnrollment, NewProgram, NewStudent, RecordId};
    use crate::store::RecordStore;

    pub fn program(store: &RecordStore, code: &str) -> RecordId {
        store
            .create_program(&NewProgram {
                name: format!("Program {code}"),
                code: code.to_string(),
            })
            .expect("create program")
            .id
    }

    pub fn course(store: &RecordStore, program: RecordId, code: &str, semester: u8) -> RecordId {
        store
            .create_course(&NewCourse {
                name: format!("Course {code}"),
                code: code.to_string(),
                semester,
                undergraduate_program: program,
            })
            .expect("create course")
            .id
    }

    pub fn student(store: &RecordStore, registration: &str) -> RecordId {
        store
            .create_student(&NewStudent {
                name: format!("Student {registration}"),
                email: format!("s{registration}@example.com"),
                registration: registration.to_string(),
            })
            .expect("create student")
            .id
    }

    pub fn enroll(store: &RecordStore, student: RecordId, course: RecordId, grade: f64) -> RecordId {
        store
            .create_enrollment(&NewEnrollment {
                student,
                course,
                grade,
            })
            .expect("create enrollment")
            .id
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::test_support::*;
    use super::RecordStore;

    #[test]
    fn deleting_program_cascades_to_courses_and_enrollments() {
        let store = RecordStore::open_in_memory().expect("store");
        let emc = program(&store, "EMC");
        let eel = program(&store, "EEL");
        let course_a = course(&store, emc, "A", 1);
        let course_b = course(&store, eel, "B", 2);
        let ana = student(&store, "100");
        enroll(&store, ana, course_a, 8.0);
        let kept = enroll(&store, ana, course_b, 6.0);

        store.delete_program(emc).expect("delete program");

        assert!(store.get_course(course_a).unwrap_err().is_not_found());
        let remaining = store.list_enrollments().expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);
        assert!(store.get_student(ana).is_ok());
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let store = RecordStore::open_in_memory().expect("store");
        let result: crate::error::Result<()> = store.in_transaction(|tx| {
            program(tx, "EMC");
            Err(crate::error::RecordsError::validation("abort"))
        });
        assert!(result.is_err());
        assert!(store.list_programs().expect("list").is_empty());
    }

    #[test]
    fn file_store_persists_between_connections() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("records.db");
        {
            let store = RecordStore::open(&path).expect("open");
            program(&store, "EQA");
        }
        let reopened = RecordStore::open(&path).expect("reopen");
        let programs = reopened.list_programs().expect("list");
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].code, "EQA");
    }
}
