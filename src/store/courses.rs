use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::error::Result;
use crate::filters::CourseFilter;
use crate::records::{Course, CoursePatch, NewCourse, RecordId};
use crate::store::{not_found, RecordStore, Table};

const SELECT_COURSE: &str = r#"
SELECT c.id, c.name, c.code, c.semester, c.undergraduate_program_id
FROM course c
"#;

impl RecordStore {
    pub fn create_course(&self, input: &NewCourse) -> Result<Course> {
        input.validate()?;
        self.require_reference(Table::Program, input.undergraduate_program)?;
        self.conn.execute(
            r#"
INSERT INTO course(name, code, semester, undergraduate_program_id)
VALUES (?1, ?2, ?3, ?4)
"#,
            params![
                input.name,
                input.code,
                input.semester,
                input.undergraduate_program
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, code = %input.code, "created course");
        self.get_course(id)
    }

    pub fn get_course(&self, id: RecordId) -> Result<Course> {
        self.conn
            .query_row(
                &format!("{SELECT_COURSE} WHERE c.id = ?1"),
                params![id],
                row_to_course,
            )
            .optional()?
            .ok_or_else(|| not_found(Table::Course, id))
    }

    /// Lists courses narrowed by the filter; an empty filter lists everything.
    pub fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"{SELECT_COURSE}
JOIN undergraduate_program p ON p.id = c.undergraduate_program_id
WHERE (?1 IS NULL OR p.code = ?1)
  AND (?2 IS NULL OR c.semester = ?2)
ORDER BY c.id
"#
        ))?;
        let rows = stmt
            .query_map(params![filter.program_code, filter.semester], row_to_course)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn update_course(&self, id: RecordId, patch: CoursePatch) -> Result<Course> {
        let mut course = self.get_course(id)?;
        course.apply(patch);
        course.validate()?;
        self.require_reference(Table::Program, course.undergraduate_program)?;
        self.conn.execute(
            r#"
UPDATE course
SET name = ?1, code = ?2, semester = ?3, undergraduate_program_id = ?4
WHERE id = ?5
"#,
            params![
                course.name,
                course.code,
                course.semester,
                course.undergraduate_program,
                id
            ],
        )?;
        info!(id, "updated course");
        Ok(course)
    }

    /// Removes the course and every enrollment in it.
    pub fn delete_course(&self, id: RecordId) -> Result<()> {
        self.delete_row(Table::Course, id)?;
        info!(id, "deleted course");
        Ok(())
    }
}

fn row_to_course(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        semester: row.get(3)?,
        undergraduate_program: row.get(4)?,
    })
}
