use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::error::Result;
use crate::records::{NewProgram, ProgramPatch, RecordId, UndergraduateProgram};
use crate::store::{not_found, RecordStore, Table};

const SELECT_PROGRAM: &str = "SELECT id, name, code FROM undergraduate_program";

impl RecordStore {
    pub fn create_program(&self, input: &NewProgram) -> Result<UndergraduateProgram> {
        input.validate()?;
        self.conn.execute(
            "INSERT INTO undergraduate_program(name, code) VALUES (?1, ?2)",
            params![input.name, input.code],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, code = %input.code, "created undergraduate program");
        self.get_program(id)
    }

    pub fn get_program(&self, id: RecordId) -> Result<UndergraduateProgram> {
        self.conn
            .query_row(
                &format!("{SELECT_PROGRAM} WHERE id = ?1"),
                params![id],
                row_to_program,
            )
            .optional()?
            .ok_or_else(|| not_found(Table::Program, id))
    }

    pub fn list_programs(&self) -> Result<Vec<UndergraduateProgram>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_PROGRAM} ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_program)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn update_program(&self, id: RecordId, patch: ProgramPatch) -> Result<UndergraduateProgram> {
        let mut program = self.get_program(id)?;
        program.apply(patch);
        program.validate()?;
        self.conn.execute(
            "UPDATE undergraduate_program SET name = ?1, code = ?2 WHERE id = ?3",
            params![program.name, program.code, id],
        )?;
        info!(id, "updated undergraduate program");
        Ok(program)
    }

    /// Removes the program, its courses, and every enrollment in those courses.
    pub fn delete_program(&self, id: RecordId) -> Result<()> {
        self.delete_row(Table::Program, id)?;
        info!(id, "deleted undergraduate program");
        Ok(())
    }
}

fn row_to_program(row: &Row<'_>) -> rusqlite::Result<UndergraduateProgram> {
    Ok(UndergraduateProgram {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
    })
}
