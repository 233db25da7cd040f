pub const BASE_MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS student (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    registration TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS undergraduate_program (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    code TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_program_code
    ON undergraduate_program(code);

CREATE TABLE IF NOT EXISTS course (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    code TEXT NOT NULL,
    semester INTEGER NOT NULL CHECK (semester BETWEEN 1 AND 10),
    undergraduate_program_id INTEGER NOT NULL
        REFERENCES undergraduate_program(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_course_program
    ON course(undergraduate_program_id);
CREATE INDEX IF NOT EXISTS idx_course_code
    ON course(code);

CREATE TABLE IF NOT EXISTS enrollment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL
        REFERENCES student(id) ON DELETE CASCADE,
    course_id INTEGER NOT NULL
        REFERENCES course(id) ON DELETE CASCADE,
    grade REAL NOT NULL CHECK (grade BETWEEN 0 AND 10),
    date TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_enrollment_student
    ON enrollment(student_id);
CREATE INDEX IF NOT EXISTS idx_enrollment_course
    ON enrollment(course_id);
"#;
