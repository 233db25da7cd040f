use std::sync::OnceLock;

use regex::Regex;

use crate::error::{RecordsError, Result};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_CODE_LEN: usize = 10;

pub const MIN_SEMESTER: u8 = 1;
pub const MAX_SEMESTER: u8 = 10;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern compiles")
    })
}

pub fn check_student(name: &str, email: &str, registration: &str) -> Result<()> {
    check_text("name", name, MAX_NAME_LEN)?;
    check_email(email)?;
    check_text("registration", registration, MAX_CODE_LEN)
}

pub fn check_program(name: &str, code: &str) -> Result<()> {
    check_text("name", name, MAX_NAME_LEN)?;
    check_text("code", code, MAX_CODE_LEN)
}

pub fn check_course(name: &str, code: &str, semester: u8) -> Result<()> {
    check_text("name", name, MAX_NAME_LEN)?;
    check_text("code", code, MAX_CODE_LEN)?;
    check_semester(semester)
}

pub fn check_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecordsError::validation(format!("{field} may not be blank")));
    }
    if value.chars().count() > max_len {
        return Err(RecordsError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

pub fn check_email(email: &str) -> Result<()> {
    check_text("email", email, MAX_EMAIL_LEN)?;
    if !email_pattern().is_match(email) {
        return Err(RecordsError::validation(format!(
            "email is not a valid address: {email}"
        )));
    }
    Ok(())
}

pub fn check_semester(semester: u8) -> Result<()> {
    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&semester) {
        return Err(RecordsError::validation(format!(
            "semester must be between {MIN_SEMESTER} and {MAX_SEMESTER}, got {semester}"
        )));
    }
    Ok(())
}

pub fn check_grade(grade: f64) -> Result<()> {
    // NaN fails the range check as well.
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(RecordsError::validation(format!(
            "grade must be between {MIN_GRADE} and {MAX_GRADE}, got {grade}"
        )));
    }
    Ok(())
}
