pub mod validation;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub type RecordId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub registration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UndergraduateProgram {
    pub id: RecordId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub semester: u8,
    pub undergraduate_program: RecordId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: RecordId,
    pub student: RecordId,
    pub course: RecordId,
    pub grade: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub registration: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewProgram {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub semester: u8,
    pub undergraduate_program: RecordId,
}

/// The enrollment date is assigned by the store, so clients never send one.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewEnrollment {
    pub student: RecordId,
    pub course: RecordId,
    pub grade: f64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub registration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProgramPatch {
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub semester: Option<u8>,
    pub undergraduate_program: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EnrollmentPatch {
    pub student: Option<RecordId>,
    pub course: Option<RecordId>,
    pub grade: Option<f64>,
}

impl NewStudent {
    pub fn validate(&self) -> Result<()> {
        validation::check_student(&self.name, &self.email, &self.registration)
    }
}

impl NewProgram {
    pub fn validate(&self) -> Result<()> {
        validation::check_program(&self.name, &self.code)
    }
}

impl NewCourse {
    pub fn validate(&self) -> Result<()> {
        validation::check_course(&self.name, &self.code, self.semester)
    }
}

impl NewEnrollment {
    pub fn validate(&self) -> Result<()> {
        validation::check_grade(self.grade)
    }
}

impl Student {
    pub fn validate(&self) -> Result<()> {
        validation::check_student(&self.name, &self.email, &self.registration)
    }

    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(registration) = patch.registration {
            self.registration = registration;
        }
    }
}

impl UndergraduateProgram {
    pub fn validate(&self) -> Result<()> {
        validation::check_program(&self.name, &self.code)
    }

    pub fn apply(&mut self, patch: ProgramPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
    }
}

impl Course {
    pub fn validate(&self) -> Result<()> {
        validation::check_course(&self.name, &self.code, self.semester)
    }

    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(semester) = patch.semester {
            self.semester = semester;
        }
        if let Some(program) = patch.undergraduate_program {
            self.undergraduate_program = program;
        }
    }
}

impl Enrollment {
    pub fn validate(&self) -> Result<()> {
        validation::check_grade(self.grade)
    }

    pub fn apply(&mut self, patch: EnrollmentPatch) {
        if let Some(student) = patch.student {
            self.student = student;
        }
        if let Some(course) = patch.course {
            self.course = course;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
    }
}

impl From<NewStudent> for StudentPatch {
    fn from(value: NewStudent) -> Self {
        Self {
            name: Some(value.name),
            email: Some(value.email),
            registration: Some(value.registration),
        }
    }
}

impl From<NewProgram> for ProgramPatch {
    fn from(value: NewProgram) -> Self {
        Self {
            name: Some(value.name),
            code: Some(value.code),
        }
    }
}

impl From<NewCourse> for CoursePatch {
    fn from(value: NewCourse) -> Self {
        Self {
            name: Some(value.name),
            code: Some(value.code),
            semester: Some(value.semester),
            undergraduate_program: Some(value.undergraduate_program),
        }
    }
}

impl From<NewEnrollment> for EnrollmentPatch {
    fn from(value: NewEnrollment) -> Self {
        Self {
            student: Some(value.student),
            course: Some(value.course),
            grade: Some(value.grade),
        }
    }
}
