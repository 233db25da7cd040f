//! Mock data generation for local development.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::info;

use crate::error::{RecordsError, Result};
use crate::records::validation::{MAX_GRADE, MAX_SEMESTER, MIN_GRADE, MIN_SEMESTER};
use crate::records::{NewCourse, NewEnrollment, NewProgram, NewStudent, RecordId};
use crate::store::RecordStore;

pub const PROGRAMS: [(&str, &str); 7] = [
    ("ECA", "Engenharia de Controle e Automação"),
    ("EPS", "Engenharia de Produção"),
    ("EMC", "Engenharia Mecânica"),
    ("EMT", "Engenharia de Materiais"),
    ("EEL", "Engenharia Elétrica"),
    ("ELT", "Engenharia Eletrônica"),
    ("EQA", "Engenharia Química"),
];

const GRADE_MEAN: f64 = 6.0;
const GRADE_STD_DEV: f64 = 1.5;

#[derive(Debug, Clone, Copy)]
pub struct SeedPlan {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SeedSummary {
    pub programs: usize,
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

/// Populates the store in a single transaction.
pub fn seed_store(store: &RecordStore, plan: &SeedPlan) -> Result<SeedSummary> {
    if plan.enrollments > 0 && (plan.students == 0 || plan.courses == 0) {
        return Err(RecordsError::validation(
            "enrollments require at least one student and one course",
        ));
    }
    let mut rng = match plan.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let grades = grade_distribution()?;
    let today = Utc::now().date_naive();

    let summary = store.in_transaction(|tx| {
        let programs = seed_programs(tx)?;
        let students = seed_students(tx, &mut rng, plan.students)?;
        let courses = seed_courses(tx, &mut rng, &programs, plan.courses)?;
        let enrollments = seed_enrollments(
            tx,
            &mut rng,
            &grades,
            today,
            (students.as_slice(), courses.as_slice()),
            plan.enrollments,
        )?;
        Ok(SeedSummary {
            programs: programs.len(),
            students: students.len(),
            courses: courses.len(),
            enrollments,
        })
    })?;
    info!(
        programs = summary.programs,
        students = summary.students,
        courses = summary.courses,
        enrollments = summary.enrollments,
        "seeded record store"
    );
    Ok(summary)
}

fn seed_programs(store: &RecordStore) -> Result<Vec<RecordId>> {
    PROGRAMS
        .iter()
        .map(|(code, name)| {
            store
                .create_program(&NewProgram {
                    name: name.to_string(),
                    code: code.to_string(),
                })
                .map(|p| p.id)
        })
        .collect()
}

fn seed_students(store: &RecordStore, rng: &mut StdRng, count: usize) -> Result<Vec<RecordId>> {
    let registrations = unique_numbers(rng, count, 10_000_000, 99_999_999);
    let mut ids = Vec::with_capacity(count);
    for registration in registrations {
        let student = store.create_student(&NewStudent {
            name: Name().fake_with_rng(rng),
            email: SafeEmail().fake_with_rng(rng),
            registration: registration.to_string(),
        })?;
        ids.push(student.id);
    }
    Ok(ids)
}

fn seed_courses(
    store: &RecordStore,
    rng: &mut StdRng,
    programs: &[RecordId],
    count: usize,
) -> Result<Vec<RecordId>> {
    let codes = unique_numbers(rng, count, 10_000, 99_999);
    let mut ids = Vec::with_capacity(count);
    for code in codes {
        let Some(program) = programs.choose(rng) else {
            break;
        };
        let course = store.create_course(&NewCourse {
            name: Word().fake_with_rng(rng),
            code: code.to_string(),
            semester: rng.random_range(MIN_SEMESTER..=MAX_SEMESTER),
            undergraduate_program: *program,
        })?;
        ids.push(course.id);
    }
    Ok(ids)
}

fn seed_enrollments(
    store: &RecordStore,
    rng: &mut StdRng,
    grades: &Normal<f64>,
    today: NaiveDate,
    (students, courses): (&[RecordId], &[RecordId]),
    count: usize,
) -> Result<usize> {
    let mut created = 0;
    for _ in 0..count {
        let (Some(student), Some(course)) = (students.choose(rng), courses.choose(rng)) else {
            break;
        };
        store.create_enrollment_on(
            &NewEnrollment {
                student: *student,
                course: *course,
                grade: sample_grade(grades, rng),
            },
            sample_date(rng, today),
        )?;
        created += 1;
    }
    Ok(created)
}

/// Grades follow N(6, 1.5) before clamping.
pub fn grade_distribution() -> Result<Normal<f64>> {
    Normal::new(GRADE_MEAN, GRADE_STD_DEV)
        .map_err(|err| RecordsError::validation(format!("grade distribution: {err}")))
}

/// Draws a grade clamped to the valid range and rounded to cents.
pub fn sample_grade(grades: &Normal<f64>, rng: &mut impl Rng) -> f64 {
    let grade = grades.sample(rng).clamp(MIN_GRADE, MAX_GRADE);
    (grade * 100.0).round() / 100.0
}

/// A day between January 1st of `today`'s year and `today`, inclusive.
fn sample_date(rng: &mut impl Rng, today: NaiveDate) -> NaiveDate {
    let elapsed = i64::from(today.ordinal0());
    today - Duration::days(rng.random_range(0..=elapsed))
}

fn unique_numbers(rng: &mut StdRng, count: usize, low: u64, high: u64) -> Vec<u64> {
    let mut seen = HashSet::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    let capacity = (high - low + 1) as usize;
    while out.len() < count.min(capacity) {
        let candidate = rng.random_range(low..=high);
        if seen.insert(candidate) {
            out.push(candidate);
        }
    }
    out
}
