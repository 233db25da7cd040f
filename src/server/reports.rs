use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::filters::{
    require_any, CourseFilter, CourseQuery, EnrollmentFilter, EnrollmentQuery, NO_COURSES_FOUND,
};
use crate::records::Course;
use crate::reports::{average_grade, metrics_by_program, AverageGrade, ProgramMetricsMap};
use crate::server::error::{query_params, ApiResult};
use crate::server::{open_store, ApiState};

pub async fn list_courses(
    State(state): State<ApiState>,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<Vec<Course>> {
    let filter = CourseFilter::from_query(query_params(query)?)?;
    let store = open_store(&state)?;
    let courses = require_any(store.list_courses(&filter)?, NO_COURSES_FOUND)?;
    Ok(Json(courses))
}

pub async fn enrollment_average_grade(
    State(state): State<ApiState>,
    query: Result<Query<EnrollmentQuery>, QueryRejection>,
) -> ApiResult<AverageGrade> {
    let filter = EnrollmentFilter::from_query(query_params(query)?);
    let store = open_store(&state)?;
    let grades = store.enrollment_grades(&filter)?;
    Ok(Json(average_grade(&grades)?))
}

pub async fn enrollment_metrics_by_program(
    State(state): State<ApiState>,
) -> ApiResult<ProgramMetricsMap> {
    let store = open_store(&state)?;
    let rows = store.program_grades()?;
    Ok(Json(metrics_by_program(&rows)?))
}
