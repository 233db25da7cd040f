//! Generic CRUD handlers shared by the four record resources.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::filters::CourseFilter;
use crate::records::{
    Course, CoursePatch, Enrollment, EnrollmentPatch, NewCourse, NewEnrollment, NewProgram,
    NewStudent, ProgramPatch, RecordId, Student, StudentPatch, UndergraduateProgram,
};
use crate::server::error::{json_body, record_id, ApiError, ApiResult};
use crate::server::{open_store, ApiState};
use crate::store::RecordStore;

pub trait Resource: Send + Sync + 'static {
    type Record: Serialize + Send + 'static;
    type New: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + From<Self::New> + Send + 'static;

    fn list(store: &RecordStore) -> Result<Vec<Self::Record>>;
    fn get(store: &RecordStore, id: RecordId) -> Result<Self::Record>;
    fn create(store: &RecordStore, input: &Self::New) -> Result<Self::Record>;
    fn update(store: &RecordStore, id: RecordId, patch: Self::Patch) -> Result<Self::Record>;
    fn delete(store: &RecordStore, id: RecordId) -> Result<()>;
}

pub struct Students;
pub struct Programs;
pub struct Courses;
pub struct Enrollments;

impl Resource for Students {
    type Record = Student;
    type New = NewStudent;
    type Patch = StudentPatch;

    fn list(store: &RecordStore) -> Result<Vec<Student>> {
        store.list_students()
    }

    fn get(store: &RecordStore, id: RecordId) -> Result<Student> {
        store.get_student(id)
    }

    fn create(store: &RecordStore, input: &NewStudent) -> Result<Student> {
        store.create_student(input)
    }

    fn update(store: &RecordStore, id: RecordId, patch: StudentPatch) -> Result<Student> {
        store.update_student(id, patch)
    }

    fn delete(store: &RecordStore, id: RecordId) -> Result<()> {
        store.delete_student(id)
    }
}

impl Resource for Programs {
    type Record = UndergraduateProgram;
    type New = NewProgram;
    type Patch = ProgramPatch;

    fn list(store: &RecordStore) -> Result<Vec<UndergraduateProgram>> {
        store.list_programs()
    }

    fn get(store: &RecordStore, id: RecordId) -> Result<UndergraduateProgram> {
        store.get_program(id)
    }

    fn create(store: &RecordStore, input: &NewProgram) -> Result<UndergraduateProgram> {
        store.create_program(input)
    }

    fn update(
        store: &RecordStore,
        id: RecordId,
        patch: ProgramPatch,
    ) -> Result<UndergraduateProgram> {
        store.update_program(id, patch)
    }

    fn delete(store: &RecordStore, id: RecordId) -> Result<()> {
        store.delete_program(id)
    }
}

impl Resource for Courses {
    type Record = Course;
    type New = NewCourse;
    type Patch = CoursePatch;

    fn list(store: &RecordStore) -> Result<Vec<Course>> {
        store.list_courses(&CourseFilter::default())
    }

    fn get(store: &RecordStore, id: RecordId) -> Result<Course> {
        store.get_course(id)
    }

    fn create(store: &RecordStore, input: &NewCourse) -> Result<Course> {
        store.create_course(input)
    }

    fn update(store: &RecordStore, id: RecordId, patch: CoursePatch) -> Result<Course> {
        store.update_course(id, patch)
    }

    fn delete(store: &RecordStore, id: RecordId) -> Result<()> {
        store.delete_course(id)
    }
}

impl Resource for Enrollments {
    type Record = Enrollment;
    type New = NewEnrollment;
    type Patch = EnrollmentPatch;

    fn list(store: &RecordStore) -> Result<Vec<Enrollment>> {
        store.list_enrollments()
    }

    fn get(store: &RecordStore, id: RecordId) -> Result<Enrollment> {
        store.get_enrollment(id)
    }

    fn create(store: &RecordStore, input: &NewEnrollment) -> Result<Enrollment> {
        store.create_enrollment(input)
    }

    fn update(store: &RecordStore, id: RecordId, patch: EnrollmentPatch) -> Result<Enrollment> {
        store.update_enrollment(id, patch)
    }

    fn delete(store: &RecordStore, id: RecordId) -> Result<()> {
        store.delete_enrollment(id)
    }
}

/// Collection and item routes for `R`; the collection GET is left to the caller
/// when `with_list` is false.
pub fn resource_routes<R: Resource>(
    router: Router<ApiState>,
    path: &str,
    with_list: bool,
) -> Router<ApiState> {
    let collection = if with_list {
        get(list_records::<R>).post(create_record::<R>)
    } else {
        axum::routing::post(create_record::<R>)
    };
    router.route(path, collection).route(
        &format!("{path}/:id"),
        get(get_record::<R>)
            .put(replace_record::<R>)
            .patch(patch_record::<R>)
            .delete(delete_record::<R>),
    )
}

async fn list_records<R: Resource>(State(state): State<ApiState>) -> ApiResult<Vec<R::Record>> {
    let store = open_store(&state)?;
    Ok(Json(R::list(&store)?))
}

async fn create_record<R: Resource>(
    State(state): State<ApiState>,
    payload: std::result::Result<Json<R::New>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<R::Record>), ApiError> {
    let input = json_body(payload)?;
    let store = open_store(&state)?;
    let record = R::create(&store, &input)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_record<R: Resource>(
    State(state): State<ApiState>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
) -> ApiResult<R::Record> {
    let id = record_id(path)?;
    let store = open_store(&state)?;
    Ok(Json(R::get(&store, id)?))
}

async fn replace_record<R: Resource>(
    State(state): State<ApiState>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
    payload: std::result::Result<Json<R::New>, JsonRejection>,
) -> ApiResult<R::Record> {
    let id = record_id(path)?;
    let input = json_body(payload)?;
    let store = open_store(&state)?;
    Ok(Json(R::update(&store, id, input.into())?))
}

async fn patch_record<R: Resource>(
    State(state): State<ApiState>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
    payload: std::result::Result<Json<R::Patch>, JsonRejection>,
) -> ApiResult<R::Record> {
    let id = record_id(path)?;
    let patch = json_body(payload)?;
    let store = open_store(&state)?;
    Ok(Json(R::update(&store, id, patch)?))
}

async fn delete_record<R: Resource>(
    State(state): State<ApiState>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
) -> std::result::Result<StatusCode, ApiError> {
    let id = record_id(path)?;
    let store = open_store(&state)?;
    R::delete(&store, id)?;
    Ok(StatusCode::NO_CONTENT)
}
