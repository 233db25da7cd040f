use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::RecordsError;
use crate::records::RecordId;

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RecordsError> for ApiError {
    fn from(value: RecordsError) -> Self {
        match value {
            RecordsError::Validation(_) | RecordsError::InvalidParameter { .. } => {
                Self::bad_request(value.to_string())
            }
            RecordsError::NotFound(message) => Self::not_found(message),
            RecordsError::Store(_) | RecordsError::Io(_) => Self::internal(value),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "request failed: {}", self.message);
        } else {
            debug!(status = %self.status, "request rejected: {}", self.message);
        }
        let body = Json(ApiErrorBody {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

pub fn json_body<T>(
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> std::result::Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub fn record_id(
    path: std::result::Result<Path<RecordId>, PathRejection>,
) -> std::result::Result<RecordId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub fn query_params<T>(
    query: std::result::Result<Query<T>, QueryRejection>,
) -> std::result::Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}
