use crate::dtos::MessageResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use thiserror::Error;

/// Failure of a `/products` route, rendered as `{"message": ...}`.
///
/// Listing failures answer 500 while every write failure answers 400,
/// including faults that originate in the database.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProductApiError {
    status: StatusCode,
    message: String,
}

impl ProductApiError {
    pub fn read(err: AppError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.message(),
        }
    }

    pub fn write(err: AppError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.message(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ProductApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}
