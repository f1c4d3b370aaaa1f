//! Application error taxonomy and its HTTP mapping.
//!
//! Client mistakes keep their message; every upstream or internal failure is
//! logged and answered with a generic body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Client errors
    // ---------------------------
    #[error("{0}")]
    Validation(&'static str),

    #[error("Record not found")]
    NotFound,

    // ---------------------------
    // Server errors
    // ---------------------------
    #[error("No Batch/Badge/column found")]
    NoIdColumn,

    #[error("sheet store error: {0}")]
    Store(#[from] StoreError),

    /// The row write landed but a follow-up effect did not
    #[error("row {row} written but {step} failed: {source}")]
    PartialUpdate {
        row: u32,
        step: &'static str,
        source: StoreError,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NoIdColumn | AppError::Store(_) | AppError::PartialUpdate { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the browser
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(_) | AppError::NotFound | AppError::NoIdColumn => {
                self.to_string()
            }
            AppError::Store(_) | AppError::PartialUpdate { .. } => "Server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
