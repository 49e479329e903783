use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("The Company with Id '{company_id}' was not found")]
    CompanyNotFound { company_id: u64 },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // The company vanished between lookup and write.
            StoreError::RowMissing {
                table: "companies",
                id,
            } => AppError::CompanyNotFound { company_id: id },
            err => AppError::Store(err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::CompanyNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::CompanyNotFound { .. } => HttpResponse::NotFound().json(json!({
                "message": self.to_string()
            })),
            AppError::Store(e) => {
                error!(error = %e, "Database operation failed");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal Server Error"
                }))
            }
        }
    }
}
