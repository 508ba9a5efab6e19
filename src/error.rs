use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid ingredient ID")]
    InvalidId,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Name is required")]
    NameRequired,
    #[error("Ingredient not found")]
    NotFound,
    #[error("{action}")]
    Storage {
        action: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a storage failure. `action` is the only text the client sees;
    /// `StoreError::NotFound` still surfaces as a 404.
    pub fn storage(action: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound => AppError::NotFound,
            source => AppError::Storage { action, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId | AppError::InvalidBody | AppError::NameRequired => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if let AppError::Storage { action, source } = &self {
            tracing::error!(error = %source, "{action}");
        }
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        for err in [AppError::InvalidId, AppError::InvalidBody, AppError::NameRequired] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_storage_not_found_becomes_404() {
        let err = AppError::storage("Failed to delete ingredient", StoreError::NotFound);
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_failure_hides_database_detail() {
        let err = AppError::storage(
            "Failed to create ingredient",
            StoreError::Database(sqlx::Error::PoolTimedOut),
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to create ingredient");
    }
}
