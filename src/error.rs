//! Sale store errors and their HTTP mapping.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::sale::{ErrorResponse, MessageResponse};

/// The store operation a storage failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOperation {
    Create,
    List,
    Delete,
    DeleteAll,
}

impl SaleOperation {
    /// Client-facing message for a failure of this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            SaleOperation::Create => "Failed to add sale",
            SaleOperation::List => "Failed to retrieve sales",
            SaleOperation::Delete => "Failed to delete sale",
            SaleOperation::DeleteAll => "Failed to delete all sales",
        }
    }
}

impl fmt::Display for SaleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaleOperation::Create => "create_sale",
            SaleOperation::List => "list_sales",
            SaleOperation::Delete => "delete_sale",
            SaleOperation::DeleteAll => "delete_all_sales",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SaleError {
    /// Required field missing or body not decodable.
    #[error("invalid sale payload: {0}")]
    Validation(String),

    #[error("transaction ID already exists")]
    Duplicate,

    #[error("transaction not found")]
    NotFound,

    #[error("storage error in {operation}: {source}")]
    Storage {
        operation: SaleOperation,
        #[source]
        source: DbErr,
    },
}

impl SaleError {
    pub fn storage(operation: SaleOperation) -> impl FnOnce(DbErr) -> SaleError {
        move |source| SaleError::Storage { operation, source }
    }

    /// Maps an insert failure, turning a unique violation into `Duplicate`.
    pub fn from_insert(source: DbErr) -> SaleError {
        match source.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => SaleError::Duplicate,
            _ => SaleError::Storage {
                operation: SaleOperation::Create,
                source,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SaleError::Validation(_) => StatusCode::BAD_REQUEST,
            SaleError::Duplicate => StatusCode::CONFLICT,
            SaleError::NotFound => StatusCode::NOT_FOUND,
            SaleError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SaleError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            SaleError::Validation(detail) => {
                tracing::debug!(detail = %detail, "Rejected sale payload");
                (
                    status,
                    Json(ErrorResponse {
                        error: "Missing required fields".to_string(),
                    }),
                )
                    .into_response()
            }
            SaleError::Duplicate => (
                status,
                Json(ErrorResponse {
                    error: "Transaction ID already exists".to_string(),
                }),
            )
                .into_response(),
            SaleError::NotFound => {
                (status, Json(MessageResponse::new("Transaction not found"))).into_response()
            }
            SaleError::Storage { operation, source } => {
                // Driver detail stays in the log
                tracing::error!(operation = %operation, error = %source, "Database error");
                (
                    status,
                    Json(ErrorResponse {
                        error: operation.failure_message().to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
