use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::errors::LedgerError;

#[derive(Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Restrict the balance to transactions of this group.
    pub group_id: Option<Uuid>,
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LedgerError::UserNotFound(_)
            | LedgerError::GroupNotFound(_)
            | LedgerError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::NotGroupMember(_) => StatusCode::FORBIDDEN,
            LedgerError::InvalidParticipant(_) | LedgerError::InvalidInput(..) => StatusCode::BAD_REQUEST,
            LedgerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LedgerError::AmountOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::StorageError(_) | LedgerError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match &self.0 {
            LedgerError::InvalidInput(field, detail) => {
                format!("Invalid input for {}: {}", field, detail.description)
            }
            LedgerError::StorageError(msg) | LedgerError::InternalServerError(msg) => {
                tracing::error!("Request failed: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
