//! Error types for spendweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use spendweb_core::{CoreError, ErrorDetails};
use thiserror::Error;

/// Error returned by the JSON endpoints
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::NotLoggedIn => StatusCode::UNAUTHORIZED,
                CoreError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::InvalidTransition { .. }
                | CoreError::WorkflowBusy
                | CoreError::NoPendingDecision
                | CoreError::DuplicateEntry { .. } => StatusCode::CONFLICT,
                CoreError::ProviderError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(e) => e.to_details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("API error: {}", self);
        } else {
            log::debug!("API error: {}", self);
        }
        (status, axum::Json(self.to_details())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use spendweb_core::{ErrorCode, ExpenseStatus};

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(CoreError::NotLoggedIn).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(CoreError::RecordNotFound { id: "EXP-1".to_string() }).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::InvalidTransition {
                id: "EXP-1".to_string(),
                status: ExpenseStatus::Approved,
            })
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(CoreError::ValidationError { message: "x".to_string() }).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_details_keep_core_code() {
        let details = ApiError::from(CoreError::RecordNotFound { id: "EXP-9".to_string() }).to_details();
        assert_eq!(details.code, ErrorCode::RecordNotFound);
        assert_eq!(ApiError::from(CoreError::NotLoggedIn).to_details().code, ErrorCode::NotLoggedIn);
        assert_eq!(
            ApiError::from(CoreError::ProviderError { message: "down".to_string() }).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
