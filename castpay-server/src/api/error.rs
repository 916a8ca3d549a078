//! Error type shared by every API handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use castpay_core::ledger::LedgerError;
use castpay_core::providers::ProviderError;
use castpay_sdk::objects::ErrorResponse;
use thiserror::Error;

/// A request parameter is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur in API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(&'static str),

    /// The stored data violates an integrity rule; nothing was changed.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("{0}")]
    Internal(String),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound => ApiError::NotFound("transaction not found"),
            conflict @ LedgerError::Conflict { .. } => ApiError::Conflict(conflict.to_string()),
            LedgerError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => error_body(StatusCode::BAD_REQUEST, e.0),
            ApiError::NotFound(what) => error_body(StatusCode::NOT_FOUND, what),
            ApiError::Conflict(message) => {
                tracing::warn!(%message, "Refusing conflicting update");
                error_body(StatusCode::BAD_REQUEST, message)
            }
            ApiError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream provider error");
                let status = match &e {
                    ProviderError::Api { status, .. }
                        if status.is_client_error() || status.is_server_error() =>
                    {
                        StatusCode::from_u16(status.as_u16())
                            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                error_body(status, "upstream provider error")
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |e: ApiError| e.into_response().status();
        assert_eq!(
            status(ValidationError::new("amount is required").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(LedgerError::NotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status(
                LedgerError::Conflict {
                    tx_hash: "0x1".to_string(),
                    count: 2
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                ProviderError::Api {
                    status: reqwest_status(404),
                    body: String::new()
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(
                ProviderError::Rejected {
                    message: "nope".to_string()
                }
                .into()
            ),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    fn reqwest_status(code: u16) -> castpay_core::providers::StatusCode {
        castpay_core::providers::StatusCode::from_u16(code).unwrap()
    }
}
