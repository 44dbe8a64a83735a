//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use shop_core::checkout::{CheckoutError, SessionError};
use shop_core::completion::CompletionError;
use shop_core::prompt::PromptError;

use crate::models::{CheckoutErrorResponse, ErrorDetail, ErrorResponse};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

const MISSING_API_KEY: &str = "Klucz API nie jest skonfigurowany na serwerze.";
const UNKNOWN_FAILURE: &str = "Wystąpił nieznany błąd serwera.";
const INVALID_PRICE: &str = "Nie podano prawidłowej ceny.";
const INVALID_ORDER: &str = "Nieprawidłowy format zamówienia.";
const SESSION_FAILURE: &str = "Błąd serwera podczas tworzenia sesji płatności.";

/// Chat endpoint errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream failure; status and `error` payload are relayed as received.
    #[error("Upstream error {status}")]
    Upstream {
        status: StatusCode,
        error: serde_json::Value,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Configuration(m) => {
                error!("chat configuration error: {m}");
                (StatusCode::INTERNAL_SERVER_ERROR, m)
            }
            AppError::Upstream { status, error } => {
                return (status, Json(serde_json::json!({ "error": error }))).into_response();
            }
            AppError::Transport(m) => {
                error!("chat request failed: {m}");
                let message = if m.is_empty() {
                    UNKNOWN_FAILURE.to_string()
                } else {
                    m
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        let body = Json(ErrorResponse {
            error: ErrorDetail { message },
        });
        (status, body).into_response()
    }
}

impl From<PromptError> for AppError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::EmptyHistory => {
                AppError::InvalidRequest("Pusta 'conversationHistory' w zapytaniu.".into())
            }
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::MissingCredential => AppError::Configuration(MISSING_API_KEY.into()),
            CompletionError::Upstream { status, error } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                error,
            },
            CompletionError::Transport(m) => AppError::Transport(m),
        }
    }
}

/// Checkout endpoint errors. Bodies are flat `{"error": "..."}` and session
/// failures never expose upstream detail.
#[derive(Debug, Error)]
pub enum CheckoutRejection {
    #[error("Invalid price")]
    InvalidPrice,

    #[error("Invalid order body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<CheckoutError> for CheckoutRejection {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::InvalidPrice => CheckoutRejection::InvalidPrice,
        }
    }
}

impl IntoResponse for CheckoutRejection {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CheckoutRejection::InvalidPrice => (StatusCode::BAD_REQUEST, INVALID_PRICE),
            CheckoutRejection::InvalidBody(detail) => {
                warn!("rejected checkout order body: {detail}");
                (StatusCode::BAD_REQUEST, INVALID_ORDER)
            }
            CheckoutRejection::Session(e) => {
                error!("checkout session failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, SESSION_FAILURE)
            }
        };
        (status, Json(CheckoutErrorResponse { error: message })).into_response()
    }
}
