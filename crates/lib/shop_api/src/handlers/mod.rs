//! Request handlers.

pub mod chat;
pub mod checkout;
pub mod health;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Fallback for any method other than `POST` on the POST-only endpoints.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
        .into_response()
}
