//! Request and response bodies.

use serde::Serialize;

/// `200` body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `200` body of `POST /api/create-checkout-session`.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// `200` body of `GET /api/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog_products: usize,
}

/// Structured error body: `{"error": {"message": "..."}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Flat error body used by the checkout page: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct CheckoutErrorResponse {
    pub error: &'static str,
}
