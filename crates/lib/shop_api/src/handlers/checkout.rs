//! Checkout session handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use tracing::info;
use url::Url;

use shop_core::checkout::{CheckoutOrder, prepare_session};

use crate::AppState;
use crate::error::CheckoutRejection;
use crate::models::CheckoutResponse;

/// `POST /api/create-checkout-session` — validate the order and open a hosted
/// payment page for it.
pub async fn create_checkout_session_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, CheckoutRejection> {
    let order: CheckoutOrder = if body.is_empty() {
        CheckoutOrder::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| CheckoutRejection::InvalidBody(e.to_string()))?
    };

    let origin = request_origin(&headers, &state.config.public_origin);
    let request = prepare_session(&order, &state.checkout_profile, &origin)?;
    let session = state.checkout.create_session(&request).await?;

    info!(amount_minor = request.amount_minor, "checkout session created");
    Ok(Json(CheckoutResponse { url: session.url }))
}

/// Origin of the calling storefront page, or `fallback` when the header is
/// missing or not a usable URL.
fn request_origin(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Url::parse(v).ok())
        .map(|url| url.origin().ascii_serialization())
        .filter(|origin| origin != "null")
        .unwrap_or_else(|| fallback.trim_end_matches('/').to_string())
}
