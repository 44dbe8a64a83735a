//! # shop_api
//!
//! HTTP API for the storefront: the shopping-assistant chat endpoint and the
//! checkout-session endpoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use shop_core::catalog::Catalog;
use shop_core::checkout::{CheckoutGateway, CheckoutProfile, ProfileError, StripeCheckout};
use shop_core::completion::{CompletionGateway, OpenAiCompletion};

use crate::config::ApiConfig;
use crate::handlers::{chat, checkout, health, method_not_allowed};

/// Shared application state passed to all handlers. Everything in it is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Product catalog used for retrieval.
    pub catalog: Arc<Catalog>,
    /// Language model gateway.
    pub completion: Arc<dyn CompletionGateway>,
    /// Payment provider gateway.
    pub checkout: Arc<dyn CheckoutGateway>,
    /// Active checkout profile.
    pub checkout_profile: Arc<CheckoutProfile>,
}

impl AppState {
    /// Builds production state: loads the catalog (empty on failure),
    /// resolves the checkout profile and creates the HTTP gateways.
    pub fn from_config(config: ApiConfig) -> Result<Self, ProfileError> {
        let catalog = Catalog::load_or_empty(&config.catalog_path);
        let checkout_profile = CheckoutProfile::resolve(&config.checkout_profile)?;
        let completion = OpenAiCompletion::new(config.completion.clone());
        let checkout = StripeCheckout::new(config.stripe.clone());

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            completion: Arc::new(completion),
            checkout: Arc::new(checkout),
            checkout_profile: Arc::new(checkout_profile),
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            routes::POST_API_CHAT,
            post(chat::chat_handler).fallback(method_not_allowed),
        )
        .route(
            routes::POST_API_CREATE_CHECKOUT_SESSION,
            post(checkout::create_checkout_session_handler).fallback(method_not_allowed),
        )
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
