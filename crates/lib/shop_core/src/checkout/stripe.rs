//! Stripe Checkout Sessions gateway.
//!
//! Sessions are created with a single form-encoded
//! `POST {api_base}/checkout/sessions` using Stripe's bracketed parameter
//! names (`line_items[0][price_data][currency]=pln`, ...).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::{CheckoutGateway, CheckoutSession, SessionError, SessionRequest, StripeSettings};

#[derive(Deserialize)]
struct StripeSession {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// [`CheckoutGateway`] backed by the Stripe REST API.
#[derive(Debug, Clone)]
pub struct StripeCheckout {
    client: Client,
    settings: StripeSettings,
}

impl StripeCheckout {
    pub fn new(settings: StripeSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: StripeSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/checkout/sessions",
            self.settings.api_base.trim_end_matches('/')
        )
    }
}

/// Flattens a session request into Stripe form parameters.
pub fn form_params(request: &SessionRequest) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    let mut push = |key: String, value: String| params.push((key, value));

    push("mode".into(), "payment".into());
    for (i, method) in request.payment_method_types.iter().enumerate() {
        push(format!("payment_method_types[{i}]"), method.clone());
    }

    let item = "line_items[0]";
    push(format!("{item}[quantity]"), "1".into());
    push(
        format!("{item}[price_data][currency]"),
        request.currency.clone(),
    );
    push(
        format!("{item}[price_data][unit_amount]"),
        request.amount_minor.to_string(),
    );
    push(
        format!("{item}[price_data][product_data][name]"),
        request.product_name.clone(),
    );
    if let Some(description) = &request.description {
        push(
            format!("{item}[price_data][product_data][description]"),
            description.clone(),
        );
    }

    for (i, country) in request.shipping_countries.iter().enumerate() {
        push(
            format!("shipping_address_collection[allowed_countries][{i}]"),
            country.clone(),
        );
    }

    for (i, option) in request.shipping_options.iter().enumerate() {
        let rate = format!("shipping_options[{i}][shipping_rate_data]");
        push(format!("{rate}[type]"), "fixed_amount".into());
        push(
            format!("{rate}[fixed_amount][amount]"),
            option.amount_minor.to_string(),
        );
        push(
            format!("{rate}[fixed_amount][currency]"),
            request.currency.clone(),
        );
        push(format!("{rate}[display_name]"), option.display_name.clone());
        for (bound, days) in [
            ("minimum", option.min_business_days),
            ("maximum", option.max_business_days),
        ] {
            push(
                format!("{rate}[delivery_estimate][{bound}][unit]"),
                "business_day".into(),
            );
            push(
                format!("{rate}[delivery_estimate][{bound}][value]"),
                days.to_string(),
            );
        }
    }

    if request.collect_phone {
        push("phone_number_collection[enabled]".into(), "true".into());
    }

    for (i, field) in request.custom_fields.iter().enumerate() {
        let prefix = format!("custom_fields[{i}]");
        push(format!("{prefix}[key]"), field.key.clone());
        push(format!("{prefix}[type]"), "text".into());
        push(format!("{prefix}[label][type]"), "custom".into());
        push(format!("{prefix}[label][custom]"), field.label.clone());
        push(format!("{prefix}[optional]"), field.optional.to_string());
    }

    push("success_url".into(), request.success_url.clone());
    push("cancel_url".into(), request.cancel_url.clone());

    params
}

#[async_trait]
impl CheckoutGateway for StripeCheckout {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<CheckoutSession, SessionError> {
        let secret_key = self
            .settings
            .secret_key
            .as_deref()
            .ok_or(SessionError::MissingCredential)?;

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(secret_key)
            .form(&form_params(request))
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            error!(status = status.as_u16(), body = %body, "payment service error");
            return Err(SessionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let session: StripeSession = resp
            .json()
            .await
            .map_err(|e| SessionError::Transport(format!("Invalid session response: {e}")))?;

        debug!(session_id = ?session.id, "checkout session created");

        session
            .url
            .map(|url| CheckoutSession { url })
            .ok_or_else(|| SessionError::Transport("Session response has no url".into()))
    }
}
