//! Shared fakes for router integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use shop_api::AppState;
use shop_api::config::ApiConfig;
use shop_core::catalog::{Catalog, ProductRecord};
use shop_core::checkout::{
    CheckoutGateway, CheckoutProfile, CheckoutSession, SessionError, SessionRequest,
};
use shop_core::completion::{CompletionError, CompletionGateway};
use shop_core::conversation::ConversationMessage;

/// What the fake completion service answers.
pub enum CompletionReply {
    Text(&'static str),
    Upstream(u16, serde_json::Value),
    MissingCredential,
    Transport(&'static str),
}

/// Completion fake recording every message list it receives.
pub struct FakeCompletion {
    reply: CompletionReply,
    pub calls: Mutex<Vec<Vec<ConversationMessage>>>,
}

impl FakeCompletion {
    pub fn new(reply: CompletionReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Vec<ConversationMessage> {
        self.calls.lock().unwrap().last().cloned().expect("no calls")
    }
}

#[async_trait]
impl CompletionGateway for FakeCompletion {
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<String, CompletionError> {
        if matches!(self.reply, CompletionReply::MissingCredential) {
            return Err(CompletionError::MissingCredential);
        }
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.reply {
            CompletionReply::Text(t) => Ok(t.to_string()),
            CompletionReply::Upstream(status, error) => Err(CompletionError::Upstream {
                status: *status,
                error: error.clone(),
            }),
            CompletionReply::Transport(m) => Err(CompletionError::Transport(m.to_string())),
            CompletionReply::MissingCredential => unreachable!(),
        }
    }
}

/// Checkout fake returning a fixed URL or failing.
pub struct FakeCheckout {
    fail: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<SessionRequest>>,
}

impl FakeCheckout {
    pub fn ok() -> Arc<Self> {
        Self::new(false)
    }

    pub fn failing() -> Arc<Self> {
        Self::new(true)
    }

    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckoutGateway for FakeCheckout {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<CheckoutSession, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.fail {
            return Err(SessionError::Upstream {
                status: 402,
                body: r#"{"error":{"code":"card_declined"}}"#.into(),
            });
        }
        Ok(CheckoutSession {
            url: "https://checkout.stripe.com/c/pay/cs_test_fake".into(),
        })
    }
}

pub fn swim_catalog() -> Catalog {
    Catalog::from_records(vec![
        ProductRecord::new("Czepek silikonowy", 19.99),
        ProductRecord::new("Okulary pływackie Pro", 49.99)
            .with_short_description("Szczelne okulary do pływania na basen"),
    ])
}

pub fn state(
    catalog: Catalog,
    completion: Arc<FakeCompletion>,
    checkout: Arc<FakeCheckout>,
    profile: CheckoutProfile,
) -> AppState {
    AppState {
        config: ApiConfig {
            public_origin: "https://sklep.example".into(),
            ..ApiConfig::default()
        },
        catalog: Arc::new(catalog),
        completion,
        checkout,
        checkout_profile: Arc::new(profile),
    }
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("parse JSON")
}
