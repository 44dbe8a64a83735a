//! Integration tests — drive `/api/chat` through the router with a fake
//! completion service.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use shop_core::catalog::Catalog;
use shop_core::checkout::CheckoutProfile;
use shop_core::conversation::Role;
use shop_core::prompt::PERSONA_PROMPT;
use tower::ServiceExt;

use common::{CompletionReply, FakeCheckout, FakeCompletion, body_json, state, swim_catalog};

fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn history_body(query: &str) -> String {
    json!({
        "conversationHistory": [
            {"role": "system", "content": "Jesteś gburowatym sprzedawcą."},
            {"role": "user", "content": query}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn reply_is_returned_and_prompt_is_augmented() {
    let completion = FakeCompletion::new(CompletionReply::Text("Polecam Okulary pływackie Pro!"));
    let app = shop_api::router(state(
        swim_catalog(),
        completion.clone(),
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let resp = app
        .oneshot(chat_request(history_body("szukam okularów do pływania")))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["reply"], "Polecam Okulary pływackie Pro!");

    let sent = completion.last_call();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].content, PERSONA_PROMPT);
    assert_eq!(sent[1].role, Role::System);
    assert!(sent[1].content.contains("Okulary pływackie Pro"));
    assert!(sent[1].content.contains("49.99"));
    assert_eq!(sent[2].content, "szukam okularów do pływania");
}

#[tokio::test]
async fn empty_catalog_forwards_history_unchanged_in_length() {
    let completion = FakeCompletion::new(CompletionReply::Text("Czego szukasz?"));
    let app = shop_api::router(state(
        Catalog::empty(),
        completion.clone(),
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let resp = app
        .oneshot(chat_request(history_body("szukam okularów do pływania")))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(completion.last_call().len(), 2);
}

#[tokio::test]
async fn string_encoded_body_without_json_content_type_is_accepted() {
    let completion = FakeCompletion::new(CompletionReply::Text("ok"));
    let app = shop_api::router(state(
        swim_catalog(),
        completion.clone(),
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let encoded = serde_json::to_string(&history_body("czepek")).unwrap();
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(encoded))
        .unwrap();

    let resp = app.oneshot(req).await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(completion.last_call()[1].content.contains("Czepek silikonowy"));
}

#[tokio::test]
async fn malformed_and_missing_history_are_400() {
    for body in ["{oops", r#"{"messages": []}"#, r#"{"conversationHistory": []}"#] {
        let completion = FakeCompletion::new(CompletionReply::Text("unused"));
        let app = shop_api::router(state(
            swim_catalog(),
            completion.clone(),
            FakeCheckout::ok(),
            CheckoutProfile::glass_pane(),
        ));

        let resp = app.oneshot(chat_request(body)).await.expect("request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {body}");
        let json = body_json(resp).await;
        assert!(json["error"]["message"].is_string(), "body {body}");
        assert_eq!(completion.call_count(), 0);
    }
}

#[tokio::test]
async fn missing_api_key_is_500_before_any_upstream_call() {
    let completion = FakeCompletion::new(CompletionReply::MissingCredential);
    let app = shop_api::router(state(
        swim_catalog(),
        completion.clone(),
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let resp = app
        .oneshot(chat_request(history_body("hej")))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(
        json["error"]["message"],
        "Klucz API nie jest skonfigurowany na serwerze."
    );
    assert_eq!(completion.call_count(), 0);
}

#[tokio::test]
async fn upstream_error_status_and_payload_are_relayed() {
    let upstream = json!({"message": "Incorrect API key provided", "code": "invalid_api_key"});
    let completion = FakeCompletion::new(CompletionReply::Upstream(401, upstream.clone()));
    let app = shop_api::router(state(
        swim_catalog(),
        completion,
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let resp = app
        .oneshot(chat_request(history_body("hej")))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await, json!({ "error": upstream }));
}

#[tokio::test]
async fn transport_failure_is_500_with_cause() {
    let completion = FakeCompletion::new(CompletionReply::Transport("connection refused"));
    let app = shop_api::router(state(
        swim_catalog(),
        completion,
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let resp = app
        .oneshot(chat_request(history_body("hej")))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await["error"]["message"],
        "connection refused"
    );
}

#[tokio::test]
async fn get_is_405_with_allow_header() {
    let app = shop_api::router(state(
        swim_catalog(),
        FakeCompletion::new(CompletionReply::Text("unused")),
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let req = Request::builder()
        .method("GET")
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()[header::ALLOW], "POST");
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let app = shop_api::router(state(
        swim_catalog(),
        FakeCompletion::new(CompletionReply::Text("unused")),
        FakeCheckout::ok(),
        CheckoutProfile::glass_pane(),
    ));

    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["catalogProducts"], 2);
    assert!(json["version"].is_string());
}
