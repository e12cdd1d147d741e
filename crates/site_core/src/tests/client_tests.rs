use std::sync::Arc;

use anyhow::Result;
use axum::{http::StatusCode, routing::post, Json, Router};
use shared::domain::SubmissionId;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use super::*;
use crate::form::{ContactForm, FormStatus, NETWORK_ERROR_MESSAGE};

type Captured = Arc<Mutex<Option<oneshot::Sender<(Option<String>, ContactPayload)>>>>;

async fn spawn_contact_server(
    status: StatusCode,
    body: serde_json::Value,
) -> Result<(Url, oneshot::Receiver<(Option<String>, ContactPayload)>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let captured: Captured = Arc::new(Mutex::new(Some(tx)));

    let app = Router::new().route(
        "/api/submit-contact",
        post(
            move |headers: axum::http::HeaderMap, Json(payload): Json<ContactPayload>| {
                let captured = Arc::clone(&captured);
                let body = body.clone();
                async move {
                    let content_type = headers
                        .get(axum::http::header::CONTENT_TYPE)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string);
                    if let Some(tx) = captured.lock().await.take() {
                        let _ = tx.send((content_type, payload));
                    }
                    (status, Json(body))
                }
            },
        ),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}/api/submit-contact"))?, rx))
}

fn payload() -> ContactPayload {
    ContactPayload {
        name: "Ravi".into(),
        email: "ravi@example.com".into(),
        service: "Other".into(),
        message: "Need a new practice website".into(),
    }
}

#[tokio::test]
async fn posts_json_payload_and_reads_success() {
    let (endpoint, captured) = spawn_contact_server(
        StatusCode::CREATED,
        serde_json::json!({ "success": true, "message": "ok", "id": 3 }),
    )
    .await
    .expect("spawn server");

    let transport = HttpContactTransport::new(endpoint);
    let response = transport.submit(&payload()).await.expect("submit");
    assert!(response.success);
    assert_eq!(response.id, Some(SubmissionId(3)));

    let (content_type, received) = captured.await.expect("captured");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(received, payload());
}

#[tokio::test]
async fn error_status_body_is_still_parsed() {
    let (endpoint, _captured) = spawn_contact_server(
        StatusCode::BAD_REQUEST,
        serde_json::json!({ "success": false, "error": "Invalid email format" }),
    )
    .await
    .expect("spawn server");

    let form = ContactForm::new(Arc::new(HttpContactTransport::new(endpoint)));
    form.fill(payload()).await.expect("fill");
    assert_eq!(form.submit().await, Ok(FormStatus::Error));
    assert_eq!(
        form.snapshot().await.error_message.as_deref(),
        Some("Invalid email format")
    );
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/api/submit-contact", post(|| async { "<html>oops</html>" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let endpoint = Url::parse(&format!("http://{addr}/api/submit-contact")).expect("url");
    let err = HttpContactTransport::new(endpoint)
        .submit(&payload())
        .await
        .expect_err("decode");
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let endpoint = Url::parse(&format!("http://{addr}/api/submit-contact")).expect("url");
    let form = ContactForm::new(Arc::new(HttpContactTransport::new(endpoint)));
    form.fill(payload()).await.expect("fill");
    assert_eq!(form.submit().await, Ok(FormStatus::Error));
    assert_eq!(
        form.snapshot().await.error_message.as_deref(),
        Some(NETWORK_ERROR_MESSAGE)
    );
}
