//! HTTP client for the consultation submission endpoint
//!
//! Posts the form payload as JSON and maps the response onto a
//! [`SubmissionReceipt`] or a [`SubmitError`].

use super::payload::{ConsultationPayload, SubmissionReceipt, SubmitAck, SubmitError};
use super::traits::SubmissionClient;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Default submission endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/consultation/quick-submit";

/// Header carrying the client-generated request id
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Submission client backed by `reqwest`
pub struct HttpSubmissionClient {
    http: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    /// Create a client that gives up on a request after `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, payload: &ConsultationPayload) -> Result<SubmissionReceipt, SubmitError> {
        let request_id = Uuid::new_v4();

        let response = self
            .http
            .post(&self.endpoint)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        // The body is informational only; an unreadable body still counts
        let body = response.text().await.unwrap_or_default();
        let ack: Option<SubmitAck> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = ack
                .and_then(|a| a.message)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown error".to_string());
            warn!(%request_id, status = status.as_u16(), "consultation submission rejected");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let ack = ack.unwrap_or_default();
        if ack.success == Some(false) {
            let message = ack
                .message
                .unwrap_or_else(|| "server reported failure".to_string());
            warn!(%request_id, status = status.as_u16(), "consultation submission not accepted");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(ref err) = ack.notification_error {
            warn!(%request_id, error = %err, "submission stored but notifications not forwarded");
        }
        info!(%request_id, status = status.as_u16(), "consultation submission accepted");

        Ok(SubmissionReceipt {
            request_id,
            submitted_at: Utc::now(),
            status: status.as_u16(),
            notifications_forwarded: ack.notifications_forwarded,
            notification_error: ack.notification_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormFields;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::{
        net::TcpListener,
        sync::{oneshot, Mutex},
    };

    type Captured = (Option<String>, Value);

    #[derive(Clone)]
    struct ServerState {
        tx: Arc<Mutex<Option<oneshot::Sender<Captured>>>>,
        status: StatusCode,
        body: Option<Value>,
    }

    async fn handle_submit(
        State(state): State<ServerState>,
        headers: HeaderMap,
        Json(payload): Json<Value>,
    ) -> (StatusCode, String) {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Some(tx) = state.tx.lock().await.take() {
            let _ = tx.send((request_id, payload));
        }
        let body = state.body.map(|b| b.to_string()).unwrap_or_default();
        (state.status, body)
    }

    async fn spawn_server(
        status: StatusCode,
        body: Option<Value>,
    ) -> (String, oneshot::Receiver<Captured>) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let state = ServerState {
            tx: Arc::new(Mutex::new(Some(tx))),
            status,
            body,
        };
        let app = Router::new()
            .route("/api/consultation/quick-submit", post(handle_submit))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (
            format!("http://{addr}/api/consultation/quick-submit"),
            rx,
        )
    }

    fn client(endpoint: &str) -> HttpSubmissionClient {
        HttpSubmissionClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    fn payload() -> ConsultationPayload {
        let mut payload = ConsultationPayload::from_fields(&FormFields::default());
        payload.name = "Kim".to_string();
        payload.phone = "010-1234-5678".to_string();
        payload.privacy_consent = true;
        payload
    }

    #[tokio::test]
    async fn test_posts_payload_with_request_id() {
        let (endpoint, rx) = spawn_server(
            StatusCode::OK,
            Some(json!({"success": true, "notificationsForwarded": true})),
        )
        .await;

        let receipt = client(&endpoint).submit(&payload()).await.unwrap();
        let (request_id, body) = rx.await.unwrap();

        assert_eq!(request_id, Some(receipt.request_id.to_string()));
        assert_eq!(body["name"], "Kim");
        assert_eq!(body["phone"], "010-1234-5678");
        assert_eq!(body["privacyConsent"], true);
        assert_eq!(receipt.status, 200);
        assert!(receipt.notifications_forwarded);
    }

    #[tokio::test]
    async fn test_accepted_with_notification_issue() {
        let (endpoint, _rx) = spawn_server(
            StatusCode::ACCEPTED,
            Some(json!({"success": true, "notificationsForwarded": false, "notificationError": "no webhook"})),
        )
        .await;

        let receipt = client(&endpoint).submit(&payload()).await.unwrap();
        assert_eq!(receipt.status, 202);
        assert_eq!(receipt.notification_error.as_deref(), Some("no webhook"));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_accepted() {
        let (endpoint, _rx) = spawn_server(StatusCode::OK, None).await;
        let receipt = client(&endpoint).submit(&payload()).await.unwrap();
        assert_eq!(receipt.status, 200);
        assert!(!receipt.notifications_forwarded);
    }

    #[tokio::test]
    async fn test_rejection_uses_server_message() {
        let (endpoint, _rx) = spawn_server(
            StatusCode::BAD_REQUEST,
            Some(json!({"message": "입력값을 다시 확인해 주세요.", "errors": {"name": "이 필드는 필수입니다."}})),
        )
        .await;

        let err = client(&endpoint).submit(&payload()).await.unwrap_err();
        match err {
            SubmitError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "입력값을 다시 확인해 주세요.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let (endpoint, _rx) = spawn_server(StatusCode::INTERNAL_SERVER_ERROR, None).await;
        let err = client(&endpoint).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_success_false_in_body_is_rejected() {
        let (endpoint, _rx) = spawn_server(
            StatusCode::OK,
            Some(json!({"success": false, "message": "중복 신청"})),
        )
        .await;
        let err = client(&endpoint).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/submit"))
            .submit(&payload())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
