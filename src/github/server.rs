use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;

use crate::github::process::EventSender;
use crate::github::webhook::{GitHubWebhook, WebhookSecret};

/// Shared server state for all axum handlers.
pub struct ServerState {
    event_queue: EventSender,
    webhook_secret: WebhookSecret,
}

impl ServerState {
    pub fn new(event_queue: EventSender, webhook_secret: WebhookSecret) -> Self {
        Self {
            event_queue,
            webhook_secret,
        }
    }

    pub fn get_webhook_secret(&self) -> &WebhookSecret {
        &self.webhook_secret
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/github", post(github_webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(Arc::new(state))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Axum handler that receives a webhook and sends it to a webhook channel.
pub async fn github_webhook_handler(
    State(state): State<ServerStateRef>,
    GitHubWebhook(event): GitHubWebhook,
) -> impl IntoResponse {
    match state.event_queue.send(event).await {
        Ok(_) => (StatusCode::OK, ""),
        Err(err) => {
            tracing::error!("Could not send webhook event: {err:?}");
            (StatusCode::INTERNAL_SERVER_ERROR, "")
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use crate::bot::event::BotEvent;
    use crate::github::server::{create_app, ServerState};
    use crate::github::WebhookSecret;
    use crate::tests::io::load_webhook_payload;
    use crate::tests::webhook::{create_signed_request, create_webhook_request, TEST_WEBHOOK_SECRET};

    fn create_test_app() -> (axum::Router, mpsc::Receiver<BotEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let app = create_app(ServerState::new(
            tx,
            WebhookSecret::new(TEST_WEBHOOK_SECRET.to_string()),
        ));
        (app, rx)
    }

    #[tokio::test]
    async fn health() {
        let (app, _rx) = create_test_app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn forward_comment_event() {
        let (app, mut rx) = create_test_app();
        let body = load_webhook_payload("issue-comment-pr.json");
        let response = app
            .oneshot(create_webhook_request("issue_comment", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(matches!(rx.try_recv(), Ok(BotEvent::Comment(_))));
    }

    #[tokio::test]
    async fn reject_unsigned_webhook() {
        let (app, mut rx) = create_test_app();
        let body = load_webhook_payload("issue-comment-pr.json");
        let response = app
            .oneshot(create_signed_request("issue_comment", &body, "foo"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_queue() {
        let (app, rx) = create_test_app();
        drop(rx);
        let body = load_webhook_payload("installation-suspend.json");
        let response = app
            .oneshot(create_webhook_request("installation", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
