use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use hmac::{Hmac, Mac};
use octocrab::models::events::payload::{IssueCommentEventAction, IssueCommentEventPayload};
use octocrab::models::Repository;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::bot::event::{BotEvent, IssueComment};
use crate::github::server::ServerStateRef;
use crate::github::{GithubRepoName, GithubUser, Issue, IssueNumber};

/// GitHub does not deliver payloads larger than 25 MB.
const MAX_WEBHOOK_BODY_SIZE: usize = 25 * 1024 * 1024;

/// Extracts the repository from a GitHub webhook event.
/// The wrapper exists because octocrab doesn't expose/parse the repository field.
#[derive(serde::Deserialize, Debug)]
struct WebhookRepository {
    repository: Repository,
}

/// axum extractor for GitHub webhook events.
#[derive(Debug)]
pub struct GitHubWebhook(pub BotEvent);

/// Extracts a webhook event from a HTTP request.
#[async_trait]
impl FromRequest<ServerStateRef> for GitHubWebhook {
    type Rejection = StatusCode;

    async fn from_request(
        request: Request,
        state: &ServerStateRef,
    ) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        // Eagerly load body
        let body = axum::body::to_bytes(body, MAX_WEBHOOK_BODY_SIZE)
            .await
            .map_err(|error| {
                tracing::error!("Parsing webhook body failed: {error:?}");
                StatusCode::BAD_REQUEST
            })?;

        // Verify that the request is valid
        if !verify_gh_signature(&parts.headers, &body, state.get_webhook_secret()) {
            tracing::error!("Webhook request failed, could not authenticate webhook");
            return Err(StatusCode::BAD_REQUEST);
        }

        // Parse webhook content
        match parse_webhook_event(&parts.headers, &body) {
            Ok(Some(event)) => Ok(GitHubWebhook(event)),
            Ok(None) => Err(StatusCode::OK),
            Err(error) => {
                tracing::error!("Cannot parse webhook event: {error:?}");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    }
}

fn parse_webhook_event(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
) -> anyhow::Result<Option<BotEvent>> {
    let Some(event_type) = headers.get("x-github-event") else {
        return Err(anyhow::anyhow!("x-github-event header not found"));
    };

    match event_type.as_bytes() {
        b"issue_comment" => {
            let repository: WebhookRepository = serde_json::from_slice(body)?;
            let repository_name = parse_repository_name(&repository.repository)?;

            let payload: IssueCommentEventPayload = serde_json::from_slice(body)?;
            Ok(parse_issue_comment(repository_name, payload).map(BotEvent::Comment))
        }
        b"installation_repositories" | b"installation" => Ok(Some(BotEvent::InstallationsChanged)),
        _ => {
            tracing::debug!("Ignoring unknown event type {:?}", event_type.to_str());
            Ok(None)
        }
    }
}

fn parse_issue_comment(
    repository: GithubRepoName,
    payload: IssueCommentEventPayload,
) -> Option<IssueComment> {
    // Edited or deleted comments do not trigger commands
    if !matches!(payload.action, IssueCommentEventAction::Created) {
        tracing::debug!("Ignoring issue comment with action {:?}", payload.action);
        return None;
    }

    let issue = Issue {
        repository: repository.clone(),
        number: IssueNumber(payload.issue.number),
        is_pull_request: payload.issue.pull_request.is_some(),
        labels: payload
            .issue
            .labels
            .into_iter()
            .map(|label| label.name)
            .collect(),
        author: payload.issue.user.login,
    };
    Some(IssueComment {
        repository,
        author: GithubUser {
            username: payload.comment.user.login,
            html_url: payload.comment.user.html_url,
        },
        issue,
        text: payload.comment.body.unwrap_or_default(),
    })
}

fn parse_repository_name(repository: &Repository) -> anyhow::Result<GithubRepoName> {
    let Some(owner) = repository.owner.as_ref() else {
        return Err(anyhow::anyhow!(
            "Owner of repository {} is missing",
            repository.name
        ));
    };
    Ok(GithubRepoName::new(&owner.login, &repository.name))
}

type HmacSha256 = Hmac<Sha256>;

/// Verifies that the request is properly signed by GitHub with SHA-256 and the passed `secret`.
fn verify_gh_signature(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
    secret: &WebhookSecret,
) -> bool {
    let Some(signature) = headers.get("x-hub-signature-256").map(|v| v.as_bytes()) else {
        return false;
    };
    let Some(signature) = signature
        .strip_prefix(b"sha256=")
        .and_then(|v| hex::decode(v).ok())
    else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Wrapper for a secret which is zeroed on drop and can be exposed only through the [`WebhookSecret::expose`] method.
pub struct WebhookSecret(SecretString);

impl WebhookSecret {
    pub fn new(secret: String) -> Self {
        Self(SecretString::new(secret))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::FromRequest;
    use axum::http::StatusCode;
    use tokio::sync::mpsc;

    use crate::bot::event::BotEvent;
    use crate::github::server::ServerState;
    use crate::github::webhook::{GitHubWebhook, WebhookSecret};
    use crate::github::{GithubRepoName, IssueNumber};
    use crate::tests::io::load_webhook_payload;
    use crate::tests::webhook::{
        create_signed_request, create_webhook_request, TEST_WEBHOOK_SECRET,
    };

    #[tokio::test]
    async fn pull_request_comment() {
        let event = check_webhook("issue-comment-pr.json", "issue_comment")
            .await
            .unwrap();
        let comment = match event {
            GitHubWebhook(BotEvent::Comment(comment)) => comment,
            event => panic!("Unexpected event {event:?}"),
        };
        assert_eq!(
            comment.repository,
            GithubRepoName::new("publiclab", "publiclabbot")
        );
        assert_eq!(comment.author.username, "octokitten");
        assert_eq!(
            comment.author.html_url.as_str(),
            "https://github.com/octokitten"
        );
        assert_eq!(comment.text, r#"@labelbot remove "bug""#);
        assert_eq!(comment.issue.number, IssueNumber(69));
        assert!(comment.issue.is_pull_request);
        assert_eq!(comment.issue.labels, vec!["bug", "help wanted"]);
        assert_eq!(comment.issue.author, "octocat");
        insta::assert_snapshot!(comment.issue.to_string(), @"publiclab/publiclabbot#69");
    }

    #[tokio::test]
    async fn issue_comment() {
        let event = check_webhook("issue-comment-issue.json", "issue_comment")
            .await
            .unwrap();
        let comment = match event {
            GitHubWebhook(BotEvent::Comment(comment)) => comment,
            event => panic!("Unexpected event {event:?}"),
        };
        assert!(!comment.issue.is_pull_request);
        assert!(comment.issue.labels.is_empty());
        assert_eq!(comment.issue.kind(), "issue");
    }

    #[tokio::test]
    async fn edited_comment() {
        let body = load_webhook_payload("issue-comment-pr.json")
            .replace(r#""action": "created""#, r#""action": "edited""#);
        assert_eq!(
            from_request(create_webhook_request("issue_comment", &body))
                .await
                .unwrap_err(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn installation_changed() {
        assert!(matches!(
            check_webhook("installation-suspend.json", "installation").await,
            Ok(GitHubWebhook(BotEvent::InstallationsChanged))
        ));
    }

    #[tokio::test]
    async fn unknown_event() {
        assert_eq!(
            check_webhook("installation-suspend.json", "push")
                .await
                .unwrap_err(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn invalid_signature() {
        let body = load_webhook_payload("issue-comment-pr.json");
        let request = create_signed_request("issue_comment", &body, "wrong-secret");
        assert_eq!(
            from_request(request).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn missing_signature() {
        let body = load_webhook_payload("issue-comment-pr.json");
        let mut request = create_webhook_request("issue_comment", &body);
        request.headers_mut().remove("x-hub-signature-256");
        assert_eq!(
            from_request(request).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn malformed_payload() {
        let request = create_webhook_request("issue_comment", r#"{"action": "created"}"#);
        assert_eq!(
            from_request(request).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn comment_without_repository_owner() {
        let mut payload: serde_json::Value =
            serde_json::from_str(&load_webhook_payload("issue-comment-pr.json")).unwrap();
        payload["repository"]
            .as_object_mut()
            .unwrap()
            .remove("owner");
        let request = create_webhook_request("issue_comment", &payload.to_string());
        assert_eq!(
            from_request(request).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }

    async fn check_webhook(file: &str, event: &str) -> Result<GitHubWebhook, StatusCode> {
        let body = load_webhook_payload(file);
        from_request(create_webhook_request(event, &body)).await
    }

    async fn from_request(request: axum::extract::Request) -> Result<GitHubWebhook, StatusCode> {
        let (tx, _) = mpsc::channel(1024);
        let state = Arc::new(ServerState::new(
            tx,
            WebhookSecret::new(TEST_WEBHOOK_SECRET.to_string()),
        ));
        GitHubWebhook::from_request(request, &state).await
    }
}
