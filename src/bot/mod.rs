use std::sync::Arc;

use axum::async_trait;

use crate::config::RepositoryConfig;
use crate::github::{GithubRepoName, IssueNumber};

mod command;
mod comment;
mod context;
pub mod event;
mod handlers;
mod labels;

use crate::bot::event::IssueComment;
pub use command::{BotCommand, CommandParseError, CommandParser};
pub use comment::{Comment, PostedComment};
pub use context::BotContext;
pub use handlers::{handle_bot_event, RemovalOutcome};

/// Provides functionality for working with a remote repository.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    fn repository(&self) -> &GithubRepoName;

    /// Load the configuration of the repository.
    /// It is loaded again for every command, so changes are observed without a restart.
    async fn load_config(&self) -> anyhow::Result<RepositoryConfig>;

    /// Set the labels of the issue with the given number to exactly `labels`.
    async fn replace_all_labels(&self, issue: IssueNumber, labels: &[String])
        -> anyhow::Result<()>;

    /// Post a comment to the issue with the given number.
    async fn post_comment(
        &self,
        issue: IssueNumber,
        comment: Comment,
    ) -> anyhow::Result<PostedComment>;
}

/// Main state holder for the bot.
/// It is behind a trait to allow easier mocking in tests.
#[async_trait]
pub trait BotState<Client: RepositoryClient>: Send + Sync {
    /// Was the comment created by the bot?
    fn is_comment_internal(&self, comment: &IssueComment) -> bool;

    /// Get repository state for the given repository name.
    fn get_repo_state(&self, repo: &GithubRepoName) -> Option<Arc<RepositoryState<Client>>>;

    /// Reload state of repositories due to some external change.
    async fn reload_repositories(&self) -> anyhow::Result<()>;
}

/// An access point to a single repository.
pub struct RepositoryState<Client: RepositoryClient> {
    pub repository: GithubRepoName,
    pub client: Client,
}
