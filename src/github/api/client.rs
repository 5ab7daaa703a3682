use anyhow::Context;
use axum::async_trait;
use octocrab::{Error, Octocrab};

use crate::bot::{Comment, PostedComment, RepositoryClient};
use crate::config::{ConfigError, RepositoryConfig, CONFIG_FILE_PATH};
use crate::github::{GithubRepoName, IssueNumber};

/// Provides access to a single app installation (repository) using the GitHub API.
pub struct GithubRepositoryClient {
    /// The client caches the access token for this given repository and refreshes it once it
    /// expires.
    pub client: Octocrab,
    pub repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    fn format_issue(&self, issue: IssueNumber) -> String {
        format!("{}#{}", self.repo_name, issue)
    }
}

#[async_trait]
impl RepositoryClient for GithubRepositoryClient {
    fn repository(&self) -> &GithubRepoName {
        &self.repo_name
    }

    async fn load_config(&self) -> anyhow::Result<RepositoryConfig> {
        let response = self
            .client
            .repos(self.repo_name.owner(), self.repo_name.name())
            .get_content()
            .path(CONFIG_FILE_PATH)
            .send()
            .await;
        let mut items = match response {
            Ok(items) => items,
            Err(Error::GitHub { source, .. }) if source.message == "Not Found" => {
                tracing::debug!(
                    "{CONFIG_FILE_PATH} not found in {}, using default config",
                    self.repo_name
                );
                return Ok(RepositoryConfig::default());
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("Cannot download {CONFIG_FILE_PATH} from {}", self.repo_name)
                });
            }
        };

        let content = items
            .take_items()
            .into_iter()
            .next()
            .and_then(|file| file.decoded_content())
            .ok_or(ConfigError::InvalidContent)?;
        Ok(RepositoryConfig::parse(&content)?)
    }

    async fn replace_all_labels(
        &self,
        issue: IssueNumber,
        labels: &[String],
    ) -> anyhow::Result<()> {
        self.client
            .issues(self.repo_name.owner(), self.repo_name.name())
            .replace_all_labels(issue.0, labels)
            .await
            .with_context(|| format!("Cannot replace labels of {}", self.format_issue(issue)))?;
        Ok(())
    }

    /// The comment will be posted as the Github App user of the bot.
    async fn post_comment(
        &self,
        issue: IssueNumber,
        comment: Comment,
    ) -> anyhow::Result<PostedComment> {
        let posted = self
            .client
            .issues(self.repo_name.owner(), self.repo_name.name())
            .create_comment(issue.0, comment.render())
            .await
            .with_context(|| format!("Cannot post comment to {}", self.format_issue(issue)))?;
        Ok(PostedComment {
            body: posted.body.unwrap_or_default(),
        })
    }
}
