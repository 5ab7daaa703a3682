//! Contains definitions of common types (issue, user, repository name) needed
//! for working with (GitHub) repositories.
use std::fmt::{Display, Formatter};

use url::Url;

pub mod api;
pub mod process;
pub mod server;
mod webhook;

pub use api::GithubAppState;
pub use webhook::WebhookSecret;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GithubUser {
    pub username: String,
    pub html_url: Url,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssueNumber(pub u64);

impl From<u64> for IssueNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for IssueNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}

/// Snapshot of an issue (or a pull request) taken from the webhook payload that triggered
/// a command.
#[derive(Clone, Debug, PartialEq)]
pub struct Issue {
    pub repository: GithubRepoName,
    pub number: IssueNumber,
    /// GitHub models pull requests as issues, this distinguishes the two.
    pub is_pull_request: bool,
    /// Names of the labels attached to the issue, in the order GitHub reported them.
    pub labels: Vec<String>,
    /// Login of the user who opened the issue.
    pub author: String,
}

impl Issue {
    /// How the issue is referred to in comments.
    pub fn kind(&self) -> &'static str {
        if self.is_pull_request {
            "pull request"
        } else {
            "issue"
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}
