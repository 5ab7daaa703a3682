use crate::github::{GithubRepoName, GithubUser, Issue};

#[derive(Debug)]
pub enum BotEvent {
    /// A comment was posted on an issue or a pull request.
    Comment(IssueComment),
    /// The configuration of some repository has been changed for the bot's Github App.
    InstallationsChanged,
}

#[derive(Debug)]
pub struct IssueComment {
    pub repository: GithubRepoName,
    pub author: GithubUser,
    pub issue: Issue,
    pub text: String,
}
