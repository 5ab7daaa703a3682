use crate::bot::command::parse_label_list;
use crate::bot::comment::missing_labels_comment;
use crate::bot::labels::{diff_labels, LabelDiff};
use crate::bot::{PostedComment, RepositoryClient, RepositoryState};
use crate::config::RepositoryConfig;
use crate::github::{GithubUser, Issue};

#[derive(Debug, PartialEq)]
pub enum RemovalOutcome {
    /// The command was not allowed or it did not name any labels. Nothing was changed.
    Rejected,
    /// All requested labels were removed.
    Removed { remaining: Vec<String> },
    /// Some requested labels were not attached to the issue, they were reported in a comment.
    Reported {
        remaining: Vec<String>,
        comment: PostedComment,
    },
}

impl RemovalOutcome {
    /// Labels that are attached to the issue after the command was executed, if it was
    /// executed.
    pub fn remaining_labels(&self) -> Option<&[String]> {
        match self {
            RemovalOutcome::Rejected => None,
            RemovalOutcome::Removed { remaining } | RemovalOutcome::Reported { remaining, .. } => {
                Some(remaining)
            }
        }
    }
}

/// Removes the labels quoted in `args` from `issue`.
///
/// Requested labels that are not attached to the issue are reported back with a comment.
/// Errors are only returned when GitHub cannot be reached, invalid requests result in
/// [`RemovalOutcome::Rejected`].
pub(super) async fn command_remove_labels<Client: RepositoryClient>(
    repo: &RepositoryState<Client>,
    config: &RepositoryConfig,
    issue: &Issue,
    commenter: &GithubUser,
    args: &str,
) -> anyhow::Result<RemovalOutcome> {
    if !config
        .self_label_policy()
        .permits(&commenter.username, issue)
    {
        tracing::debug!(
            "{} is not allowed to remove labels from {issue} (policy {:?})",
            commenter.username,
            config.self_label_policy()
        );
        return Ok(RemovalOutcome::Rejected);
    }

    let requested = parse_label_list(args);
    if requested.is_empty() {
        tracing::debug!("No quoted labels found in {args:?}");
        return Ok(RemovalOutcome::Rejected);
    }

    let LabelDiff {
        remaining,
        removed,
        missing,
    } = diff_labels(&issue.labels, &requested);

    tracing::info!("Removing label(s) {removed:?} from {issue}");
    repo.client
        .replace_all_labels(issue.number, &remaining)
        .await?;

    if missing.is_empty() {
        return Ok(RemovalOutcome::Removed { remaining });
    }

    tracing::info!("Reporting missing label(s) {missing:?} on {issue}");
    let comment = missing_labels_comment(&config.templates.label_error, issue, &missing);
    let comment = repo.client.post_comment(issue.number, comment).await?;
    Ok(RemovalOutcome::Reported { remaining, comment })
}
