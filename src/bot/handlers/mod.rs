use std::sync::Arc;

use anyhow::Context;
use tracing::Instrument;

use crate::bot::command::{BotCommand, CommandParseError};
use crate::bot::event::{BotEvent, IssueComment};
use crate::bot::handlers::remove::command_remove_labels;
use crate::bot::{BotContext, BotState, Comment, RepositoryClient, RepositoryState};

mod remove;

pub use remove::RemovalOutcome;

/// This function executes a single bot event
pub async fn handle_bot_event<Client: RepositoryClient>(
    event: BotEvent,
    state: Arc<dyn BotState<Client>>,
    ctx: Arc<BotContext>,
) -> anyhow::Result<()> {
    match event {
        BotEvent::Comment(comment) => {
            // We want to ignore comments made by this bot
            if state.is_comment_internal(&comment) {
                tracing::trace!("Ignoring comment {comment:?} because it was authored by this bot");
                return Ok(());
            }

            let Some(repo) = state.get_repo_state(&comment.repository) else {
                return Err(anyhow::anyhow!(
                    "Repository {} not found in the bot state",
                    comment.repository
                ));
            };
            let span = tracing::info_span!(
                "Comment",
                issue = %comment.issue,
                author = %comment.author.username
            );
            handle_comment(repo, ctx, comment).instrument(span).await?;
        }
        BotEvent::InstallationsChanged => {
            let span = tracing::info_span!("Installations changed");
            state.reload_repositories().instrument(span).await?;
        }
    }
    Ok(())
}

async fn handle_comment<Client: RepositoryClient>(
    repo: Arc<RepositoryState<Client>>,
    ctx: Arc<BotContext>,
    comment: IssueComment,
) -> anyhow::Result<()> {
    let commands = ctx.parser.parse_commands(&comment.text);

    tracing::debug!("Commands: {commands:?}");
    tracing::trace!("Text: {}", comment.text);

    // Commands of a single comment are applied one after another, each of them has to see the
    // labels left behind by the previous one.
    let mut issue = comment.issue;
    for command in commands {
        match command {
            Ok(BotCommand::RemoveLabels { args }) => {
                let span = tracing::info_span!("Remove labels");
                let config = repo
                    .client
                    .load_config()
                    .await
                    .context("Cannot load repository config")?;
                let outcome =
                    command_remove_labels(&repo, &config, &issue, &comment.author, &args)
                        .instrument(span)
                        .await
                        .context("Cannot execute remove command")?;
                tracing::debug!("Remove command finished: {outcome:?}");
                if let Some(remaining) = outcome.remaining_labels() {
                    issue.labels = remaining.to_vec();
                }
            }
            Err(error) => {
                let message = match error {
                    CommandParseError::MissingCommand => "Missing command.".to_string(),
                    CommandParseError::UnknownCommand(command) => {
                        format!(r#"Unknown command "{command}"."#)
                    }
                };
                tracing::warn!("{}", message);
                repo.client
                    .post_comment(issue.number, Comment::new(message))
                    .await
                    .context("Could not reply to issue comment")?;
            }
        }
    }
    Ok(())
}
