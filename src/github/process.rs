use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::bot::event::BotEvent;
use crate::bot::{handle_bot_event, BotContext, BotState, RepositoryClient};
use crate::utils::logging::LogError;

pub type EventSender = mpsc::Sender<BotEvent>;

/// Asynchronous process that receives webhook events and reacts to them.
///
/// Events are handled one at a time, in the order in which they were received.
/// The process ends once all senders are dropped.
pub fn create_bot_process<Client: RepositoryClient + 'static>(
    state: Arc<dyn BotState<Client>>,
    ctx: BotContext,
) -> (EventSender, impl Future<Output = ()>) {
    let (tx, mut rx) = mpsc::channel::<BotEvent>(1024);

    let service = async move {
        let ctx = Arc::new(ctx);
        while let Some(event) = rx.recv().await {
            let span = tracing::info_span!("Event");
            tracing::debug!("Received event: {event:#?}");
            if let Err(error) = handle_bot_event(event, Arc::clone(&state), Arc::clone(&ctx))
                .instrument(span.clone())
                .await
            {
                span.log_error(&error);
            }
        }
    };
    (tx, service)
}
