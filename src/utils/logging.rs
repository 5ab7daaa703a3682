use anyhow::Error;
use tracing::span::Span;

/// Reports errors within the scope of a span.
pub trait LogError {
    fn log_error(&self, error: &Error);
}

impl LogError for Span {
    fn log_error(&self, error: &Error) {
        self.in_scope(|| {
            tracing::error!(cause = %error.root_cause(), "Event handling failed: {error:?}");
        });
    }
}
