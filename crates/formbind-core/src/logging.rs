//! Logging integration for formbind.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for naming bulk
//! synchronization passes with a span.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise structured JSON. Installing a
/// second subscriber is silently ignored.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a span for one bulk operation over a model type.
///
/// # Examples
///
/// ```
/// use formbind_core::logging::sync_span;
///
/// let span = sync_span("model_to_view", "Customer");
/// let _guard = span.enter();
/// tracing::info!("rendering form");
/// ```
pub fn sync_span(operation: &'static str, model: &'static str) -> tracing::Span {
    tracing::debug_span!("formbind", operation, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            log_level: "not a level [".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_sync_span_enters() {
        let span = sync_span("view_to_model", "Order");
        let _guard = span.enter();
        tracing::debug!("inside span");
    }
}
