//! Log output setup for the mock API.
//!
//! Pretty human-readable logs while developing, flattened JSON in production.
//! `RUST_LOG` overrides the default directives in both modes
//! (e.g. `RUST_LOG=ums_api=trace,tower_http=debug`).

use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

use crate::config::Environment;

/// Default filter directives for an environment
pub const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,tower_http=debug,hyper=info",
        Environment::Production => "info,tower_http=info",
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed, which callers starting more
/// than one server in a process (tests) can ignore.
pub fn init_tracing(env: &Environment) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()?;

    tracing::info!(environment = ?env, "Tracing initialized");
    Ok(())
}
