//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call multiple times; only the first
/// call takes effect.
pub fn init(directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

        if let Err(e) = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .compact()
            .try_init()
        {
            eprintln!("Failed to initialize tracing: {}", e)
        }
    });
}
