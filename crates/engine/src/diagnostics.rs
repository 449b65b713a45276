//! Diagnostic side channel for replay mismatches.
//!
//! Mismatches and exhaustion are reported here *before* they are delivered
//! to the caller, so they surface even when the code under test swallows the
//! error. Scripted failures are never reported.

use storyline_domain::{EventName, StoryError};

/// `tracing` target used for replay diagnostics.
pub const DIAGNOSTICS_TARGET: &str = "storyline::diagnostics";

/// Receives replay mismatches.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, event: &EventName, error: &StoryError);
}

/// Default sink: error-level `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, event: &EventName, error: &StoryError) {
        tracing::error!(
            target: DIAGNOSTICS_TARGET,
            event = %event,
            error = %error,
            "Story replay mismatch"
        );
    }
}

/// Caps `text` at `max` bytes, cutting on a char boundary.
pub(crate) fn truncate(text: String, max: usize) -> String {
    if text.len() <= max {
        return text;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... [TRUNCATED]", &text[..cut])
}

/// Installs a `tracing-subscriber` fmt subscriber for test binaries.
///
/// Available with the `testing` feature.
///
/// Honors `RUST_LOG`, defaulting to `storyline=debug`. Safe to call from
/// every test; only the first call installs anything.
#[cfg(any(test, feature = "testing"))]
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storyline=debug".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
