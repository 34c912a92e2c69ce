//! Process-wide logging setup for the staff directory.

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, UnknownLogFormat};

/// Initialize logging with the format named by `STAFFHUB_LOG_FORMAT`
/// (JSON when unset or unrecognised).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let format = std::env::var("STAFFHUB_LOG_FORMAT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    crate::tracing::init(format);
}
