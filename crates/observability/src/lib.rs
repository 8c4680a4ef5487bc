//! Tracing/logging setup shared by every entry point.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogConfig;

/// Initialize process-wide logging with defaults (JSON, `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(&LogConfig::default());
}

/// Initialize process-wide logging from explicit settings.
pub fn init_with(config: &LogConfig) {
    self::tracing::init(config);
}
