//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `default_level` (for example `"info"`
/// or `"doglice_engine=debug"`) is used as the filter.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second init (tests, embedding) keeps the first logger.
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}
