//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber pipeline from `tracing` macros to either
//! stderr or a rotating log file.

use super::file_writer::FileWriter;
use crate::infrastructure::expand_tilde;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolves the filter directive: `RUST_LOG`, then `config.log_level`, then `info`.
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Initializes the tracing subscriber.
///
/// Events go to the file named by `config.log_file` (rotated at 10 MB, three
/// backups kept) or, when unset, to stderr so they never mix with rendered output
/// on stdout.
///
/// # Initialization Behavior
///
/// - Falls back to stderr if the log file's directory cannot be created
/// - Idempotent: Safe to call multiple times (only first call takes effect)
///
/// # Example
///
/// ```rust
/// use jobboard::observability::init_tracing;
/// use jobboard::Config;
///
/// let config = Config {
///     log_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = env_filter(config);

    let file_writer = config
        .log_file
        .as_deref()
        .map(expand_tilde)
        .and_then(|path| FileWriter::new(path).ok());

    let result = match file_writer {
        Some(writer) => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer))
            .try_init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(log_file = ?config.log_file, "tracing initialized");
    }
}
