//! Platform path resolution for configuration and log files.
//!
//! Locations follow the platform conventions reported by the `dirs` crate, e.g.
//! `~/.config/jobboard` and `~/.local/share/jobboard` on Linux.

use std::path::PathBuf;

const APP_DIR: &str = "jobboard";

/// Returns the configuration directory, if the platform has one.
#[must_use]
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Returns the data directory used for log files.
///
/// Falls back to the current directory when the platform reports none.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of `config.toml`.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use jobboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/var/log/jobboard.log").to_str(), Some("/var/log/jobboard.log"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path == "~" => home,
        _ => PathBuf::from(path),
    }
}
