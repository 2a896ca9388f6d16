//! Platform path helpers.
//!
//! Resolves where cinesearch keeps its configuration, its key-value store and
//! its log file, and expands `~` in user-supplied paths.

use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "cinesearch";

/// File name of the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// File name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "cinesearch.log";

/// Returns the default data directory.
///
/// This is the platform data directory (e.g. `~/.local/share` on Linux) joined
/// with `cinesearch`, falling back to `./.cinesearch` when the platform has no
/// notion of one.
///
/// # Examples
///
/// ```
/// use cinesearch::infrastructure::default_data_dir;
///
/// assert!(default_data_dir().ends_with("cinesearch") || default_data_dir().ends_with(".cinesearch"));
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(format!(".{APP_DIR_NAME}")),
        |dir| dir.join(APP_DIR_NAME),
    )
}

/// Returns the default configuration file path, if the platform has a config directory.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Path of the key-value store file inside `data_dir`.
#[must_use]
pub fn store_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use cinesearch::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/movies"), home.join("movies"));
        }
        assert_eq!(expand_tilde("relative/~"), PathBuf::from("relative/~"));
    }

    #[test]
    fn store_file_lives_in_data_dir() {
        assert_eq!(
            store_file(Path::new("/data")),
            PathBuf::from("/data/store.json")
        );
    }
}
