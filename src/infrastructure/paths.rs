//! Location of the local data directory.
//!
//! Resolution order:
//!
//! 1. `INCLUSIVE_BOARD_DATA_DIR`
//! 2. `$XDG_DATA_HOME/inclusive-board`
//! 3. `$HOME/.local/share/inclusive-board`
//! 4. `./.inclusive-board` when no home directory is known

use std::path::PathBuf;

/// Directory name used under the platform data home.
pub const APP_DIR_NAME: &str = "inclusive-board";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "INCLUSIVE_BOARD_DATA_DIR";

/// Default store file name inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Resolves the data directory from the process environment.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|name| std::env::var(name).ok())
}

/// Resolves the data directory using `lookup` for environment variables.
///
/// Empty values are treated as unset.
///
/// # Examples
///
/// ```
/// use inclusive_board::infrastructure::resolve_data_dir;
/// use std::path::PathBuf;
///
/// let dir = resolve_data_dir(|name| (name == "HOME").then(|| "/home/asha".to_string()));
/// assert_eq!(dir, PathBuf::from("/home/asha/.local/share/inclusive-board"));
/// ```
#[must_use]
pub fn resolve_data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(dir) = var(DATA_DIR_ENV) {
        return PathBuf::from(expand_tilde_with(&dir, var("HOME").as_deref()));
    }
    if let Some(xdg) = var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    match var("HOME") {
        Some(home) => PathBuf::from(home).join(".local").join("share").join(APP_DIR_NAME),
        None => PathBuf::from(format!(".{APP_DIR_NAME}")),
    }
}

/// Expands a leading `~` to the current user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}
