use std::{env, path::PathBuf};

use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, DARK_READER_CACHE_FILE, DESKTOP_LOG_FILE, MAIN_SESSION_DIR,
    PREFERENCES_FILE,
};

/// Root directory for everything the shell persists.
///
/// `LMS_DESKTOP_CONFIG_DIR` wins over the platform config directory.
pub fn default_config_dir() -> Option<PathBuf> {
    if let Ok(raw) = env::var(CONFIG_DIR_ENV) {
        let path = PathBuf::from(raw.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

pub fn preferences_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(PREFERENCES_FILE))
}

pub fn desktop_log_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join("logs").join(DESKTOP_LOG_FILE))
}

pub fn main_session_dir() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(MAIN_SESSION_DIR))
}

pub fn dark_reader_cache_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join("cache").join(DARK_READER_CACHE_FILE))
}
