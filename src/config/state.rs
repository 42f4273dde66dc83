// src/config/state.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

/// Where the tracker keeps its files and how it paces requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub data_dir: PathBuf,
    pub request_pause: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

impl AppOptions {
    /// Defaults, with the data dir taken from `PRICEWATCH_DIR` if set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            opts.data_dir = PathBuf::from(dir);
        }
        opts
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn history_path(&self) -> PathBuf { self.data_dir.join(HISTORY_FILE) }
    pub fn catalog_path(&self) -> PathBuf { self.data_dir.join(CATALOG_FILE) }
    pub fn schedule_path(&self) -> PathBuf { self.data_dir.join(SCHEDULE_FILE) }
    pub fn email_path(&self) -> PathBuf { self.data_dir.join(EMAIL_FILE) }
}

/// Window-only state (not persisted).
#[derive(Clone, Debug)]
pub struct GuiState {
    /// URL text field
    pub url_input: String,
    /// Schedule text field (HH:MM)
    pub time_input: String,

    /// Email settings form
    pub email_open: bool,
    pub email_user: String,
    pub email_pass: String,
    pub email_to: String,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            url_input: s!(),
            time_input: s!(DEFAULT_CHECK_TIME),
            email_open: false,
            email_user: s!(),
            email_pass: s!(),
            email_to: s!(),
            window_w: 1000,
            window_h: 600,
        }
    }
}
