// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while tracking a product.
///
/// Per-product variants (`Transport`, `Extraction`, `Parse`) are caught at the
/// product boundary by `Tracker::check_all`; the rest bubble up to the front end.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Network error fetching {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Could not find product {what} on page")]
    Extraction { what: &'static str },

    #[error("Could not parse price '{text}'")]
    Parse { text: String },

    #[error("Storage error ({path}): {reason}")]
    Persistence { path: String, reason: String },

    #[error("Invalid setting: {0}")]
    Config(String),

    #[error("Product already being tracked (ID: {0})")]
    Duplicate(String),

    #[error("No tracked product with ID {0}")]
    NotTracked(String),

    #[error("Email error: {0}")]
    Notify(String),
}

impl TrackerError {
    pub fn persistence(path: &std::path::Path, reason: impl ToString) -> Self {
        TrackerError::Persistence {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport(url: &str, reason: impl ToString) -> Self {
        TrackerError::Transport { url: s!(url), reason: reason.to_string() }
    }

    /// True for the failures `check_all` skips over (fetch/extract/parse).
    pub fn is_per_product(&self) -> bool {
        matches!(
            self,
            TrackerError::Transport { .. }
                | TrackerError::Extraction { .. }
                | TrackerError::Parse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
