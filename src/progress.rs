// src/progress.rs
use crate::{detect::ChangeEvent, error::TrackerError, product::ProductId};

/// Lightweight progress reporting used by long-running operations (price checks).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called before a product is fetched.
    fn item_start(&mut self, _id: &ProductId, _name: &str) {}

    /// Called when one product was fetched and classified.
    fn item_done(&mut self, _id: &ProductId, _price: f64, _event: &ChangeEvent) {}

    /// Called when a product was skipped because of an error.
    fn item_failed(&mut self, _id: &ProductId, _err: &TrackerError) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
