// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::{detect::ChangeEvent, error::TrackerError, product::ProductId, progress::Progress};

/// Mirrors check progress into the status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    changed: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, changed: 0, failed: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_start(&mut self, _id: &ProductId, name: &str) {
        self.set_status(format!("Checking {name} ({}/{})", self.done + 1, self.total));
    }
    fn item_done(&mut self, _id: &ProductId, _price: f64, event: &ChangeEvent) {
        self.done += 1;
        if event.is_recordable() {
            self.changed += 1;
        }
    }
    fn item_failed(&mut self, id: &ProductId, err: &TrackerError) {
        self.done += 1;
        self.failed += 1;
        self.set_status(format!("Skipped {id}: {err}"));
    }
    fn finish(&mut self) {
        self.set_status(format!(
            "Check complete ({}/{}): {} change(s), {} skipped",
            self.done, self.total, self.changed, self.failed
        ));
    }
}
