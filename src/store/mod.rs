// src/store/mod.rs
//! Flat-file persistence.
//!
//! - `history`: append-only CSV price trail. Source of truth for
//!   "what was last logged" per product.
//! - `catalog`: JSON snapshot of tracked products, rewritten whole on every save.
//!
//! Neither store keeps a file handle open between calls; every operation
//! opens, reads/writes and closes. Absence of a file is never an error.
pub mod catalog;
pub mod history;

pub use catalog::{Catalog, CatalogStore, LoadOutcome};
pub use history::{HistoryRecord, HistoryStore};
