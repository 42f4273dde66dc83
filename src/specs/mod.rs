// src/specs/mod.rs
//! # Page rules
//!
//! Where the ground truth lives in a product listing page and how to pull it
//! out. A rule set is *data*: an ordered list of [`product::Locator`] strategies
//! per field, tried in sequence until one yields text. Supporting a new page layout
//! means adding a locator, not another branch.
//!
//! ## What lives here
//! - Pure extraction over a fetched document (`product::extract`).
//! - The [`product::Fetch`] seam and its HTTP implementation.
//!
//! ## What does **not** live here
//! - Persistence, change detection, notifications: see `tracker`.
//!
//! ## Typical call chain
//! ```text
//! tracker::check_all → Fetch::fetch(url) → core::net::http_get
//!                                       ↘ specs::product::extract(doc)
//! ```
//!
//! Rules are testable offline against inline fixtures; extraction failures are
//! ordinary `TrackerError`s, never panics.
pub mod product;

pub use product::{extract, Fetch, HttpFetcher, Locator, PageRules};
