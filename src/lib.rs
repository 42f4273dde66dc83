// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod detect;
pub mod error;
pub mod file;
pub mod gui;
pub mod logging;
pub mod notify;
pub mod product;
pub mod progress;
pub mod schedule;
pub mod store;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use tracker::{AddOutcome, CheckSummary, RemoveOutcome, Tracker};
