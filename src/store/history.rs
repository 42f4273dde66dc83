// src/store/history.rs
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info, warn};

use crate::{
    config::consts::HISTORY_HEADERS,
    error::{Result, TrackerError},
    file::ensure_parent,
    product::ProductId,
};

/// One immutable price observation.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRecord {
    pub timestamp: String,
    pub name: String,
    pub price: f64,
    pub url: String,
    pub product_id: ProductId,
}

impl HistoryRecord {
    fn to_row(&self) -> [String; 5] {
        [
            self.timestamp.clone(),
            self.name.clone(),
            format!("{:.2}", self.price),
            self.url.clone(),
            s!(self.product_id.as_str()),
        ]
    }

    /// Rows that are short or carry a non-numeric price are skipped.
    fn from_row(row: &StringRecord) -> Option<Self> {
        if row.len() < 5 {
            return None;
        }
        let price: f64 = row.get(2)?.trim().parse().ok()?;
        Some(Self {
            timestamp: s!(row.get(0)?),
            name: s!(row.get(1)?),
            price,
            url: s!(row.get(3)?),
            product_id: ProductId::from(row.get(4)?),
        })
    }
}

/// Append-only CSV history with a fixed header row.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one record; creates the file (and header) on first use.
    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        let path = &self.path;
        ensure_parent(path)?;

        let first_run = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TrackerError::persistence(path, e))?;

        let mut w = WriterBuilder::new().has_headers(false).from_writer(file);
        if first_run {
            w.write_record(HISTORY_HEADERS)
                .map_err(|e| TrackerError::persistence(path, e))?;
            info!("History: created {}", path.display());
        }
        w.write_record(record.to_row())
            .map_err(|e| TrackerError::persistence(path, e))?;
        w.flush().map_err(|e| TrackerError::persistence(path, e))?;

        debug!(
            "History: appended {} @ {:.2}",
            record.product_id, record.price
        );
        Ok(())
    }

    /// All well-formed records in file (= chronological) order.
    pub fn records(&self) -> Result<Vec<HistoryRecord>> {
        let path = &self.path;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| TrackerError::persistence(path, e))?;

        let mut out = Vec::new();
        // Byte rows: a row with bad UTF-8 is skipped like any other malformed row.
        for (i, row) in reader.byte_records().enumerate() {
            let row = row.map_err(|e| TrackerError::persistence(path, e))?;
            let parsed = StringRecord::from_byte_record(row)
                .ok()
                .and_then(|r| HistoryRecord::from_row(&r));
            match parsed {
                Some(rec) => out.push(rec),
                None => warn!("History: skipping malformed row {} in {}", i + 2, path.display()),
            }
        }
        Ok(out)
    }

    pub fn records_for(&self, id: &ProductId) -> Result<Vec<HistoryRecord>> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|r| &r.product_id == id)
            .collect())
    }

    /// Price of the most recent record for `id`, or `None` if never logged.
    pub fn last_price(&self, id: &ProductId) -> Result<Option<f64>> {
        Ok(self
            .records()?
            .into_iter()
            .rev()
            .find(|r| &r.product_id == id)
            .map(|r| r.price))
    }
}
