//! Persisted rate snapshots (JSON)
//!
//! ```json
//! {
//!   "date": "2024-01-01T12:00:00Z",
//!   "base_currency": "USD",
//!   "rates": { "EUR": 0.85, "USD": 1.0 }
//! }
//! ```
//!
//! `date` is informational and optional on read. Symbols and names are not
//! persisted; they always come from the built-in registry.

use crate::error::{ExchangeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// On-disk snapshot of a rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub base_currency: String,
    /// Code -> rate against `base_currency`; sorted for stable output
    pub rates: BTreeMap<String, f64>,
}

impl RateSnapshot {
    /// Write the snapshot to a file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ExchangeError::persistence(path, e))?;
        fs::write(path, json).map_err(|e| ExchangeError::persistence(path, e))?;
        log::info!(
            "Wrote {} rates (base {}) to {}",
            self.rates.len(),
            self.base_currency,
            path.display()
        );
        Ok(())
    }

    /// Read and parse a snapshot file
    ///
    /// Unreadable files and malformed JSON are persistence errors. Valid JSON
    /// with missing or mistyped fields is an invalid snapshot. Rate and
    /// currency validation happens when the snapshot is loaded into a table.
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ExchangeError::persistence(path, e))?;
        let snapshot: RateSnapshot = serde_json::from_str(&contents).map_err(|e| match e.classify() {
            Category::Data => {
                ExchangeError::InvalidSnapshot(format!("{}: {}", path.display(), e))
            }
            Category::Io | Category::Syntax | Category::Eof => ExchangeError::persistence(path, e),
        })?;
        log::debug!("Read {} rates from {}", snapshot.rates.len(), path.display());
        Ok(snapshot)
    }
}
