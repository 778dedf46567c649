//! Document-store persistence of per-currency records
//!
//! Each currency becomes one document of `(label, value)` string pairs: the
//! quotation unit under [`AMOUNT_LABEL`] first, then one pair per dated
//! observation. The whole collection is replaced on every run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::feed::DATE_FORMAT;
use crate::series::{RateSeries, SeriesEntry};
use crate::types::CurrencyCode;

/// Label of the leading pseudo-record carrying the quotation unit
pub const AMOUNT_LABEL: &str = "amount";

/// One persisted per-currency record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDocument {
    pub code: CurrencyCode,
    pub records: Vec<(String, String)>,
}

impl CurrencyDocument {
    /// Project one merged series entry into its document form
    pub fn from_entry(code: &str, entry: &SeriesEntry) -> Self {
        let mut records = Vec::with_capacity(entry.observations.len() + 1);
        records.push((AMOUNT_LABEL.to_string(), entry.unit.to_string()));
        for obs in &entry.observations {
            records.push((obs.date.format(DATE_FORMAT).to_string(), obs.unit_rate.to_string()));
        }
        Self {
            code: code.to_string(),
            records,
        }
    }
}

/// Project the whole merged series, in encounter order
pub fn documents(series: &RateSeries) -> Vec<CurrencyDocument> {
    series
        .iter()
        .map(|(code, entry)| CurrencyDocument::from_entry(code, entry))
        .collect()
}

/// File-backed JSON document collection
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the collection wholesale, dropping any previous run's data.
    pub fn replace(&self, documents: &[CurrencyDocument]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(documents)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Read the whole collection back
    pub fn read_all(&self) -> Result<Vec<CurrencyDocument>> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
