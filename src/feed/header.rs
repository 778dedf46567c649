//! Header row parsing: currency codes and quotation units

use crate::error::{FxError, Result};
use crate::types::{CurrencyCode, Unit};

/// Field separator of the feed
pub const FIELD_DELIMITER: char = '|';

/// One header field, e.g. `"100 JPY"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub code: CurrencyCode,
    pub unit: Unit,
    /// Raw field text as published; data-row columns are located by matching
    /// the code against this text
    pub label: String,
}

/// Ordered currency list of one block. Positions correspond to the column
/// layout of every data row in the same block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyHeader {
    entries: Vec<HeaderEntry>,
}

impl CurrencyHeader {
    /// Parse a header row of the form `Datum|1 AUD|1 EUR|100 JPY|...`.
    ///
    /// The leading date-label field is discarded. Every remaining field must
    /// split into a numeric unit token followed by a code token.
    pub fn parse(header_line: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for field in header_line.split(FIELD_DELIMITER).skip(1) {
            let mut tokens = field.split_whitespace();
            let unit_token = tokens
                .next()
                .ok_or_else(|| FxError::MalformedHeader(field.to_string()))?;
            let code = tokens
                .next()
                .ok_or_else(|| FxError::MalformedHeader(field.to_string()))?;

            let unit: Unit = unit_token
                .parse()
                .map_err(|_| FxError::MalformedHeader(field.to_string()))?;
            if unit == 0 {
                return Err(FxError::MalformedHeader(field.to_string()));
            }

            entries.push(HeaderEntry {
                code: code.to_string(),
                unit,
                label: field.trim().to_string(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column index of `code` within a data row of this block.
    ///
    /// Scans header fields left to right and returns the first whose raw text
    /// contains the code; the offset accounts for the leading date column.
    pub fn column_of(&self, code: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.label.contains(code))
            .map(|position| position + 1)
    }

    /// Quotation unit published for `code` in this block
    pub fn unit_of(&self, code: &str) -> Option<Unit> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.unit)
    }
}
