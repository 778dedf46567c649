//! Per-currency series assembly across feed blocks

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::feed::CurrencyHeader;
use crate::types::{CurrencyCode, Observation, Unit};
use crate::window::WindowSpec;

/// One currency's merged series with the quotation unit it was first
/// published under. The unit is metadata only; observations are already
/// normalized per single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub unit: Unit,
    pub observations: Vec<Observation>,
}

/// Mapping from currency code to its observed series, preserving the order
/// in which codes were first encountered across blocks.
#[derive(Debug, Clone, Default)]
pub struct RateSeries {
    order: Vec<CurrencyCode>,
    entries: HashMap<CurrencyCode, SeriesEntry>,
}

impl RateSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one block's normalized observations.
    ///
    /// A code seen for the first time takes its unit from this block; a code
    /// seen before keeps its original unit and appends observations in block
    /// order.
    pub fn absorb_block(
        &mut self,
        header: &CurrencyHeader,
        block: Vec<(CurrencyCode, Vec<Observation>)>,
    ) {
        for (code, observations) in block {
            if !self.entries.contains_key(&code) {
                self.order.push(code.clone());
                self.entries.insert(
                    code.clone(),
                    SeriesEntry {
                        unit: header.unit_of(&code).unwrap_or(1),
                        observations: Vec::new(),
                    },
                );
            }
            if let Some(entry) = self.entries.get_mut(&code) {
                entry.observations.extend(observations);
            }
        }
    }

    /// Codes in first-encounter order
    pub fn codes(&self) -> &[CurrencyCode] {
        &self.order
    }

    pub fn get(&self, code: &str) -> Option<&SeriesEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total observation count across all currencies
    pub fn observation_count(&self) -> usize {
        self.entries.values().map(|e| e.observations.len()).sum()
    }

    /// Iterate entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeriesEntry)> {
        self.order
            .iter()
            .filter_map(|code| self.entries.get(code).map(|entry| (code.as_str(), entry)))
    }

    /// Sort every currency's observations chronologically.
    pub fn sort_by_date(&mut self) {
        for entry in self.entries.values_mut() {
            entry.observations.sort_by_key(|obs| obs.date);
        }
    }

    /// Restrict every series to observations inside `window` (inclusive).
    /// Currencies left with no observations stay present as empty series.
    pub fn filter_window(&self, window: &WindowSpec) -> RateSeries {
        let mut filtered = RateSeries::new();
        for (code, entry) in self.iter() {
            let observations: Vec<Observation> = entry
                .observations
                .iter()
                .copied()
                .filter(|obs| window.contains(obs.date))
                .collect();

            filtered.order.push(code.to_string());
            filtered.entries.insert(
                code.to_string(),
                SeriesEntry {
                    unit: entry.unit,
                    observations,
                },
            );
        }
        filtered
    }
}
