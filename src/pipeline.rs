//! Sequential composition of the feed-to-series transformation
//!
//! Each stage consumes its input and returns a new structure; nothing is
//! shared between stages. Normalization runs per block, with that block's
//! own quotation units, before any merging happens - units are not stable
//! across blocks.

use crate::error::Result;
use crate::feed::{normalize, parse_rows, split_payloads, CurrencyHeader};
use crate::series::RateSeries;
use crate::types::{CurrencyCode, Observation};
use crate::window::WindowSpec;

/// Build the merged, normalized series from an ordered sequence of yearly
/// payloads.
///
/// A header that does not parse aborts the run. Individual cells that fail
/// to normalize are skipped with a warning; the rest of the row is kept.
pub fn build_series(payloads: &[String]) -> Result<RateSeries> {
    let mut series = RateSeries::new();

    for block in split_payloads(payloads.iter().map(String::as_str)) {
        let header = CurrencyHeader::parse(block.header_line())?;
        let parsed = parse_rows(&block, &header);

        let mut normalized: Vec<(CurrencyCode, Vec<Observation>)> = Vec::new();
        for (code, raw_observations) in parsed.observations {
            let unit = header.unit_of(&code).unwrap_or(1);
            let observations: Vec<Observation> = raw_observations
                .iter()
                .filter_map(|raw| match normalize(raw, unit) {
                    Ok(observation) => Some(observation),
                    Err(err) => {
                        log::warn!("skipping {} observation: {}", code, err);
                        None
                    }
                })
                .collect();
            normalized.push((code, observations));
        }

        series.absorb_block(&header, normalized);
    }

    Ok(series)
}

/// [`build_series`] restricted to `window`, each currency sorted
/// chronologically - the shape the statistics engine expects.
pub fn windowed_series(payloads: &[String], window: &WindowSpec) -> Result<RateSeries> {
    let mut series = build_series(payloads)?.filter_window(window);
    series.sort_by_date();
    Ok(series)
}
