//! Persistence tiers for the parsed series
//!
//! Both tiers are written only after the full in-memory series exists, so a
//! parse failure never leaves a partially-written store.

pub mod document;
#[cfg(feature = "rusqlite-support")]
pub mod relational;

pub use document::{documents, CurrencyDocument, DocumentStore, AMOUNT_LABEL};
#[cfg(feature = "rusqlite-support")]
pub use relational::{RateDb, SCALED_TABLE, WINDOW_TABLE};

use chrono::NaiveDate;

use crate::error::{FxError, Result};
use crate::series::RateSeries;
use crate::types::CurrencyCode;

/// One flat relational row
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub code: CurrencyCode,
    pub date: NaiveDate,
    pub value: f64,
}

/// Flatten the windowed series into `(currency, date, value)` rows for the
/// full window table, in series encounter order.
pub fn window_rows(series: &RateSeries) -> Vec<RateRow> {
    series
        .iter()
        .flat_map(|(code, entry)| {
            entry.observations.iter().map(move |obs| RateRow {
                code: code.to_string(),
                date: obs.date,
                value: obs.unit_rate,
            })
        })
        .collect()
}

/// Rescale one currency's windowed series to a base-100 index on its first
/// observation.
pub fn scaled_rows(series: &RateSeries, code: &str) -> Result<Vec<RateRow>> {
    let entry = series
        .get(code)
        .ok_or_else(|| FxError::insufficient(code, "currency not present in feed"))?;
    let base = entry
        .observations
        .first()
        .map(|obs| obs.unit_rate)
        .ok_or_else(|| FxError::insufficient(code, "no observations in window"))?;

    Ok(entry
        .observations
        .iter()
        .map(|obs| RateRow {
            code: code.to_string(),
            date: obs.date,
            value: obs.unit_rate / base * 100.0,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::CurrencyHeader;
    use crate::types::Observation;

    fn obs(y: i32, m: u32, d: u32, rate: f64) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), rate)
    }

    fn sample_series() -> RateSeries {
        let header = CurrencyHeader::parse("Datum|1 EUR|1 USD").unwrap();
        let mut series = RateSeries::new();
        series.absorb_block(
            &header,
            vec![
                (
                    "EUR".to_string(),
                    vec![obs(2024, 1, 2, 25.0), obs(2024, 1, 3, 26.0)],
                ),
                ("USD".to_string(), vec![obs(2024, 1, 2, 22.8)]),
            ],
        );
        series
    }

    #[test]
    fn test_window_rows_flatten_in_order() {
        let rows = window_rows(&sample_series());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].code, "EUR");
        assert_eq!(rows[2].code, "USD");
        assert_eq!(rows[1].value, 26.0);
    }

    #[test]
    fn test_scaled_rows_base_100() {
        let rows = scaled_rows(&sample_series(), "EUR").unwrap();

        assert_eq!(rows[0].value, 100.0);
        assert!((rows[1].value - 104.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_rows_missing_currency() {
        let result = scaled_rows(&sample_series(), "GBP");
        assert!(matches!(result, Err(FxError::InsufficientData { .. })));
    }
}
