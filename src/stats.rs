//! Descriptive statistics and ranked reports over windowed series

use std::cmp::Ordering;

use statrs::statistics::Statistics;

use crate::error::{FxError, Result};
use crate::series::RateSeries;
use crate::types::{CurrencyCode, Observation};

/// Percentage change between the earliest and latest observation.
///
/// A single observation yields 0.0 (first and last coincide); an empty
/// series cannot be ranked and fails with `InsufficientData`.
pub fn percent_change(code: &str, observations: &[Observation]) -> Result<f64> {
    let first = observations
        .iter()
        .min_by_key(|obs| obs.date)
        .ok_or_else(|| FxError::insufficient(code, "no observations in window"))?;
    let last = observations
        .iter()
        .max_by_key(|obs| obs.date)
        .ok_or_else(|| FxError::insufficient(code, "no observations in window"))?;

    Ok((last.unit_rate - first.unit_rate) / (first.unit_rate / 100.0))
}

/// Sample standard deviation (n-1) of the in-window unit rates.
pub fn std_dev(code: &str, observations: &[Observation]) -> Result<f64> {
    if observations.len() < 2 {
        return Err(FxError::insufficient(
            code,
            "standard deviation needs at least two observations",
        ));
    }

    let rates: Vec<f64> = observations.iter().map(|obs| obs.unit_rate).collect();
    Ok(rates.std_dev())
}

/// One ranked line of a report; `None` renders as `n/a`
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub code: CurrencyCode,
    pub value: Option<f64>,
}

/// Ranked `(code, metric)` sequence ready for display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatReport {
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ranking {
    Descending,
    Ascending,
}

fn ranked_report<F>(series: &RateSeries, ranking: Ranking, metric: F) -> StatReport
where
    F: Fn(&str, &[Observation]) -> Result<f64>,
{
    let mut entries: Vec<ReportEntry> = series
        .iter()
        .map(|(code, entry)| {
            let value = match metric(code, &entry.observations) {
                Ok(value) => Some(value),
                Err(err) => {
                    log::debug!("{}", err);
                    None
                }
            };
            ReportEntry {
                code: code.to_string(),
                value,
            }
        })
        .collect();

    // Stable sort: ties and n/a entries keep encounter order, n/a sorts last.
    entries.sort_by(|a, b| match (a.value, b.value) {
        (Some(x), Some(y)) => {
            let ordering = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match ranking {
                Ranking::Descending => ordering.reverse(),
                Ranking::Ascending => ordering,
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    StatReport { entries }
}

/// Currencies ranked by percentage change, strongest gain first.
pub fn percent_change_report(series: &RateSeries) -> StatReport {
    ranked_report(series, Ranking::Descending, percent_change)
}

/// Currencies ranked by sample standard deviation, steadiest first.
pub fn std_dev_report(series: &RateSeries) -> StatReport {
    ranked_report(series, Ranking::Ascending, std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::CurrencyHeader;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, d: u32, rate: f64) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), rate)
    }

    fn series_of(entries: &[(&str, Vec<Observation>)]) -> RateSeries {
        let labels: Vec<String> = entries.iter().map(|(code, _)| format!("1 {}", code)).collect();
        let header =
            CurrencyHeader::parse(&format!("Datum|{}", labels.join("|"))).unwrap();

        let mut series = RateSeries::new();
        series.absorb_block(
            &header,
            entries
                .iter()
                .map(|(code, observations)| (code.to_string(), observations.clone()))
                .collect(),
        );
        series
    }

    #[test]
    fn test_percent_change() {
        let observations = [obs(2024, 1, 2, 20.0), obs(2024, 2, 2, 25.0)];
        assert_relative_eq!(percent_change("EUR", &observations).unwrap(), 25.0);
    }

    #[test]
    fn test_percent_change_order_independent() {
        let observations = [obs(2024, 2, 2, 25.0), obs(2024, 1, 2, 20.0)];
        assert_relative_eq!(percent_change("EUR", &observations).unwrap(), 25.0);
    }

    #[test]
    fn test_percent_change_single_observation_is_zero() {
        let observations = [obs(2024, 1, 2, 20.0)];
        assert_relative_eq!(percent_change("EUR", &observations).unwrap(), 0.0);
    }

    #[test]
    fn test_percent_change_empty_is_insufficient() {
        let result = percent_change("EUR", &[]);
        assert!(matches!(result, Err(FxError::InsufficientData { .. })));
    }

    #[test]
    fn test_std_dev_sample() {
        let observations = [
            obs(2024, 1, 1, 1.0),
            obs(2024, 1, 2, 2.0),
            obs(2024, 1, 3, 3.0),
        ];
        assert_relative_eq!(std_dev("EUR", &observations).unwrap(), 1.0);
    }

    #[test]
    fn test_std_dev_needs_two_observations() {
        assert!(matches!(
            std_dev("EUR", &[]),
            Err(FxError::InsufficientData { .. })
        ));
        assert!(matches!(
            std_dev("EUR", &[obs(2024, 1, 1, 1.0)]),
            Err(FxError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_percent_change_report_ranks_descending() {
        let series = series_of(&[
            ("AUD", vec![obs(2024, 1, 2, 10.0), obs(2024, 2, 2, 11.0)]),
            ("EUR", vec![obs(2024, 1, 2, 20.0), obs(2024, 2, 2, 25.0)]),
            ("USD", vec![obs(2024, 1, 2, 22.0), obs(2024, 2, 2, 20.9)]),
        ]);

        let report = percent_change_report(&series);
        let codes: Vec<&str> = report.entries.iter().map(|e| e.code.as_str()).collect();

        assert_eq!(codes, ["EUR", "AUD", "USD"]);
    }

    #[test]
    fn test_std_dev_report_ranks_ascending() {
        let series = series_of(&[
            ("EUR", vec![obs(2024, 1, 1, 20.0), obs(2024, 1, 2, 30.0)]),
            ("AUD", vec![obs(2024, 1, 1, 10.0), obs(2024, 1, 2, 10.1)]),
        ]);

        let report = std_dev_report(&series);
        let codes: Vec<&str> = report.entries.iter().map(|e| e.code.as_str()).collect();

        assert_eq!(codes, ["AUD", "EUR"]);
    }

    #[test]
    fn test_ranking_ties_preserve_encounter_order() {
        let series = series_of(&[
            ("AUD", vec![obs(2024, 1, 2, 10.0), obs(2024, 2, 2, 11.0)]),
            ("EUR", vec![obs(2024, 1, 2, 20.0), obs(2024, 2, 2, 22.0)]),
        ]);

        let report = percent_change_report(&series);
        let codes: Vec<&str> = report.entries.iter().map(|e| e.code.as_str()).collect();

        // Both changed by exactly 10%.
        assert_eq!(codes, ["AUD", "EUR"]);
    }

    #[test]
    fn test_empty_series_reported_as_na_after_valued() {
        let series = series_of(&[
            ("XXX", vec![]),
            ("EUR", vec![obs(2024, 1, 2, 20.0), obs(2024, 2, 2, 25.0)]),
        ]);

        let report = percent_change_report(&series);

        assert_eq!(report.entries[0].code, "EUR");
        assert_eq!(report.entries[1].code, "XXX");
        assert_eq!(report.entries[1].value, None);
    }
}
