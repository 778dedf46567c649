//! Normalization of raw feed cells into dated unit rates

use chrono::NaiveDate;

use crate::error::{FxError, Result};
use crate::feed::rows::RawObservation;
use crate::types::{Observation, Rate, Unit};

/// Date format of the feed, `day.month.year` with optional zero-padding
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a locale-formatted rate string (`"24,115"`) into a decimal number.
pub fn parse_rate(raw: &str) -> Result<Rate> {
    let rate: Rate = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| FxError::InvalidRate(raw.to_string()))?;

    if !rate.is_finite() {
        return Err(FxError::InvalidRate(raw.to_string()));
    }
    Ok(rate)
}

/// Parse a feed date string (`"02.01.2024"` or `"2.1.2024"`).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| FxError::InvalidDate(raw.to_string()))
}

/// Normalize one raw cell into an [`Observation`], dividing the published
/// rate by the block's quotation unit so all rates are per single unit.
pub fn normalize(raw: &RawObservation, unit: Unit) -> Result<Observation> {
    let date = parse_date(&raw.date)?;
    let rate = parse_rate(&raw.value)?;
    Ok(Observation::new(date, rate / unit as f64))
}
