//! Reporting window selection and the month-filter argument

use chrono::{Datelike, Months, NaiveDate};

/// Length of the reporting window in months
pub const WINDOW_MONTHS: u32 = 4;

/// Inclusive date range that statistics are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WindowSpec {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The default window: last [`WINDOW_MONTHS`] months ending at `today`.
    pub fn trailing(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_months(Months::new(WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Window starting at the first day of the given month and spanning
    /// [`WINDOW_MONTHS`] months forward. `None` for out-of-range input.
    pub fn from_month(month: u32, year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.checked_add_months(Months::new(WINDOW_MONTHS))?;
        Some(Self { start, end })
    }

    /// Resolve an optional `(month, year)` filter against `today`.
    pub fn resolve(filter: Option<(u32, i32)>, today: NaiveDate) -> Self {
        filter
            .and_then(|(month, year)| Self::from_month(month, year))
            .unwrap_or_else(|| Self::trailing(today))
    }

    /// Inclusive membership test, both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Calendar years this window touches, in chronological order
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start.year()..=self.end.year()
    }
}

/// Parse a `MM.YYYY` month-filter argument.
///
/// Anything that is not an exact two-field numeric match with a month in
/// 1-12 and a year no later than `today`'s is treated as "no filter
/// supplied" rather than an error.
pub fn parse_month_filter(raw: &str, today: NaiveDate) -> Option<(u32, i32)> {
    let (month_part, year_part) = raw.trim().split_once('.')?;
    let month: u32 = month_part.parse().ok()?;
    let year: i32 = year_part.parse().ok()?;

    if !(1..=12).contains(&month) || year > today.year() {
        return None;
    }
    Some((month, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window() {
        let window = WindowSpec::trailing(date(2024, 5, 15));

        assert_eq!(window.start, date(2024, 1, 15));
        assert_eq!(window.end, date(2024, 5, 15));
        assert!(window.contains(date(2024, 1, 15)));
        assert!(window.contains(date(2024, 5, 15)));
        assert!(!window.contains(date(2024, 1, 14)));
    }

    #[test]
    fn test_trailing_window_crosses_year_boundary() {
        let window = WindowSpec::trailing(date(2024, 2, 10));

        assert_eq!(window.start, date(2023, 10, 10));
        let years: Vec<i32> = window.years().collect();
        assert_eq!(years, [2023, 2024]);
    }

    #[test]
    fn test_explicit_month_window() {
        let window = WindowSpec::from_month(3, 2023).unwrap();

        assert_eq!(window.start, date(2023, 3, 1));
        assert_eq!(window.end, date(2023, 7, 1));
        assert!(window.contains(date(2023, 7, 1)));
        assert!(!window.contains(date(2023, 7, 2)));
    }

    #[test]
    fn test_resolve_falls_back_to_trailing() {
        let today = date(2024, 5, 15);

        let explicit = WindowSpec::resolve(Some((3, 2023)), today);
        assert_eq!(explicit.start, date(2023, 3, 1));

        let fallback = WindowSpec::resolve(None, today);
        assert_eq!(fallback.end, today);
    }

    #[test]
    fn test_month_filter_accepts_valid_input() {
        let today = date(2024, 5, 15);

        assert_eq!(parse_month_filter("03.2023", today), Some((3, 2023)));
        assert_eq!(parse_month_filter("12.2024", today), Some((12, 2024)));
        assert_eq!(parse_month_filter(" 3.2023 ", today), Some((3, 2023)));
    }

    #[test]
    fn test_month_filter_degrades_to_none() {
        let today = date(2024, 5, 15);

        assert_eq!(parse_month_filter("13.2023", today), None);
        assert_eq!(parse_month_filter("00.2023", today), None);
        assert_eq!(parse_month_filter("03.2025", today), None);
        assert_eq!(parse_month_filter("march 2023", today), None);
        assert_eq!(parse_month_filter("03-2023", today), None);
        assert_eq!(parse_month_filter("", today), None);
    }
}
