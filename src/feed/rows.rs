//! Data row parsing guided by a block's header layout

use crate::feed::header::{CurrencyHeader, FIELD_DELIMITER};
use crate::feed::splitter::{RawBlock, HEADER_TOKEN};
use crate::types::CurrencyCode;

/// One raw cell pair lifted from a data row, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObservation {
    /// Date string as published, `day.month.year`
    pub date: String,
    /// Locale-formatted rate string, e.g. `"24,115"`
    pub value: String,
}

/// Raw observations of one block, keyed by code in header order
#[derive(Debug, Clone, Default)]
pub struct BlockObservations {
    pub observations: Vec<(CurrencyCode, Vec<RawObservation>)>,
}

/// True when a data row is actually a header row the feed repeated mid-block
/// instead of supplying data. Such rows truncate the block; they are feed
/// garbage, not an error.
pub fn is_repeated_header(date_field: &str) -> bool {
    date_field.trim() == HEADER_TOKEN
}

/// Extract per-currency raw observations from a block's data rows.
///
/// Column positions come from the header; a row shorter than a currency's
/// column skips that currency only. Blank lines are ignored. A repeated
/// header sentinel stops the block, keeping what has accumulated so far.
pub fn parse_rows(block: &RawBlock, header: &CurrencyHeader) -> BlockObservations {
    let columns: Vec<(CurrencyCode, Option<usize>)> = header
        .entries()
        .iter()
        .map(|entry| (entry.code.clone(), header.column_of(&entry.code)))
        .collect();

    let mut observations: Vec<(CurrencyCode, Vec<RawObservation>)> = columns
        .iter()
        .map(|(code, _)| (code.clone(), Vec::new()))
        .collect();

    for row in block.data_rows() {
        if row.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.split(FIELD_DELIMITER).collect();
        let date = fields[0];
        if is_repeated_header(date) {
            break;
        }

        for (slot, (_, column)) in observations.iter_mut().zip(&columns) {
            let Some(index) = column else { continue };
            if let Some(value) = fields.get(*index) {
                slot.1.push(RawObservation {
                    date: date.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    BlockObservations { observations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::splitter::split_payload;

    fn block_of(payload: &str) -> RawBlock {
        split_payload(payload).into_iter().next().unwrap()
    }

    #[test]
    fn test_rows_follow_header_positions() {
        let block = block_of("Datum|1 AUD|1 EUR\n02.01.2024|15,238|24,115\n03.01.2024|15,255|24,090\n");
        let header = CurrencyHeader::parse(block.header_line()).unwrap();

        let parsed = parse_rows(&block, &header);

        assert_eq!(parsed.observations.len(), 2);
        let (code, aud) = &parsed.observations[0];
        assert_eq!(code, "AUD");
        assert_eq!(aud.len(), 2);
        assert_eq!(aud[0].date, "02.01.2024");
        assert_eq!(aud[0].value, "15,238");

        let (code, eur) = &parsed.observations[1];
        assert_eq!(code, "EUR");
        assert_eq!(eur[1].value, "24,090");
    }

    #[test]
    fn test_short_row_skips_missing_currency_only() {
        let block = block_of("Datum|1 AUD|1 EUR\n02.01.2024|15,238|24,115\n03.01.2024|15,255\n");
        let header = CurrencyHeader::parse(block.header_line()).unwrap();

        let parsed = parse_rows(&block, &header);

        let (_, aud) = &parsed.observations[0];
        let (_, eur) = &parsed.observations[1];
        assert_eq!(aud.len(), 2);
        assert_eq!(eur.len(), 1);
        assert_eq!(eur[0].date, "02.01.2024");
    }

    #[test]
    fn test_repeated_header_sentinel_truncates_block() {
        let block = block_of(
            "Datum|1 EUR\n02.01.2024|24,115\n Datum|1 EUR\n03.01.2024|24,090\n",
        );
        let header = CurrencyHeader::parse(block.header_line()).unwrap();

        let parsed = parse_rows(&block, &header);

        let (_, eur) = &parsed.observations[0];
        assert_eq!(eur.len(), 1);
        assert_eq!(eur[0].date, "02.01.2024");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let block = block_of("Datum|1 EUR\n02.01.2024|24,115\n\n");
        let header = CurrencyHeader::parse(block.header_line()).unwrap();

        let parsed = parse_rows(&block, &header);

        let (_, eur) = &parsed.observations[0];
        assert_eq!(eur.len(), 1);
    }

    #[test]
    fn test_sentinel_predicate() {
        assert!(is_repeated_header("Datum"));
        assert!(is_repeated_header("  Datum "));
        assert!(!is_repeated_header("02.01.2024"));
    }
}
