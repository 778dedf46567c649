//! Parsing of the CNB pipe-delimited year feed
//!
//! The feed is one text payload per calendar year. Each payload holds one or
//! more header-delimited blocks; the bank starts a new block whenever the
//! published currency list changes mid-year, so blocks may cover different
//! currency sets.

pub mod header;
pub mod normalize;
pub mod rows;
pub mod splitter;

pub use header::{CurrencyHeader, HeaderEntry, FIELD_DELIMITER};
pub use normalize::{normalize, parse_date, parse_rate, DATE_FORMAT};
pub use rows::{is_repeated_header, parse_rows, BlockObservations, RawObservation};
pub use splitter::{split_payload, split_payloads, RawBlock, HEADER_TOKEN};
