//! # cnb-fx
//!
//! A pipeline from the Czech National Bank's pipe-delimited exchange-rate
//! feed to queryable stores and ranked statistics.
//!
//! The feed arrives as one text payload per calendar year, each holding
//! header-delimited blocks whose currency list can change mid-year. The
//! pipeline splits payloads into blocks, parses headers and rows, normalizes
//! locale-formatted rates by their quotation units, merges everything into
//! per-currency series, restricts them to a four-month reporting window and
//! computes ranked percent-change and volatility reports.
//!
//! ## Example
//!
//! ```rust
//! use cnb_fx::prelude::*;
//!
//! let payload = "Datum|1 EUR|100 JPY\n\
//!                02.01.2024|24,115|17,123\n\
//!                03.01.2024|24,090|17,050\n"
//!     .to_string();
//!
//! let series = build_series(&[payload])?;
//! let report = percent_change_report(&series);
//! assert_eq!(report.entries.len(), 2);
//! # Ok::<(), cnb_fx::error::FxError>(())
//! ```

pub mod error;
pub mod feed;
pub mod pipeline;
pub mod series;
pub mod sources;
pub mod stats;
pub mod store;
pub mod types;
pub mod window;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::error::{FxError, Result};
    pub use crate::feed::{split_payloads, CurrencyHeader, RawBlock};
    pub use crate::pipeline::{build_series, windowed_series};
    pub use crate::series::{RateSeries, SeriesEntry};
    pub use crate::stats::{percent_change_report, std_dev_report, StatReport};
    pub use crate::types::{CurrencyCode, Observation, Rate, Unit};
    pub use crate::window::{parse_month_filter, WindowSpec};
}
