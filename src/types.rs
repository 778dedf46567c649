//! Core types and constants

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Currency identifier as published by the bank (ISO 4217 code)
pub type CurrencyCode = String;

/// Quotation unit: how many foreign-currency units the published rate refers to
/// (e.g. JPY is quoted per 100 yen)
pub type Unit = u32;

/// Exchange rate in CZK per a single unit of foreign currency
pub type Rate = f64;

/// One normalized observation of a currency's rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub unit_rate: Rate,
}

impl Observation {
    /// Create a new observation
    pub fn new(date: NaiveDate, unit_rate: Rate) -> Self {
        Self { date, unit_rate }
    }
}
