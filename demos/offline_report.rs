//! Parse an embedded feed snippet and print both ranked reports.
//!
//! ```bash
//! cargo run --example offline_report
//! ```

use cnb_fx::prelude::*;

const PAYLOAD: &str = "\
Datum|1 EUR|100 JPY|1 USD
02.01.2024|24,115|17,123|22,800
15.01.2024|24,090|17,050|22,950
01.02.2024|24,200|17,200|23,100
15.02.2024|24,300|17,100|23,050
";

fn main() -> Result<()> {
    let window = WindowSpec::new(
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
    );

    let series = windowed_series(&[PAYLOAD.to_string()], &window)?;

    println!("Percent change (descending):");
    for entry in percent_change_report(&series).entries {
        match entry.value {
            Some(value) => println!("  {}  {:+.3} %", entry.code, value),
            None => println!("  {}  n/a", entry.code),
        }
    }

    println!("\nStandard deviation (ascending):");
    for entry in std_dev_report(&series).entries {
        match entry.value {
            Some(value) => println!("  {}  {:.5}", entry.code, value),
            None => println!("  {}  n/a", entry.code),
        }
    }

    Ok(())
}
