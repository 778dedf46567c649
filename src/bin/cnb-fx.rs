//! cnb-fx CLI - Command-line interface for the CNB exchange-rate pipeline
//!
//! Provides commands for pulling the feed into the local stores and for
//! printing ranked statistics over a reporting window.
//!
//! ## Example Usage
//!
//! ```bash
//! # Fetch the feed and persist both storage tiers
//! cnb-fx pull --currency EUR
//!
//! # Ranked reports for the four months starting March 2023
//! cnb-fx report --date 03.2023
//!
//! # Show configured paths and store contents
//! cnb-fx info
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use cnb_fx::error::{FxError, Result as FxResult};
use cnb_fx::pipeline::build_series;
use cnb_fx::series::RateSeries;
use cnb_fx::sources::CnbSource;
use cnb_fx::stats::{percent_change_report, std_dev_report, StatReport};
use cnb_fx::store::{documents, scaled_rows, window_rows, DocumentStore, RateDb};
use cnb_fx::window::{parse_month_filter, WindowSpec};

/// cnb-fx: CNB exchange-rate pipeline
#[derive(Parser)]
#[command(name = "cnb-fx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch, store and analyze CNB exchange rates", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reporting window as MM.YYYY (defaults to the last four months)
    #[arg(short, long, global = true)]
    date: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed and persist both storage tiers
    Pull {
        /// Currency for the scaled base-100 table
        #[arg(long, default_value = "EUR")]
        currency: String,

        /// Parse local payload files (oldest first) instead of fetching
        #[arg(long, value_name = "FILE", num_args = 1..)]
        offline: Option<Vec<PathBuf>>,
    },

    /// Print ranked percent-change and volatility reports
    Report {
        /// Parse local payload files (oldest first) instead of fetching
        #[arg(long, value_name = "FILE", num_args = 1..)]
        offline: Option<Vec<PathBuf>>,
    },

    /// Show configured paths and store contents
    Info,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
    #[serde(default = "default_document_store")]
    document_store: PathBuf,
    #[serde(default = "default_database")]
    database: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cnb-fx")
}

fn default_document_store() -> PathBuf {
    default_data_dir().join("currency_data.json")
}

fn default_database() -> PathBuf {
    default_data_dir().join("rates.sqlite")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            document_store: default_document_store(),
            database: default_database(),
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        let candidate = path
            .map(Path::to_path_buf)
            .or_else(|| dirs::home_dir().map(|home| home.join(".cnb-fx").join("config.toml")));

        if let Some(config_path) = candidate {
            if config_path.exists() {
                match fs::read_to_string(&config_path) {
                    Ok(contents) => match toml::from_str(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                        }
                    },
                    Err(e) => {
                        eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                    }
                }
            }
        }

        Config::default()
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());
    if let Err(e) = config.ensure_dirs() {
        eprintln!("{} Failed to create data directory: {}", "Error:".red().bold(), e);
        process::exit(1);
    }

    let today = chrono::Local::now().date_naive();
    let filter = cli.date.as_deref().and_then(|raw| {
        let parsed = parse_month_filter(raw, today);
        if parsed.is_none() {
            eprintln!(
                "{} Ignoring invalid --date {:?} (expected MM.YYYY, month 1-12, year not in the future)",
                "Warning:".yellow(),
                raw
            );
        }
        parsed
    });
    let window = WindowSpec::resolve(filter, today);

    if cli.verbose {
        println!("{} v{}", "cnb-fx".cyan().bold(), env!("CARGO_PKG_VERSION"));
        println!(
            "Window: {} to {}",
            window.start.to_string().dimmed(),
            window.end.to_string().dimmed()
        );
    }

    let result = match cli.command {
        Commands::Pull { currency, offline } => pull(&config, &window, &currency, offline, cli.verbose),
        Commands::Report { offline } => report(&window, offline),
        Commands::Info => info(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Obtain the ordered payload sequence: local files when `--offline` is
/// given, otherwise one HTTP fetch per year the window touches.
fn load_payloads(window: &WindowSpec, offline: Option<Vec<PathBuf>>) -> FxResult<Vec<String>> {
    match offline {
        Some(paths) => paths
            .iter()
            .map(|path| fs::read_to_string(path).map_err(FxError::from))
            .collect(),
        None => {
            let source = CnbSource::new()?;
            let years: Vec<i32> = window.years().collect();

            let bar = ProgressBar::new(years.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner} fetching {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| FxError::FetchError(format!("Failed to start runtime: {}", e)))?;

            let mut payloads = Vec::with_capacity(years.len());
            for year in years {
                bar.set_message(year.to_string());
                payloads.push(runtime.block_on(source.fetch_year(year))?);
                bar.inc(1);
            }
            bar.finish_and_clear();
            Ok(payloads)
        }
    }
}

fn build_windowed(payloads: &[String], window: &WindowSpec) -> FxResult<(RateSeries, RateSeries)> {
    let mut full = build_series(payloads)?;
    full.sort_by_date();
    let windowed = full.filter_window(window);
    Ok((full, windowed))
}

fn pull(
    config: &Config,
    window: &WindowSpec,
    currency: &str,
    offline: Option<Vec<PathBuf>>,
    verbose: bool,
) -> FxResult<()> {
    let payloads = load_payloads(window, offline)?;
    let (full, windowed) = build_windowed(&payloads, window)?;

    // The series is complete in memory before any store is touched.
    let store = DocumentStore::new(&config.document_store);
    store.replace(&documents(&full))?;

    let mut db = RateDb::new(&config.database)?;
    db.store_window(&window_rows(&windowed))?;

    match scaled_rows(&windowed, currency) {
        Ok(rows) => db.store_scaled(&rows)?,
        Err(e) => {
            eprintln!("{} Skipping scaled table: {}", "Warning:".yellow(), e);
        }
    }

    println!(
        "{} {} currencies, {} observations ({} in window)",
        "Stored".green().bold(),
        full.len(),
        full.observation_count(),
        windowed.observation_count()
    );
    if verbose {
        println!("Document store: {}", config.document_store.display());
        println!("Database:       {}", config.database.display());
    }
    Ok(())
}

fn print_report(title: &str, report: &StatReport, suffix: &str) {
    println!("\n{}", title.bold());
    for (rank, entry) in report.entries.iter().enumerate() {
        match entry.value {
            Some(value) => println!("{:>3}. {}  {:>10.3}{}", rank + 1, entry.code, value, suffix),
            None => println!("{:>3}. {}  {:>10}", rank + 1, entry.code, "n/a".dimmed()),
        }
    }
}

fn report(window: &WindowSpec, offline: Option<Vec<PathBuf>>) -> FxResult<()> {
    let payloads = load_payloads(window, offline)?;
    let (_, windowed) = build_windowed(&payloads, window)?;

    if windowed.is_empty() {
        println!("No currencies found in the feed.");
        return Ok(());
    }

    println!(
        "Window: {} to {} (inclusive)",
        window.start.format("%d.%m.%Y"),
        window.end.format("%d.%m.%Y")
    );
    print_report("Percent change (descending)", &percent_change_report(&windowed), " %");
    print_report("Standard deviation (ascending)", &std_dev_report(&windowed), "");
    Ok(())
}

fn info(config: &Config) -> FxResult<()> {
    println!("{}", "cnb-fx configuration".bold());
    println!("Data dir:       {}", config.data_dir.display());
    println!("Document store: {}", config.document_store.display());
    println!("Database:       {}", config.database.display());

    let store = DocumentStore::new(&config.document_store);
    match store.read_all() {
        Ok(docs) => println!("Documents:      {}", docs.len()),
        Err(_) => println!("Documents:      {}", "none".dimmed()),
    }

    if config.database.exists() {
        let db = RateDb::new(&config.database)?;
        println!(
            "Window rows:    {}",
            db.count(cnb_fx::store::WINDOW_TABLE)?
        );
        println!(
            "Scaled rows:    {}",
            db.count(cnb_fx::store::SCALED_TABLE)?
        );
    } else {
        println!("Database:       {}", "not created yet".dimmed());
    }
    Ok(())
}
