//! Czech National Bank year-feed retrieval
//!
//! The bank publishes one pipe-delimited text file per calendar year.

use std::time::Duration;

use reqwest::Client;

use crate::error::{FxError, Result};
use crate::window::WindowSpec;

const CNB_BASE_URL: &str =
    "https://www.cnb.cz/cs/financni-trhy/devizovy-trh/kurzy-devizoveho-trhu/kurzy-devizoveho-trhu/rok.txt";

/// CNB exchange-rate feed source (no API key required)
pub struct CnbSource {
    client: Client,
    base_url: String,
}

impl CnbSource {
    /// Create a new CNB feed source
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("cnb-fx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FxError::FetchError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: CNB_BASE_URL.to_string(),
        })
    }

    /// Point the source at a different endpoint (mock servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the raw yearly payload for `year`
    pub async fn fetch_year(&self, year: i32) -> Result<String> {
        let url = format!("{}?rok={}", self.base_url, year);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxError::FetchError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FxError::FetchError(format!(
                "CNB returned error for year {}: {}",
                year,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| FxError::FetchError(format!("Failed to read response: {}", e)))
    }

    /// Fetch every yearly payload the window touches, oldest first, so
    /// boundary months pull the adjacent year too.
    pub async fn fetch_window(&self, window: &WindowSpec) -> Result<Vec<String>> {
        let mut payloads = Vec::new();
        for year in window.years() {
            log::info!("fetching CNB feed for {}", year);
            payloads.push(self.fetch_year(year).await?);
        }
        Ok(payloads)
    }
}
