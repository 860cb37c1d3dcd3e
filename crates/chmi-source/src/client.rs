//! HTTP client for the precipitation pages.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use precip_common::{DayTable, PrecipError};

use crate::html;
use crate::PrecipSource;

/// Configuration for [`HppsClient`].
#[derive(Debug, Clone)]
pub struct HppsConfig {
    /// Base URL of the precipitation page.
    pub base_url: String,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// Politeness delay between subpage requests.
    pub page_delay: Duration,
}

impl Default for HppsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hydro.chmi.cz/hppsoldv/hpps_act_rain.php".to_string(),
            request_timeout: Duration::from_secs(30),
            page_delay: Duration::from_millis(500),
        }
    }
}

/// Fetches one day of precipitation data from the paginated CHMI pages.
pub struct HppsClient {
    client: reqwest::Client,
    config: HppsConfig,
}

impl HppsClient {
    /// Create a client with the given configuration.
    pub fn new(config: HppsConfig) -> Result<Self, PrecipError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PrecipError::InternalError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn fetch_page(&self, offset: u32, page: u32) -> Result<String, PrecipError> {
        let url = format!(
            "{}?day_offset={}&startpage={}",
            self.config.base_url, offset, page
        );

        debug!(url = %url, "Fetching precipitation page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(PrecipError::SourceError(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }

        response.text().await.map_err(map_request_error)
    }
}

fn map_request_error(err: reqwest::Error) -> PrecipError {
    if err.is_timeout() {
        PrecipError::Timeout
    } else {
        PrecipError::SourceError(err.to_string())
    }
}

#[async_trait]
impl PrecipSource for HppsClient {
    #[instrument(skip(self))]
    async fn fetch_day(&self, offset: u32) -> Result<DayTable, PrecipError> {
        let first = self.fetch_page(offset, 1).await?;

        let pages = html::extract_page_count(&first)?;
        let date = html::extract_measurement_date(&first)?;

        info!(pages, date = %date, "Downloading precipitation pages");

        let mut rows = html::parse_rows(&first)?;
        for page in 2..=pages {
            tokio::time::sleep(self.config.page_delay).await;
            let body = self.fetch_page(offset, page).await?;
            rows.extend(html::parse_rows(&body)?);
        }

        info!(date = %date, stations = rows.len(), "Fetched day table");

        Ok(DayTable::new(date, rows))
    }
}
