use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub listing_path: String,
    pub page_query_param: String,
    pub page_size: u32,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub output_path: String,
    pub user_agent: String,
    pub tile_selector: String,
    pub impression_attribute: String,
    pub last_page_selector: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Fixed behaviour: only built-in defaults, no file or environment sources
        let settings = ::config::Config::builder()
            .set_default("base_url", "https://www.czc.cz")?
            .set_default("listing_path", "/graficke-karty/produkty")?
            .set_default("page_query_param", "q-first")?
            .set_default("page_size", 27i64)?
            .set_default("max_retries", 4i64)?
            .set_default("retry_backoff_ms", 1000i64)?
            .set_default("output_path", "gpu_price-log.csv")?
            .set_default("user_agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36")?
            .set_default("tile_selector", ".new-tile")?
            .set_default("impression_attribute", "data-ga-impression")?
            .set_default("last_page_selector", ".last")?
            .build()
            .context("Failed to assemble configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.page_size > 0, "page_size must be greater than 0");
        Ok(())
    }

    /// URL of the first listing page.
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.listing_path)
    }
}
