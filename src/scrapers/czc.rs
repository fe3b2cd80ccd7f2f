use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::models::Snapshot;
use crate::parsers::{extract_products, parse_last_offset, plan_pages};
use crate::scrapers::ListingScraper;
use crate::utils::http::{fetch_with_retry, RetryPolicy};

pub struct CzcScraper {
    config: Arc<Config>,
    policy: RetryPolicy,
}

impl CzcScraper {
    pub fn new(config: Arc<Config>) -> Self {
        let policy = RetryPolicy::from_config(&config);
        Self { config, policy }
    }

    fn collect(&self, html: &str, url: &str, snapshot: &mut Snapshot) -> Result<()> {
        let products = extract_products(
            html,
            &self.config.tile_selector,
            &self.config.impression_attribute,
        )?;
        info!("Found {} products on {}", products.len(), url);

        snapshot.extend(products);
        Ok(())
    }
}

#[async_trait]
impl ListingScraper for CzcScraper {
    async fn scrape(&self, client: &Client, date: NaiveDate) -> Result<Snapshot> {
        let listing_url = self.config.listing_url();
        info!("Scraping {}...", listing_url);

        let first_page = fetch_with_retry(client, &listing_url, &self.policy).await?;

        let pages = match parse_last_offset(&first_page, &self.config.last_page_selector)? {
            Some(last_offset) => plan_pages(
                &listing_url,
                &self.config.page_query_param,
                last_offset,
                self.config.page_size,
            )?,
            None => {
                info!("No last page link, listing fits on a single page");
                Vec::new()
            }
        };
        info!("Listing spans {} pages", pages.len() + 1);

        let mut snapshot = Snapshot::new(date);
        self.collect(&first_page, &listing_url, &mut snapshot)?;

        for url in &pages {
            let html = fetch_with_retry(client, url, &self.policy).await?;
            self.collect(&html, url, &mut snapshot)?;
        }

        info!("Scraped {} distinct products", snapshot.len());
        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "czc.cz"
    }
}
