use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use crate::models::Snapshot;

mod czc;

pub use czc::CzcScraper;

#[async_trait]
pub trait ListingScraper: Send + Sync {
    /// Collects every product and price the shop currently lists.
    async fn scrape(&self, client: &Client, date: NaiveDate) -> Result<Snapshot>;
    fn name(&self) -> &str;
}
