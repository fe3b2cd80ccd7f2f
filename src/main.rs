use anyhow::Result;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info, warn};

mod config;
mod merge;
mod models;
mod parsers;
mod scrapers;
mod storage;
mod utils;

use crate::config::Config;
use crate::merge::{merge, MergeOutcome};
use crate::scrapers::{CzcScraper, ListingScraper};
use crate::storage::{DelimitedFileStore, TableStore};
use crate::utils::http::FetchError;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gpu_price_tracker=info".parse()?),
        )
        .init();

    info!("Starting GPU price tracker");

    let config = Arc::new(Config::load()?);
    let client = utils::http::create_client(&config)?;
    let scraper = CzcScraper::new(config.clone());
    let store = DelimitedFileStore::new(&config.output_path);
    let today = Local::now().date_naive();
    info!("Run date {}, price log {}", today, store.path().display());

    match run_once(&scraper, &store, &client, today).await {
        Ok(_) => Ok(()),
        Err(e) => match e.downcast_ref::<FetchError>() {
            Some(fetch_error) => {
                error!("{}. Aborting!", fetch_error);
                std::process::exit(1);
            }
            None => Err(e),
        },
    }
}

/// Scrapes today's prices and appends them to the stored table.
async fn run_once(
    scraper: &dyn ListingScraper,
    store: &dyn TableStore,
    client: &Client,
    date: NaiveDate,
) -> Result<MergeOutcome> {
    let snapshot = scraper.scrape(client, date).await?;
    info!("Scraped {} products from {}", snapshot.len(), scraper.name());
    if snapshot.is_empty() {
        warn!("No products scraped, the new column will be empty");
    }

    let mut table = store.load().await?;

    let outcome = merge(&mut table, &snapshot);
    match outcome {
        MergeOutcome::AlreadyRecorded => {
            info!("Data already scraped today ({}). Discarding...", snapshot.date_label());
        }
        MergeOutcome::Appended { added, missing } => {
            info!(
                "Recorded {} prices for {}: {} new products, {} no longer listed",
                snapshot.len(),
                snapshot.date_label(),
                added,
                missing
            );
            store.save(&table).await?;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing(products: &[(&str, u32)]) -> String {
        let tiles: String = products
            .iter()
            .enumerate()
            .map(|(i, (name, price))| {
                format!(
                    r#"<div class="new-tile" data-ga-impression='{{"id":"{}","brand":"b","name":"{}","category":"c","price":{},"list":"l"}}'></div>"#,
                    i, name, price
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", tiles)
    }

    async fn serve(server: &MockServer, products: &[(&str, u32)]) {
        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/graficke-karty/produkty"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing(products)))
            .mount(server)
            .await;
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn test_daily_runs_build_price_log() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("gpu_price-log.csv");
        let config = Arc::new(Config {
            base_url: server.uri(),
            retry_backoff_ms: 0,
            ..Config::load().unwrap()
        });
        let scraper = CzcScraper::new(config);
        let store = DelimitedFileStore::new(&log_path);
        let client = Client::new();

        serve(&server, &[("RTX 4090", 45000)]).await;
        let outcome = run_once(&scraper, &store, &client, day(1)).await.unwrap();
        assert_eq!(outcome, MergeOutcome::Appended { added: 1, missing: 0 });
        let first = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(first, "RTX 4090;45000\nDate;2024-01-01\n");

        serve(&server, &[("RTX 4090", 44000)]).await;
        let outcome = run_once(&scraper, &store, &client, day(1)).await.unwrap();
        assert_eq!(outcome, MergeOutcome::AlreadyRecorded);
        assert_eq!(std::fs::read_to_string(&log_path).unwrap(), first);

        serve(&server, &[("RTX 4090", 44000), ("RX 7900", 39000)]).await;
        run_once(&scraper, &store, &client, day(2)).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap(),
            "RTX 4090;45000;44000\nRX 7900;;39000\nDate;2024-01-01;2024-01-02\n"
        );

        serve(&server, &[("RX 7900", 38500)]).await;
        let outcome = run_once(&scraper, &store, &client, day(3)).await.unwrap();
        assert_eq!(outcome, MergeOutcome::Appended { added: 0, missing: 1 });
        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap(),
            "RTX 4090;45000;44000;\nRX 7900;;39000;38500\nDate;2024-01-01;2024-01-02;2024-01-03\n"
        );
    }

    #[tokio::test]
    async fn test_unreachable_shop_leaves_log_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("gpu_price-log.csv");
        std::fs::write(&log_path, "RTX 4090;45000\nDate;2024-01-01\n").unwrap();
        let config = Arc::new(Config {
            base_url: server.uri(),
            retry_backoff_ms: 0,
            max_retries: 1,
            ..Config::load().unwrap()
        });

        let err = run_once(
            &CzcScraper::new(config),
            &DelimitedFileStore::new(&log_path),
            &Client::new(),
            day(2),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Exhausted { attempts: 2, .. })
        ));
        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap(),
            "RTX 4090;45000\nDate;2024-01-01\n"
        );
    }
}
