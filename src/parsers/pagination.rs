use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use url::Url;

use super::{selector, ParseError};

static TRAILING_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"=(\d+)\s*$").expect("Invalid offset regex"));

/// Reads the page-size offset of the last listing page from its link.
///
/// Returns `None` when the page has no last-page link (single-page listing).
pub fn parse_last_offset(html: &str, last_page_selector: &str) -> Result<Option<u32>, ParseError> {
    let document = Html::parse_document(html);
    let last = selector(last_page_selector)?;

    let Some(link) = document.select(&last).next() else {
        return Ok(None);
    };

    let href = link.value().attr("href").unwrap_or_default();
    let offset = TRAILING_OFFSET
        .captures(href)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| ParseError::InvalidOffset(href.to_string()))?;

    Ok(Some(offset))
}

/// Offsets of every listing page after the first one.
///
/// Steps by `page_size` from `page_size` while below `last + page_size`, so a
/// last offset that is not a multiple of the page size still gets its page.
pub fn page_offsets(last_offset: u32, page_size: u32) -> Vec<u32> {
    if page_size == 0 {
        return Vec::new();
    }

    (page_size..last_offset.saturating_add(page_size))
        .step_by(page_size as usize)
        .collect()
}

/// Builds `<listing_url>?<param>=<offset>` for every page after the first.
pub fn plan_pages(
    listing_url: &str,
    param: &str,
    last_offset: u32,
    page_size: u32,
) -> Result<Vec<String>, ParseError> {
    let base = Url::parse(listing_url)?;

    Ok(page_offsets(last_offset, page_size)
        .into_iter()
        .map(|offset| {
            let mut url = base.clone();
            url.query_pairs_mut().append_pair(param, &offset.to_string());
            url.to_string()
        })
        .collect())
}
