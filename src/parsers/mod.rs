pub mod impression;
pub mod pagination;

pub use impression::*;
pub use pagination::*;

use scraper::Selector;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("Tile has no {0} attribute")]
    MissingAttribute(String),
    #[error("Impression has no field {index}: {raw}")]
    MissingField { index: usize, raw: String },
    #[error("Field {index} has no value: {field}")]
    MissingValue { index: usize, field: String },
    #[error("Last page link has no numeric offset: {0}")]
    InvalidOffset(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css.to_string()))
}
