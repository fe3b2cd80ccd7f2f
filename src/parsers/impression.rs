use scraper::Html;
use tracing::warn;

use super::{selector, ParseError};

const FIELD_SEPARATOR: &str = ",\"";
const NAME_FIELD: usize = 2;
const PRICE_FIELD: usize = 4;

/// Decodes the product name and price out of a tile's impression attribute.
///
/// The attribute is a JSON-ish object the shop embeds for analytics. It is
/// read positionally: fields are split on `,"`, the value is whatever sits
/// between the first and second `:` of a field.
pub fn parse_impression(raw: &str) -> Result<(String, String), ParseError> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();

    let name = field_value(&fields, NAME_FIELD, raw)?.replace('"', "");
    let price = field_value(&fields, PRICE_FIELD, raw)?.to_string();

    Ok((name, price))
}

fn field_value<'a>(fields: &[&'a str], index: usize, raw: &str) -> Result<&'a str, ParseError> {
    let field = fields.get(index).ok_or_else(|| ParseError::MissingField {
        index,
        raw: raw.to_string(),
    })?;

    field.split(':').nth(1).ok_or_else(|| ParseError::MissingValue {
        index,
        field: field.to_string(),
    })
}

/// Returns every (name, price) pair advertised on a listing page, in page order.
///
/// Tiles whose attribute is missing or malformed are skipped.
pub fn extract_products(
    html: &str,
    tile_selector: &str,
    attribute: &str,
) -> Result<Vec<(String, String)>, ParseError> {
    let document = Html::parse_document(html);
    let tiles = selector(tile_selector)?;

    let mut products = Vec::new();
    for tile in document.select(&tiles) {
        let parsed = tile
            .value()
            .attr(attribute)
            .ok_or_else(|| ParseError::MissingAttribute(attribute.to_string()))
            .and_then(parse_impression);

        match parsed {
            Ok(product) => products.push(product),
            Err(e) => warn!("Skipping product tile: {}", e),
        }
    }

    Ok(products)
}
