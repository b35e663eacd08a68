pub mod rules;

use crate::error::ExtractionSkip;
use crate::models::{Criteria, Listing, PageFragment};
use crate::search_url::RENTAL_PATH;
use tracing::debug;

/// Extraction never infers the property type from page text
pub const EXTRACTED_PROPERTY_TYPE: &str = "apartment";

/// Turn one crawled page into a (possibly sparse) listing.
///
/// Every field is parsed independently; a field that cannot be read is left
/// unset. Only a fragment without text is skipped.
pub fn extract_listing(
    fragment: &PageFragment,
    criteria: &Criteria,
    site_url: &str,
) -> Result<Listing, ExtractionSkip> {
    let text = fragment.text.as_str();
    if text.is_empty() {
        return Err(ExtractionSkip::EmptyText);
    }

    let title = text.lines().next().unwrap_or_default().to_string();

    Ok(Listing {
        title,
        price: rules::price(text),
        location: Some(criteria.location.clone()),
        size_m2: rules::size_m2(text),
        bedrooms: rules::rooms(text),
        property_type: EXTRACTED_PROPERTY_TYPE.to_string(),
        listing_url: resolve_listing_url(&fragment.links, site_url),
    })
}

/// First link pointing at a rental page, made absolute against the site URL
pub fn resolve_listing_url(links: &[String], site_url: &str) -> Option<String> {
    let link = links.iter().find(|link| link.contains(RENTAL_PATH))?;
    if link.starts_with("http") {
        Some(link.clone())
    } else {
        Some(format!("{}{}", site_url.trim_end_matches('/'), link))
    }
}

/// Extract listings from every fragment, dropping the ones that yield nothing
pub fn extract_all(fragments: &[PageFragment], criteria: &Criteria, site_url: &str) -> Vec<Listing> {
    fragments
        .iter()
        .enumerate()
        .filter_map(|(idx, fragment)| match extract_listing(fragment, criteria, site_url) {
            Ok(listing) => Some(listing),
            Err(skip) => {
                debug!("Skipped fragment {}: {}", idx, skip);
                None
            }
        })
        .collect()
}
