use crate::models::{Criteria, ANY_PROPERTY_TYPE};

/// Default rental site all searches are resolved against
pub const DEFAULT_SITE_URL: &str = "https://www.boligportal.dk/en";

/// Path segment shared by search pages and individual listing pages
pub const RENTAL_PATH: &str = "/rental-properties/";

/// Build the canonical search URL for the given criteria.
///
/// The location is only lower-cased and hyphenated; no other escaping is done,
/// so locations with reserved URL characters produce unusable URLs.
pub fn build_search_url(site_url: &str, criteria: &Criteria) -> String {
    let location = criteria.location.to_lowercase().replace(' ', "-");

    let mut url = format!(
        "{}{}{}/{}-rooms",
        site_url.trim_end_matches('/'),
        RENTAL_PATH,
        location,
        criteria.min_bedrooms
    );

    let mut params = vec![format!("max_monthly_rent={}", criteria.max_price)];
    if criteria.property_type != ANY_PROPERTY_TYPE {
        params.push(format!("housing_type={}", criteria.property_type));
    }
    if let Some(min_size) = criteria.min_size_m2 {
        params.push(format!("min_size_m2={}", min_size));
    }

    if !params.is_empty() {
        url.push_str("/?");
        url.push_str(&params.join("&"));
    }

    url
}
