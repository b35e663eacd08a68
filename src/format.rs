use crate::models::Listing;

const UNTITLED: &str = "Unlisted Property";

/// Render matching listings as a numbered, human-readable reply.
///
/// An empty result points the user at the search URL so they can check the
/// site themselves.
pub fn format_response(listings: &[Listing], search_url: &str) -> String {
    if listings.is_empty() {
        return no_results(search_url);
    }

    let mut response = format!("Found {} matching properties:\n\n", listings.len());
    for (i, listing) in listings.iter().enumerate() {
        let title = if listing.title.is_empty() {
            UNTITLED
        } else {
            listing.title.as_str()
        };
        response.push_str(&format!("{}. {}\n", i + 1, title));
        if let Some(price) = listing.price {
            response.push_str(&format!("   Price: {} DKK/month\n", thousands(price)));
        }
        if let Some(size) = listing.size_m2 {
            response.push_str(&format!("   Size: {} m²\n", size));
        }
        if let Some(rooms) = listing.bedrooms {
            response.push_str(&format!("   Rooms: {}\n", rooms));
        }
        if let Some(url) = &listing.listing_url {
            response.push_str(&format!("   Link: {}\n", url));
        }
        response.push('\n');
    }

    response
}

/// Reply used when the search ran but nothing matched
pub fn no_results(search_url: &str) -> String {
    format!(
        "No available properties found matching your criteria. \
         You can check for new listings at:\n{}",
        search_url
    )
}

/// Reply used when the search itself failed
pub fn search_failed(search_url: &str) -> String {
    format!(
        "Sorry, I encountered an error. You can try searching directly at: {}",
        search_url
    )
}

/// `1234567` -> `1,234,567`
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
