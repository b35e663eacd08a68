use thiserror::Error;

/// Message shown to the user whenever a query cannot be turned into criteria
pub const CLARIFY_CRITERIA: &str =
    "Please specify location, number of rooms, and maximum monthly rent.";

/// The query could not be converted into valid search criteria.
///
/// Displays as the clarification request; the underlying cause is kept for logs.
#[derive(Debug, Error)]
#[error("{}", CLARIFY_CRITERIA)]
pub struct CriteriaParseError {
    cause: String,
}

impl CriteriaParseError {
    pub fn invalid(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// What actually went wrong (collaborator failure, bad payload, invariant)
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// Failures that abort the current search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    CriteriaParse(#[from] CriteriaParseError),

    /// The crawl collaborator failed for the resolved search URL
    #[error("Crawl of {search_url} failed: {source}")]
    Crawl {
        search_url: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Why a page fragment produced no listing
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ExtractionSkip {
    #[error("fragment has no text")]
    EmptyText,
}

/// Why a listing did not pass the criteria matcher
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchSkip {
    #[error("listing has no price")]
    MissingPrice,
    #[error("listing has no room count")]
    MissingBedrooms,
    #[error("listing has no location")]
    MissingLocation,
    #[error("price {price} exceeds ceiling {max_price}")]
    PriceAboveCeiling { price: u64, max_price: u64 },
    #[error("{bedrooms} rooms is below minimum {min_bedrooms}")]
    TooFewBedrooms { bedrooms: u32, min_bedrooms: u32 },
}
