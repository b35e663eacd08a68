use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CriteriaParseError;

/// Property type used when the request does not narrow the search
pub const ANY_PROPERTY_TYPE: &str = "all";

/// Structured housing search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Criteria {
    /// Free-text city name
    pub location: String,
    /// Maximum monthly rent (DKK)
    pub max_price: u64,
    /// Minimum number of rooms
    pub min_bedrooms: u32,
    /// Housing type filter, `"all"` when unrestricted
    pub property_type: String,
    /// Minimum size in square meters
    pub min_size_m2: Option<u32>,
    /// Maximum size in square meters
    pub max_size_m2: Option<u32>,
    /// Require a furnished home
    pub furnished: Option<bool>,
    /// Require the home to be available right away
    pub immediate_availability: Option<bool>,
    /// Require pets to be allowed
    pub pets_allowed: Option<bool>,
}

impl Criteria {
    /// Create criteria with the three required fields and no optional filters
    pub fn new(
        location: impl Into<String>,
        max_price: u64,
        min_bedrooms: u32,
    ) -> Result<Self, CriteriaParseError> {
        let criteria = Self {
            location: location.into(),
            max_price,
            min_bedrooms,
            property_type: ANY_PROPERTY_TYPE.to_string(),
            min_size_m2: None,
            max_size_m2: None,
            furnished: None,
            immediate_availability: None,
            pets_allowed: None,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Narrow the search to one housing type
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = property_type.into();
        self
    }

    /// Require at least this many square meters
    pub fn with_min_size(mut self, min_size_m2: u32) -> Self {
        self.min_size_m2 = Some(min_size_m2);
        self
    }

    /// Check the invariants every search relies on
    pub fn validate(&self) -> Result<(), CriteriaParseError> {
        if self.location.trim().is_empty() {
            return Err(CriteriaParseError::invalid("location is empty"));
        }
        if self.max_price == 0 {
            return Err(CriteriaParseError::invalid("max_price must be positive"));
        }
        Ok(())
    }
}

/// One crawled page as handed over by the crawl collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageFragment {
    /// Extracted page text
    pub text: String,
    /// Outbound links in page order
    pub links: Vec<String>,
}

impl PageFragment {
    pub fn new(text: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            text: text.into(),
            links,
        }
    }
}

/// Candidate rental listing derived from a single page fragment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// First line of the page text, possibly empty
    pub title: String,
    /// Monthly rent (DKK)
    pub price: Option<u64>,
    /// Copied from the criteria, never read from the page
    pub location: Option<String>,
    /// Floor area in square meters
    pub size_m2: Option<u32>,
    /// Number of rooms
    pub bedrooms: Option<u32>,
    /// Always `"apartment"`; the page text is not classified
    pub property_type: String,
    /// Absolute URL of the listing page
    pub listing_url: Option<String>,
}

/// Whether the crawl went through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Success,
    Error,
}

/// Where and when a search ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub search_url: String,
    pub listings_found: usize,
    pub search_date: DateTime<Utc>,
}

/// Outcome of one search invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub status: SearchStatus,
    pub criteria: Criteria,
    pub listings: Vec<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: SearchMetadata,
}

impl SearchResult {
    /// Result of a completed crawl with the listings that matched
    pub fn success(criteria: Criteria, search_url: String, listings: Vec<Listing>) -> Self {
        Self {
            status: SearchStatus::Success,
            criteria,
            metadata: SearchMetadata {
                search_url,
                listings_found: listings.len(),
                search_date: Utc::now(),
            },
            listings,
            error: None,
        }
    }

    /// Result of a search whose crawl failed
    pub fn failure(criteria: Criteria, search_url: String, error: impl Into<String>) -> Self {
        Self {
            status: SearchStatus::Error,
            criteria,
            listings: Vec::new(),
            error: Some(error.into()),
            metadata: SearchMetadata {
                search_url,
                listings_found: 0,
                search_date: Utc::now(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }
}
