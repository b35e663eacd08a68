use crate::models::Criteria;
use crate::search_url::build_search_url;

/// Everything one search resolved before crawling, handed back with its result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchContext {
    pub criteria: Criteria,
    pub search_url: String,
}

impl SearchContext {
    pub fn new(site_url: &str, criteria: Criteria) -> Self {
        let search_url = build_search_url(site_url, &criteria);
        Self {
            criteria,
            search_url,
        }
    }
}
