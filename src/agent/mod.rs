pub mod context;
pub mod conversation;

pub use context::SearchContext;
pub use conversation::{Conversation, ConversationState};

use crate::crawl::Crawler;
use crate::error::SearchError;
use crate::extract::extract_all;
use crate::format::{format_response, search_failed};
use crate::interpreter::interpret;
use crate::llm::CriteriaExtractor;
use crate::matcher::filter_matching;
use crate::models::{Criteria, Listing, SearchResult};
use crate::search_url::DEFAULT_SITE_URL;
use tracing::{error, info, warn};

/// Runs searches against one rental site: query in, readable answer out
pub struct HousingSearchAgent {
    site_url: String,
    crawler: Box<dyn Crawler>,
    extractor: Box<dyn CriteriaExtractor>,
}

impl HousingSearchAgent {
    pub fn new(crawler: Box<dyn Crawler>, extractor: Box<dyn CriteriaExtractor>) -> Self {
        Self::with_site_url(DEFAULT_SITE_URL, crawler, extractor)
    }

    pub fn with_site_url(
        site_url: impl Into<String>,
        crawler: Box<dyn Crawler>,
        extractor: Box<dyn CriteriaExtractor>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            crawler,
            extractor,
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn extractor(&self) -> &dyn CriteriaExtractor {
        self.extractor.as_ref()
    }

    /// Answer a free-text query. Never fails; errors become the reply.
    pub async fn search_housing(&self, query: &str) -> String {
        match self.search(query).await {
            Ok((context, result)) => render(&context, &result),
            Err(SearchError::CriteriaParse(e)) => {
                warn!("Could not parse query: {}", e.cause());
                e.to_string()
            }
            Err(e) => {
                error!("Error in search_housing: {}", e);
                e.to_string()
            }
        }
    }

    /// Interpret a free-text query and run the search it describes
    pub async fn search(&self, query: &str) -> Result<(SearchContext, SearchResult), SearchError> {
        let criteria = interpret(self.extractor.as_ref(), query).await?;
        Ok(self.execute_search(criteria).await)
    }

    /// Answer for already validated criteria
    pub async fn search_with_criteria(&self, criteria: Criteria) -> String {
        let (context, result) = self.execute_search(criteria).await;
        render(&context, &result)
    }

    /// Resolve, crawl, extract and filter. Crawl failures are folded into the result.
    pub async fn execute_search(&self, criteria: Criteria) -> (SearchContext, SearchResult) {
        let context = SearchContext::new(&self.site_url, criteria);
        info!("Starting housing search: {}", context.search_url);

        let result = match self.find_listings(&context).await {
            Ok(listings) => {
                info!("Found {} matching listings", listings.len());
                SearchResult::success(context.criteria.clone(), context.search_url.clone(), listings)
            }
            Err(e) => {
                error!("Error during housing search: {}", e);
                SearchResult::failure(
                    context.criteria.clone(),
                    context.search_url.clone(),
                    e.to_string(),
                )
            }
        };

        (context, result)
    }

    async fn find_listings(
        &self,
        context: &SearchContext,
    ) -> Result<Vec<Listing>, SearchError> {
        let fragments = self
            .crawler
            .crawl(&context.search_url)
            .await
            .map_err(|source| SearchError::Crawl {
                search_url: context.search_url.clone(),
                source,
            })?;

        let candidates = extract_all(&fragments, &context.criteria, &self.site_url);
        info!(
            "{} returned {} pages, {} candidate listings",
            self.crawler.source_name(),
            fragments.len(),
            candidates.len()
        );

        Ok(filter_matching(candidates, &context.criteria))
    }
}

fn render(context: &SearchContext, result: &SearchResult) -> String {
    if result.is_success() {
        format_response(&result.listings, &context.search_url)
    } else {
        search_failed(&context.search_url)
    }
}
