use crate::models::PageFragment;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for crawl collaborators feeding the listing pipeline
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Crawl from `url` and return one fragment per page, in crawl order
    async fn crawl(&self, url: &str) -> Result<Vec<PageFragment>>;

    /// Get the name of the crawl service
    fn source_name(&self) -> &'static str;
}
