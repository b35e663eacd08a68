use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters sent with every crawl job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOptions {
    /// Maximum number of pages crawled per search
    pub limit: u32,
    /// Content formats requested for each page
    pub formats: Vec<String>,
    /// Delay between job status checks
    pub poll_interval: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            limit: 15,
            formats: vec!["html".to_string(), "links".to_string()],
            poll_interval: Duration::from_secs(5),
        }
    }
}
