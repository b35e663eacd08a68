pub mod firecrawl;
pub mod html;
pub mod traits;
pub mod types;

pub use firecrawl::FirecrawlCrawler;
pub use traits::Crawler;
pub use types::CrawlOptions;
