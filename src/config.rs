use crate::crawl::CrawlOptions;
use crate::search_url::DEFAULT_SITE_URL;
use crate::{crawl, llm};
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub firecrawl_api_key: String,
    pub firecrawl_api_url: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_model: String,
    pub site_url: String,
    pub crawl: CrawlOptions,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Missing environment variable: {}", key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let defaults = CrawlOptions::default();
        let limit = match lookup("CRAWL_LIMIT") {
            Some(v) => v.parse().context("CRAWL_LIMIT must be a valid number")?,
            None => defaults.limit,
        };
        let poll_interval = match lookup("CRAWL_POLL_INTERVAL_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .context("CRAWL_POLL_INTERVAL_SECS must be a valid number")?,
            ),
            None => defaults.poll_interval,
        };

        Ok(Self {
            firecrawl_api_key: required("FIRECRAWL_API_KEY")?,
            firecrawl_api_url: or_default("FIRECRAWL_API_URL", crawl::firecrawl::DEFAULT_API_URL),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_api_url: or_default("OPENAI_API_URL", llm::openai::DEFAULT_API_URL),
            openai_model: or_default("OPENAI_MODEL", llm::openai::DEFAULT_MODEL),
            site_url: or_default("RENTAL_SITE_URL", DEFAULT_SITE_URL),
            crawl: CrawlOptions {
                limit,
                poll_interval,
                ..defaults
            },
        })
    }
}
