use crate::crawl::html::html_to_text;
use crate::crawl::traits::Crawler;
use crate::crawl::types::CrawlOptions;
use crate::models::PageFragment;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CrawlRequest<'a> {
    url: &'a str,
    limit: u32,
    scrape_options: ScrapeOptions<'a>,
}

#[derive(Debug, Serialize)]
struct ScrapeOptions<'a> {
    formats: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CrawlStarted {
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrawlStatus {
    status: String,
    #[serde(default)]
    data: Vec<CrawledPage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrawledPage {
    html: Option<String>,
    markdown: Option<String>,
    #[serde(default)]
    links: Vec<String>,
}

impl CrawledPage {
    fn into_fragment(self) -> PageFragment {
        let text = match (self.html, self.markdown) {
            (Some(html), _) => html_to_text(&html),
            (None, Some(markdown)) => markdown,
            (None, None) => String::new(),
        };
        PageFragment::new(text, self.links)
    }
}

/// Crawl collaborator backed by the Firecrawl REST API
pub struct FirecrawlCrawler {
    client: Client,
    api_key: String,
    base_url: String,
    options: CrawlOptions,
}

impl FirecrawlCrawler {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, DEFAULT_API_URL, CrawlOptions::default())
    }

    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        options: CrawlOptions,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            options,
        })
    }

    async fn start_job(&self, url: &str) -> Result<String> {
        let request = CrawlRequest {
            url,
            limit: self.options.limit,
            scrape_options: ScrapeOptions {
                formats: &self.options.formats,
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/crawl", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to start Firecrawl crawl")?;

        if !response.status().is_success() {
            warn!("Firecrawl returned status: {}", response.status());
            anyhow::bail!("Failed to start crawl: {}", response.status());
        }

        let started: CrawlStarted = response
            .json()
            .await
            .context("Failed to decode crawl job")?;

        match (started.success, started.id) {
            (true, Some(id)) => Ok(id),
            _ => anyhow::bail!(
                "Firecrawl rejected crawl: {}",
                started.error.unwrap_or_else(|| "no job id".to_string())
            ),
        }
    }

    async fn job_status(&self, id: &str) -> Result<CrawlStatus> {
        let response = self
            .client
            .get(format!("{}/v1/crawl/{}", self.base_url, id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to fetch crawl status")?;

        if !response.status().is_success() {
            warn!("Firecrawl returned status: {}", response.status());
            anyhow::bail!("Failed to fetch crawl status: {}", response.status());
        }

        response.json().await.context("Failed to decode crawl status")
    }
}

#[async_trait]
impl Crawler for FirecrawlCrawler {
    async fn crawl(&self, url: &str) -> Result<Vec<PageFragment>> {
        info!("Starting crawl: {}", url);
        let id = self.start_job(url).await?;
        debug!("Crawl job {} started", id);

        loop {
            tokio::time::sleep(self.options.poll_interval).await;

            let status = self.job_status(&id).await?;
            match status.status.as_str() {
                "completed" => {
                    info!("Crawl completed for URL: {} ({} pages)", url, status.data.len());
                    return Ok(status
                        .data
                        .into_iter()
                        .map(CrawledPage::into_fragment)
                        .collect());
                }
                "failed" | "cancelled" => {
                    anyhow::bail!(
                        "Crawl job {} {}: {}",
                        id,
                        status.status,
                        status.error.unwrap_or_default()
                    );
                }
                other => debug!("Crawl job {} is {}", id, other),
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "Firecrawl"
    }
}
