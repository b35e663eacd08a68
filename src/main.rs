use anyhow::Result;
use rental_scout::crawl::FirecrawlCrawler;
use rental_scout::llm::OpenAiExtractor;
use rental_scout::session::run_session;
use rental_scout::{Config, Conversation, HousingSearchAgent};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("🏠 Rental Scout - Boligportal search assistant");

    let config = Config::from_env()?;

    let crawler = FirecrawlCrawler::with_options(
        config.firecrawl_api_key.clone(),
        config.firecrawl_api_url.clone(),
        config.crawl.clone(),
    )?;
    let extractor = OpenAiExtractor::with_base_url(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    )?;
    let agent = HousingSearchAgent::with_site_url(
        config.site_url.clone(),
        Box::new(crawler),
        Box::new(extractor),
    );
    info!("Agent initialized, searching {}", agent.site_url());

    let mut conversation = Conversation::new(&agent);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_session(
        &mut conversation,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        shutdown,
    )
    .await?;

    info!("Shutting down housing search agent...");
    Ok(())
}
