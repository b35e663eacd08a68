use anyhow::Result;
use async_trait::async_trait;

/// Text-understanding service that turns a free-text request into a JSON payload.
///
/// Implementations only relay the payload; validating it is the caller's job.
#[async_trait]
pub trait CriteriaExtractor: Send + Sync {
    /// Run `query` through the service under the given extraction instructions
    async fn extract_criteria(&self, instructions: &str, query: &str) -> Result<String>;

    /// Get the name of the backing service
    fn service_name(&self) -> &'static str;
}
