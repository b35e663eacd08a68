pub mod agent;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod format;
pub mod interpreter;
pub mod llm;
pub mod matcher;
pub mod models;
pub mod search_url;
pub mod session;

pub use agent::{Conversation, HousingSearchAgent, SearchContext};
pub use config::Config;
pub use error::{CriteriaParseError, SearchError};
pub use models::{Criteria, Listing, PageFragment, SearchResult};
