pub mod openai;
pub mod traits;

pub use openai::OpenAiExtractor;
pub use traits::CriteriaExtractor;
