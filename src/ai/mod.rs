//! AI Insights
//!
//! Prompt construction, the provider seam and timeout-bounded generation.

pub mod insights;
pub mod prompt;
pub mod provider;
pub mod timeout;

pub use insights::{InsightOutcome, generate_insights};
pub use prompt::InsightPrompt;
pub use provider::{OpenAiProvider, SharedProvider, SummaryProvider, create_provider};
pub use timeout::with_timeout;
