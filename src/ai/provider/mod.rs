//! LLM Provider Abstraction
//!
//! Defines the `SummaryProvider` trait: a prompt goes in, plain text comes
//! out. The dashboard only needs one completion per request, so there is no
//! structured-output or streaming surface.

mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::types::{HrError, Result};

/// Text-completion collaborator used for AI insights
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Complete `prompt` and return the raw response text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Shared provider handle
pub type SharedProvider = Arc<dyn SummaryProvider>;

/// Create a shared provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::new(config)?)),
        other => Err(HrError::Config(format!(
            "Unknown provider: {}. Supported: openai",
            other
        ))),
    }
}
