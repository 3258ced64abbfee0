//! AI insight generation
//!
//! Failures of the external collaborator stay here: the caller always gets
//! an `InsightOutcome`, never an error.

use std::time::Duration;
use tracing::{error, info, warn};

use super::prompt::InsightPrompt;
use super::provider::SummaryProvider;
use super::timeout::with_timeout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    /// Trimmed response text
    Generated(String),
    /// Why no insights are available
    Unavailable(String),
}

impl InsightOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

pub async fn generate_insights(
    provider: &dyn SummaryProvider,
    prompt: &InsightPrompt,
    timeout: Duration,
) -> InsightOutcome {
    let text = prompt.render();
    info!(
        "Requesting insights from {} ({})",
        provider.name(),
        provider.model()
    );

    match with_timeout(timeout, provider.complete(&text), "AI insight generation").await {
        Ok(response) => {
            let trimmed = response.trim();
            if trimmed.is_empty() {
                warn!("AI provider returned an empty response");
                InsightOutcome::Unavailable("The AI provider returned no text".to_string())
            } else {
                InsightOutcome::Generated(trimmed.to_string())
            }
        }
        Err(e) if e.is_external() => {
            warn!("AI insight generation failed: {}", e);
            InsightOutcome::Unavailable(e.to_string())
        }
        Err(e) => {
            error!("Unexpected error during AI insight generation: {}", e);
            InsightOutcome::Unavailable(e.to_string())
        }
    }
}
