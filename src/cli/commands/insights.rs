//! Insights Command
//!
//! Ask the configured LLM for key insights about a selection. Provider
//! failures are reported but never fail the command.

use std::time::Duration;

use crate::ai::{InsightOutcome, InsightPrompt, create_provider, generate_insights};
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, FilterArgs};
use crate::types::{Result, format_optional};

pub async fn run(args: &FilterArgs) -> Result<()> {
    let ctx = CommandContext::load()?;
    let (filter, ds) = ctx.select(args)?;
    let prompt = InsightPrompt::from_dataset(&ds);

    let out = Output::new();
    out.header(&format!("AI HR Insights: {}", filter.describe()));
    out.metric("Total Employees", &prompt.total_employees.to_string());
    out.metric("Attrition Rate", &format!("{:.2}%", prompt.attrition_rate_pct));
    out.metric("Avg Engagement", &format_optional(prompt.avg_engagement, 2));
    out.metric("Avg Performance", &format_optional(prompt.avg_performance, 2));
    println!();

    let outcome = match create_provider(&ctx.config.llm) {
        Ok(provider) => {
            let timeout = Duration::from_secs(ctx.config.llm.timeout_secs);
            generate_insights(provider.as_ref(), &prompt, timeout).await
        }
        Err(e) => {
            tracing::warn!("AI provider unavailable: {}", e);
            InsightOutcome::Unavailable(e.to_string())
        }
    };

    match outcome {
        InsightOutcome::Generated(text) => {
            out.section("Insights");
            println!("{}", text);
        }
        InsightOutcome::Unavailable(reason) => {
            out.warning(&format!("AI insights unavailable: {}", reason));
        }
    }

    Ok(())
}
