//! Insight prompt template

use std::fmt;

use crate::analytics::{self, DataSet};
use crate::types::{format_optional, round_to};

/// Workforce figures embedded in the insight prompt
#[derive(Debug, Clone, PartialEq)]
pub struct InsightPrompt {
    pub total_employees: usize,
    pub attrition_rate_pct: f64,
    pub avg_engagement: Option<f64>,
    pub avg_performance: Option<f64>,
}

impl InsightPrompt {
    pub fn from_dataset(ds: &DataSet) -> Self {
        Self {
            total_employees: ds.len(),
            attrition_rate_pct: analytics::attrition_rate_pct(ds),
            avg_engagement: analytics::average_engagement(ds),
            avg_performance: analytics::average_perf_score(ds),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InsightPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "You are an HR data analyst. Here's the data:")?;
        writeln!(f, "- Total Employees: {}", self.total_employees)?;
        writeln!(
            f,
            "- Attrition Rate: {:.2}%",
            round_to(self.attrition_rate_pct, 2)
        )?;
        writeln!(
            f,
            "- Avg Engagement: {}",
            format_optional(self.avg_engagement, 2)
        )?;
        writeln!(
            f,
            "- Avg Performance: {}",
            format_optional(self.avg_performance, 2)
        )?;
        writeln!(f)?;
        write!(
            f,
            "Give 3 key insights around attrition, engagement, and performance."
        )
    }
}
