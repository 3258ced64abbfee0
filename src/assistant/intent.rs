//! Question intent classification
//!
//! Keyword containment over a fixed, ordered rule table. The first rule
//! with a matching keyword wins, so "salary and attrition" is a salary
//! question.

use serde::Serialize;
use std::fmt;

/// Purpose of a free-text HR question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SalaryQuery,
    AttritionQuery,
    TopPerformerQuery,
    EngagementQuery,
    Unrecognized,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::SalaryQuery => write!(f, "salary"),
            Intent::AttritionQuery => write!(f, "attrition"),
            Intent::TopPerformerQuery => write!(f, "top_performer"),
            Intent::EngagementQuery => write!(f, "engagement"),
            Intent::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// One classification rule: any keyword contained in the lower-cased
/// question selects `intent`.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub keywords: &'static [&'static str],
    pub intent: Intent,
}

impl IntentRule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

/// Rules in priority order
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &["salary"],
        intent: Intent::SalaryQuery,
    },
    IntentRule {
        keywords: &["attrition"],
        intent: Intent::AttritionQuery,
    },
    IntentRule {
        keywords: &["top performer", "highest performance"],
        intent: Intent::TopPerformerQuery,
    },
    IntentRule {
        keywords: &["engagement"],
        intent: Intent::EngagementQuery,
    },
];

pub struct IntentClassifier {
    rules: &'static [IntentRule],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            rules: INTENT_RULES,
        }
    }

    pub fn rules(&self) -> &'static [IntentRule] {
        self.rules
    }

    pub fn classify(&self, question: &str) -> Intent {
        let normalized = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Unrecognized)
    }
}

/// Classify with the standard rule table
pub fn classify(question: &str) -> Intent {
    IntentClassifier::new().classify(question)
}
