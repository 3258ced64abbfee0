//! Turns a classified question into a one-line answer

use super::intent::{Intent, IntentClassifier};
use crate::analytics::{self, DataSet};
use crate::types::format_currency;

pub const GUIDANCE: &str =
    "I'm still learning. Please ask about salary, performance, attrition, or engagement.";

/// Answer `intent` over `ds`. Never fails; an empty selection yields a
/// "no data" sentence instead of a metric.
pub fn respond(intent: Intent, ds: &DataSet) -> String {
    match intent {
        Intent::SalaryQuery => match analytics::average_salary(ds) {
            Some(avg) => format!("The average salary is {}.", format_currency(avg)),
            None => "No salary data for the current selection.".to_string(),
        },
        Intent::AttritionQuery => match analytics::top_attrition_dept(ds) {
            Some(dept) => format!("Highest attrition is in {} department.", dept),
            None => "No attrition data for the current selection.".to_string(),
        },
        Intent::TopPerformerQuery => {
            let names = analytics::top_performers(ds);
            if names.is_empty() {
                "No performance data for the current selection.".to_string()
            } else {
                format!("Top performer(s): {}", names.join(", "))
            }
        }
        Intent::EngagementQuery => match analytics::most_engaged_dept(ds) {
            Some(dept) => format!("Most engaged department is {}.", dept),
            None => "No engagement data for the current selection.".to_string(),
        },
        Intent::Unrecognized => GUIDANCE.to_string(),
    }
}

/// Classify `question` and answer it over `ds`
pub fn answer(question: &str, ds: &DataSet) -> (Intent, String) {
    let intent = IntentClassifier::new().classify(question);
    tracing::debug!("Question classified as {}", intent);
    (intent, respond(intent, ds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::dataset::fixtures::employee;
    use crate::types::Attrition;

    fn sample() -> DataSet {
        DataSet::new(vec![
            employee("Asha", "India", "Sales", 60000.0, Attrition::Yes, 3.0, 5),
            employee("Ravi", "India", "Sales", 70500.0, Attrition::Yes, 3.5, 3),
            employee("Meera", "India", "R&D", 65250.0, Attrition::No, 4.5, 5),
        ])
    }

    #[test]
    fn test_salary_answer_formats_currency() {
        let answer = respond(Intent::SalaryQuery, &sample());
        assert_eq!(answer, "The average salary is $65,250.");
    }

    #[test]
    fn test_attrition_answer() {
        assert_eq!(
            respond(Intent::AttritionQuery, &sample()),
            "Highest attrition is in Sales department."
        );
    }

    #[test]
    fn test_top_performer_answer_lists_all_ties() {
        assert_eq!(
            respond(Intent::TopPerformerQuery, &sample()),
            "Top performer(s): Asha, Meera"
        );
    }

    #[test]
    fn test_engagement_answer() {
        assert_eq!(
            respond(Intent::EngagementQuery, &sample()),
            "Most engaged department is R&D."
        );
    }

    #[test]
    fn test_unrecognized_gives_guidance() {
        let (intent, text) = answer("how is morale", &sample());
        assert_eq!(intent, Intent::Unrecognized);
        assert_eq!(text, GUIDANCE);
    }

    #[test]
    fn test_empty_dataset_never_fails() {
        let empty = DataSet::default();
        for intent in [
            Intent::SalaryQuery,
            Intent::AttritionQuery,
            Intent::TopPerformerQuery,
            Intent::EngagementQuery,
        ] {
            let text = respond(intent, &empty);
            assert!(text.starts_with("No "), "{intent}: {text}");
        }
        assert_eq!(respond(Intent::Unrecognized, &empty), GUIDANCE);
    }

    #[test]
    fn test_answer_routes_by_priority() {
        let (intent, text) = answer("Salary vs attrition?", &sample());
        assert_eq!(intent, Intent::SalaryQuery);
        assert!(text.contains("$65,250"));
    }
}
