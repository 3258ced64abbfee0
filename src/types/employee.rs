//! Employee Records
//!
//! `EmployeeRecord` is the validated, typed row used by every analytics
//! component. Raw rows (CSV cells or SQLite values rendered as text) become
//! records only through [`RawEmployee::validate`], which rejects malformed
//! numeric fields instead of coercing them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{HrError, Result};
use crate::constants::report::NAME_SEPARATOR;

/// Whether an employee has left the company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attrition {
    Yes,
    No,
}

impl Attrition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attrition::Yes => "Yes",
            Attrition::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Attrition::Yes)
    }
}

impl fmt::Display for Attrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Attrition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Attrition::Yes),
            "no" => Ok(Attrition::No),
            _ => Err("expected Yes or No".to_string()),
        }
    }
}

/// One employee row
///
/// Field order matches the column order of the `employees` table and of the
/// full CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub country: String,
    pub dept: String,
    pub salary: f64,
    pub attrition: Attrition,
    pub engagement: f64,
    pub perf_score: u32,
    pub absenteeism_days: u32,
}

/// Unvalidated employee row as read from a CSV file or the store
///
/// Every field is kept as text so that validation can report the exact
/// offending value. `country` is optional because the per-country raw
/// exports do not carry it; the loader stamps it from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmployee {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub dept: String,
    pub salary: String,
    pub attrition: String,
    pub engagement: String,
    pub perf_score: String,
    pub absenteeism_days: String,
}

impl RawEmployee {
    /// Validate into an `EmployeeRecord`
    ///
    /// `row` is the 1-based data row number used in error messages.
    pub fn validate(self, row: usize) -> Result<EmployeeRecord> {
        let id = required_text(row, "id", &self.id)?;
        let name = required_text(row, "name", &self.name)?;
        // Top performers are joined on this separator in the summary export
        if name.contains(NAME_SEPARATOR) {
            return Err(HrError::malformed(
                row,
                "name",
                &self.name,
                format!("must not contain '{}'", NAME_SEPARATOR),
            ));
        }
        let country = required_text(row, "country", self.country.as_deref().unwrap_or(""))?;
        let dept = required_text(row, "dept", &self.dept)?;

        let salary = parse_number(row, "salary", &self.salary)?;
        if salary < 0.0 {
            return Err(HrError::malformed(
                row,
                "salary",
                &self.salary,
                "must not be negative",
            ));
        }

        let attrition = self
            .attrition
            .parse::<Attrition>()
            .map_err(|reason| HrError::malformed(row, "attrition", &self.attrition, reason))?;

        let engagement = parse_number(row, "engagement", &self.engagement)?;
        let perf_score = parse_count(row, "perf_score", &self.perf_score)?;
        let absenteeism_days = parse_count(row, "absenteeism_days", &self.absenteeism_days)?;

        Ok(EmployeeRecord {
            id,
            name,
            country,
            dept,
            salary,
            attrition,
            engagement,
            perf_score,
            absenteeism_days,
        })
    }
}

fn required_text(row: usize, field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HrError::malformed(row, field, value, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn parse_number(row: usize, field: &'static str, value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| HrError::malformed(row, field, value, "not a number"))?;
    if !parsed.is_finite() {
        return Err(HrError::malformed(row, field, value, "not a finite number"));
    }
    Ok(parsed)
}

/// Parse a non-negative whole number. SQLite REAL columns render as
/// `4.0`, so integral floats are accepted.
fn parse_count(row: usize, field: &'static str, value: &str) -> Result<u32> {
    let parsed = parse_number(row, field, value)?;
    if parsed < 0.0 || parsed.fract() != 0.0 || parsed > f64::from(u32::MAX) {
        return Err(HrError::malformed(
            row,
            field,
            value,
            "must be a non-negative whole number",
        ));
    }
    Ok(parsed as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawEmployee {
        RawEmployee {
            id: "E001".to_string(),
            name: "Alice".to_string(),
            country: Some("India".to_string()),
            dept: "Sales".to_string(),
            salary: "52000".to_string(),
            attrition: "No".to_string(),
            engagement: "3.8".to_string(),
            perf_score: "4".to_string(),
            absenteeism_days: "2".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let record = raw().validate(1).unwrap();
        assert_eq!(record.id, "E001");
        assert_eq!(record.salary, 52000.0);
        assert_eq!(record.attrition, Attrition::No);
        assert_eq!(record.perf_score, 4);
        assert_eq!(record.absenteeism_days, 2);
    }

    #[test]
    fn test_validate_accepts_integral_floats() {
        let mut r = raw();
        r.perf_score = "5.0".to_string();
        r.absenteeism_days = " 7.0 ".to_string();
        let record = r.validate(1).unwrap();
        assert_eq!(record.perf_score, 5);
        assert_eq!(record.absenteeism_days, 7);
    }

    #[test]
    fn test_non_numeric_salary_rejected() {
        let mut r = raw();
        r.salary = "lots".to_string();
        match r.validate(4).unwrap_err() {
            HrError::MalformedRecord { row, field, value, .. } => {
                assert_eq!(row, 4);
                assert_eq!(field, "salary");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_salary_rejected() {
        let mut r = raw();
        r.salary = "-1".to_string();
        assert!(matches!(
            r.validate(1),
            Err(HrError::MalformedRecord { field: "salary", .. })
        ));
    }

    #[test]
    fn test_non_numeric_engagement_rejected() {
        let mut r = raw();
        r.engagement = "NaN".to_string();
        assert!(matches!(
            r.validate(1),
            Err(HrError::MalformedRecord { field: "engagement", .. })
        ));
    }

    #[test]
    fn test_fractional_absenteeism_rejected() {
        let mut r = raw();
        r.absenteeism_days = "1.5".to_string();
        assert!(matches!(
            r.validate(1),
            Err(HrError::MalformedRecord { field: "absenteeism_days", .. })
        ));
    }

    #[test]
    fn test_missing_country_rejected() {
        let mut r = raw();
        r.country = None;
        assert!(matches!(
            r.validate(1),
            Err(HrError::MalformedRecord { field: "country", .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut r = raw();
        r.name = "  ".to_string();
        assert!(matches!(
            r.validate(2),
            Err(HrError::MalformedRecord { row: 2, field: "name", .. })
        ));
    }

    #[test]
    fn test_name_with_list_separator_rejected() {
        let mut r = raw();
        r.name = "Doe, Jane".to_string();
        match r.validate(3).unwrap_err() {
            HrError::MalformedRecord { field, value, .. } => {
                assert_eq!(field, "name");
                assert_eq!(value, "Doe, Jane");
            }
            other => panic!("unexpected error: {other}"),
        }

        // a bare comma is fine
        let mut r = raw();
        r.name = "Doe,Jane".to_string();
        assert_eq!(r.validate(3).unwrap().name, "Doe,Jane");
    }

    #[test]
    fn test_attrition_parse() {
        assert_eq!("Yes".parse::<Attrition>().unwrap(), Attrition::Yes);
        assert_eq!(" no ".parse::<Attrition>().unwrap(), Attrition::No);
        assert!("maybe".parse::<Attrition>().is_err());
        assert_eq!(Attrition::Yes.to_string(), "Yes");
    }
}
