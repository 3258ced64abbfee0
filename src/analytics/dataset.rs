//! DataSet
//!
//! Immutable, ordered view over validated employee records. Filtering never
//! mutates; it always produces a new `DataSet`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{EmployeeRecord, RawEmployee, Result};

/// Filter selection applied to the employee table
///
/// - `country`: exact match, or every country when `None`
/// - `departments`: membership; an empty set selects every department
/// - `attrited_only`: keep only `attrition = Yes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetFilter {
    pub country: Option<String>,
    pub departments: BTreeSet<String>,
    pub attrited_only: bool,
}

impl DataSetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    pub fn attrited_only(mut self, attrited_only: bool) -> Self {
        self.attrited_only = attrited_only;
        self
    }

    /// Whether a record passes this filter
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        if let Some(country) = &self.country
            && record.country != *country
        {
            return false;
        }
        if !self.departments.is_empty() && !self.departments.contains(&record.dept) {
            return false;
        }
        if self.attrited_only && !record.attrition.is_yes() {
            return false;
        }
        true
    }

    /// Short human-readable description for headers and logs
    pub fn describe(&self) -> String {
        let country = self.country.as_deref().unwrap_or("All countries");
        let depts = if self.departments.is_empty() {
            "all departments".to_string()
        } else {
            self.departments
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut text = format!("{} | {}", country, depts);
        if self.attrited_only {
            text.push_str(" | attrited only");
        }
        text
    }
}

/// Ordered, immutable sequence of employee records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    records: Vec<EmployeeRecord>,
}

impl DataSet {
    /// Build from already-validated records
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    /// Build from raw rows, rejecting the first malformed row.
    ///
    /// Row numbers in errors are 1-based positions in `rows`.
    pub fn from_raw<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawEmployee>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.validate(idx + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    pub fn filter(&self, filter: &DataSetFilter) -> DataSet {
        DataSet {
            records: self
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect(),
        }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct departments in alphabetical order
    pub fn departments(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.dept.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct countries in alphabetical order
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a EmployeeRecord;
    type IntoIter = std::slice::Iter<'a, EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
