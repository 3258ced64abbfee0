//! Summary report
//!
//! A fixed six-field snapshot of a filtered selection, exported as a
//! one-row CSV with a header.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::analytics::{self, DataSet};
use crate::constants::report::{FILE_PREFIX, NAME_SEPARATOR};
use crate::types::{HrError, Result};

/// Export column names, in order
pub const COLUMNS: [&str; 6] = [
    "Total Employees",
    "Average Salary",
    "Attrition Rate (%)",
    "Highest Attrition Dept",
    "Most Engaged Dept",
    "Top Performer(s)",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub total_employees: usize,
    pub avg_salary: Option<f64>,
    pub attrition_rate_pct: f64,
    pub top_attrition_dept: Option<String>,
    pub most_engaged_dept: Option<String>,
    pub top_performers: Vec<String>,
}

impl SummaryRecord {
    fn cells(&self) -> [String; 6] {
        [
            self.total_employees.to_string(),
            self.avg_salary.map(|v| v.to_string()).unwrap_or_default(),
            self.attrition_rate_pct.to_string(),
            self.top_attrition_dept.clone().unwrap_or_default(),
            self.most_engaged_dept.clone().unwrap_or_default(),
            self.top_performers.join(NAME_SEPARATOR),
        ]
    }

    /// Write header and data row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(COLUMNS)?;
        csv.write_record(self.cells())?;
        csv.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| HrError::Storage(format!("Report is not UTF-8: {}", e)))
    }

    /// Parse an export produced by `write_csv`
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv.headers()?.clone();
        if headers.iter().ne(COLUMNS.iter().copied()) {
            return Err(HrError::malformed(
                0,
                "header",
                headers.iter().collect::<Vec<_>>().join(","),
                "unexpected summary columns",
            ));
        }

        let row = csv
            .records()
            .next()
            .ok_or_else(|| HrError::malformed(1, "row", "", "summary has no data row"))??;

        let cell = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        let optional = |idx: usize| Some(cell(idx)).filter(|v| !v.is_empty());

        let total_employees = cell(0)
            .parse::<usize>()
            .map_err(|e| HrError::malformed(1, "total_employees", cell(0), e.to_string()))?;
        let avg_salary = optional(1)
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|e| HrError::malformed(1, "avg_salary", &v, e.to_string()))
            })
            .transpose()?;
        let attrition_rate_pct = cell(2)
            .parse::<f64>()
            .map_err(|e| HrError::malformed(1, "attrition_rate_pct", cell(2), e.to_string()))?;
        let top_performers = optional(5)
            .map(|v| {
                v.split(NAME_SEPARATOR)
                    .map(|name| name.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            total_employees,
            avg_salary,
            attrition_rate_pct,
            top_attrition_dept: optional(3),
            most_engaged_dept: optional(4),
            top_performers,
        })
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::read_csv(text.as_bytes())
    }
}

pub struct SummaryReportBuilder;

impl SummaryReportBuilder {
    /// Pure: the same selection always yields the same record
    pub fn build(ds: &DataSet) -> SummaryRecord {
        SummaryRecord {
            total_employees: ds.len(),
            avg_salary: analytics::average_salary(ds),
            attrition_rate_pct: analytics::attrition_rate_pct(ds),
            top_attrition_dept: analytics::top_attrition_dept(ds),
            most_engaged_dept: analytics::most_engaged_dept(ds),
            top_performers: analytics::top_performers(ds),
        }
    }

    /// `HR_Report_<YYYY-MM-DD>.csv`
    pub fn file_name(date: NaiveDate) -> String {
        format!("{}{}.csv", FILE_PREFIX, date.format("%Y-%m-%d"))
    }

    /// Write `record` to `dir` under the dated file name
    pub fn write_to_dir(record: &SummaryRecord, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(date));
        let file = std::fs::File::create(&path)?;
        record.write_csv(file)?;
        tracing::info!("Summary report written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::dataset::fixtures::employee;
    use crate::types::{Attrition, RawEmployee};
    use proptest::prelude::*;

    fn raw(name: &str, perf_score: u32) -> RawEmployee {
        RawEmployee {
            id: format!("E-{name}"),
            name: name.to_string(),
            country: Some("US".to_string()),
            dept: "Sales".to_string(),
            salary: "50000".to_string(),
            attrition: "No".to_string(),
            engagement: "3.5".to_string(),
            perf_score: perf_score.to_string(),
            absenteeism_days: "1".to_string(),
        }
    }

    fn sample() -> DataSet {
        DataSet::new(vec![
            employee("Asha", "India", "Sales", 40000.0, Attrition::Yes, 3.0, 5),
            employee("Ravi", "India", "Sales", 50000.0, Attrition::No, 3.2, 4),
            employee("Meera", "India", "R&D", 60000.0, Attrition::No, 4.8, 5),
            employee("Dev", "India", "R&D", 70000.0, Attrition::No, 4.0, 2),
        ])
    }

    #[test]
    fn test_build_sample() {
        let record = SummaryReportBuilder::build(&sample());
        assert_eq!(record.total_employees, 4);
        assert_eq!(record.avg_salary, Some(55000.0));
        assert_eq!(record.attrition_rate_pct, 25.0);
        assert_eq!(record.top_attrition_dept.as_deref(), Some("Sales"));
        assert_eq!(record.most_engaged_dept.as_deref(), Some("R&D"));
        assert_eq!(record.top_performers, vec!["Asha", "Meera"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let ds = sample();
        assert_eq!(SummaryReportBuilder::build(&ds), SummaryReportBuilder::build(&ds));
    }

    #[test]
    fn test_build_empty_uses_sentinels() {
        let record = SummaryReportBuilder::build(&DataSet::default());
        assert_eq!(
            record,
            SummaryRecord {
                total_employees: 0,
                avg_salary: None,
                attrition_rate_pct: 0.0,
                top_attrition_dept: None,
                most_engaged_dept: None,
                top_performers: vec![],
            }
        );
    }

    #[test]
    fn test_csv_layout() {
        let csv = SummaryReportBuilder::build(&sample()).to_csv_string().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Total Employees,Average Salary,Attrition Rate (%),Highest Attrition Dept,Most Engaged Dept,Top Performer(s)")
        );
        assert_eq!(lines.next(), Some("4,55000,25,Sales,R&D,\"Asha, Meera\""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_round_trip() {
        let record = SummaryReportBuilder::build(&sample());
        let parsed = SummaryRecord::from_csv_str(&record.to_csv_string().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_csv_round_trip_empty() {
        let record = SummaryReportBuilder::build(&DataSet::default());
        let csv = record.to_csv_string().unwrap();
        assert!(csv.ends_with("0,,0,,,\n"));
        assert_eq!(SummaryRecord::from_csv_str(&csv).unwrap(), record);
    }

    #[test]
    fn test_unsplittable_names_never_reach_the_report() {
        for name in ["Doe, Jane", ""] {
            let err = DataSet::from_raw(vec![raw(name, 5)]).unwrap_err();
            assert!(matches!(err, HrError::MalformedRecord { field: "name", .. }));
        }
    }

    #[test]
    fn test_csv_round_trip_single_performer_with_comma() {
        let ds = DataSet::from_raw(vec![raw("Doe,Jane", 5), raw("Lee", 3)]).unwrap();
        let record = SummaryReportBuilder::build(&ds);
        assert_eq!(record.top_performers, vec!["Doe,Jane"]);

        let parsed = SummaryRecord::from_csv_str(&record.to_csv_string().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    proptest! {
        #[test]
        fn prop_csv_round_trip_for_any_valid_names(
            rows in prop::collection::vec((r#"[A-Za-zé ,.'"\n-]{0,10}"#, 1u32..=5), 1..6)
        ) {
            let valid: Vec<RawEmployee> = rows
                .iter()
                .map(|(name, perf)| raw(name, *perf))
                .filter(|r| r.clone().validate(1).is_ok())
                .collect();
            prop_assume!(!valid.is_empty());

            let ds = DataSet::from_raw(valid).unwrap();
            let record = SummaryReportBuilder::build(&ds);
            prop_assert!(!record.top_performers.is_empty());

            let parsed = SummaryRecord::from_csv_str(&record.to_csv_string().unwrap()).unwrap();
            prop_assert_eq!(parsed, record);
        }
    }

    #[test]
    fn test_read_rejects_wrong_header() {
        let err = SummaryRecord::from_csv_str("a,b,c,d,e,f\n1,2,3,4,5,6\n").unwrap_err();
        assert!(matches!(err, HrError::MalformedRecord { field: "header", .. }));
    }

    #[test]
    fn test_file_name_and_write() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(SummaryReportBuilder::file_name(date), "HR_Report_2024-03-09.csv");

        let dir = tempfile::tempdir().unwrap();
        let record = SummaryReportBuilder::build(&sample());
        let path = SummaryReportBuilder::write_to_dir(&record, dir.path(), date).unwrap();
        assert!(path.ends_with("HR_Report_2024-03-09.csv"));

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(SummaryRecord::from_csv_str(&text).unwrap(), record);
    }
}
