//! Aggregation Library
//!
//! Pure metric functions over a [`DataSet`]. Every function is total: an
//! empty data set yields a documented sentinel instead of an error.
//!
//! | Metric | Empty data set |
//! |--------|----------------|
//! | `average_salary`, `average_engagement`, `average_perf_score` | `None` |
//! | `attrition_rate_pct` | `0.0` |
//! | `top_attrition_dept`, `most_engaged_dept` | `None` |
//! | `top_performers`, distributions | empty `Vec` |
//!
//! Department ties are broken alphabetically.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::dataset::DataSet;
use crate::types::Attrition;

// =============================================================================
// Scalar Metrics
// =============================================================================

/// Mean salary, `None` for an empty data set
pub fn average_salary(ds: &DataSet) -> Option<f64> {
    mean(ds.iter().map(|r| r.salary))
}

/// Mean engagement score, `None` for an empty data set
pub fn average_engagement(ds: &DataSet) -> Option<f64> {
    mean(ds.iter().map(|r| r.engagement))
}

/// Mean performance score, `None` for an empty data set
pub fn average_perf_score(ds: &DataSet) -> Option<f64> {
    mean(ds.iter().map(|r| f64::from(r.perf_score)))
}

/// Share of records with `attrition = Yes`, in percent.
///
/// An empty data set has a rate of `0.0`.
pub fn attrition_rate_pct(ds: &DataSet) -> f64 {
    if ds.is_empty() {
        return 0.0;
    }
    let attrited = ds.iter().filter(|r| r.attrition.is_yes()).count();
    100.0 * attrited as f64 / ds.len() as f64
}

// =============================================================================
// Department Rankings
// =============================================================================

/// Department with the most `attrition = Yes` records.
///
/// Every department present competes, including those with zero leavers,
/// so a data set without any attrition still names the alphabetically
/// first department. `None` only for an empty data set.
pub fn top_attrition_dept(ds: &DataSet) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in ds {
        let entry = counts.entry(record.dept.as_str()).or_insert(0);
        if record.attrition.is_yes() {
            *entry += 1;
        }
    }
    first_max(counts.into_iter().map(|(dept, n)| (dept, n as f64)))
}

/// Department with the highest mean engagement. `None` for an empty data set.
pub fn most_engaged_dept(ds: &DataSet) -> Option<String> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in ds {
        let entry = totals.entry(record.dept.as_str()).or_insert((0.0, 0));
        entry.0 += record.engagement;
        entry.1 += 1;
    }
    first_max(
        totals
            .into_iter()
            .map(|(dept, (sum, n))| (dept, sum / n as f64)),
    )
}

/// Names of every record at the maximum performance score.
///
/// Record order is kept; repeated names appear once.
pub fn top_performers(ds: &DataSet) -> Vec<String> {
    let Some(max_score) = ds.iter().map(|r| r.perf_score).max() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    ds.iter()
        .filter(|r| r.perf_score == max_score)
        .filter(|r| seen.insert(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect()
}

/// Alphabetically first key among those with the greatest score.
/// Keys must arrive in alphabetical order.
fn first_max<'a>(scores: impl Iterator<Item = (&'a str, f64)>) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for (key, score) in scores {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((key, score));
        }
    }
    best.map(|(key, _)| key.to_string())
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// =============================================================================
// Distributions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerfScoreCount {
    pub perf_score: u32,
    pub employees: usize,
}

/// Employees per performance score, highest score first
pub fn perf_score_distribution(ds: &DataSet) -> Vec<PerfScoreCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for record in ds {
        *counts.entry(record.perf_score).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .rev()
        .map(|(perf_score, employees)| PerfScoreCount {
            perf_score,
            employees,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeptCount {
    pub dept: String,
    pub employees: usize,
}

/// Employees per department, largest first, ties alphabetical
pub fn department_headcount(ds: &DataSet) -> Vec<DeptCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in ds {
        *counts.entry(record.dept.as_str()).or_insert(0) += 1;
    }
    let mut rows: Vec<DeptCount> = counts
        .into_iter()
        .map(|(dept, employees)| DeptCount {
            dept: dept.to_string(),
            employees,
        })
        .collect();
    // Stable sort keeps alphabetical order among equal counts
    rows.sort_by(|a, b| b.employees.cmp(&a.employees));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerfAttrition {
    pub perf_score: u32,
    pub attrited: usize,
    pub retained: usize,
}

/// Attrition split per performance score, highest score first
pub fn attrition_by_perf_score(ds: &DataSet) -> Vec<PerfAttrition> {
    let mut counts: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for record in ds {
        let entry = counts.entry(record.perf_score).or_insert((0, 0));
        match record.attrition {
            Attrition::Yes => entry.0 += 1,
            Attrition::No => entry.1 += 1,
        }
    }
    counts
        .into_iter()
        .rev()
        .map(|(perf_score, (attrited, retained))| PerfAttrition {
            perf_score,
            attrited,
            retained,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryStats {
    pub dept: String,
    pub employees: usize,
    pub min: f64,
    pub median: f64,
    pub mean: f64,
    pub max: f64,
}

/// Salary spread per department, alphabetical
pub fn salary_by_department(ds: &DataSet) -> Vec<SalaryStats> {
    let mut salaries: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in ds {
        salaries
            .entry(record.dept.as_str())
            .or_default()
            .push(record.salary);
    }

    salaries
        .into_iter()
        .map(|(dept, mut values)| {
            values.sort_by(f64::total_cmp);
            let n = values.len();
            let median = if n % 2 == 1 {
                values[n / 2]
            } else {
                (values[n / 2 - 1] + values[n / 2]) / 2.0
            };
            SalaryStats {
                dept: dept.to_string(),
                employees: n,
                min: values[0],
                median,
                mean: values.iter().sum::<f64>() / n as f64,
                max: values[n - 1],
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeptEngagement {
    pub dept: String,
    pub avg_engagement: f64,
    pub avg_absenteeism_days: f64,
}

/// Mean engagement next to mean absenteeism per department, alphabetical
pub fn engagement_absenteeism_by_department(ds: &DataSet) -> Vec<DeptEngagement> {
    let mut totals: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
    for record in ds {
        let entry = totals.entry(record.dept.as_str()).or_insert((0.0, 0.0, 0));
        entry.0 += record.engagement;
        entry.1 += f64::from(record.absenteeism_days);
        entry.2 += 1;
    }
    totals
        .into_iter()
        .map(|(dept, (engagement, absent, n))| DeptEngagement {
            dept: dept.to_string(),
            avg_engagement: engagement / n as f64,
            avg_absenteeism_days: absent / n as f64,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::dataset::fixtures::employee;
    use proptest::prelude::*;

    fn sample() -> DataSet {
        DataSet::new(vec![
            employee("Alice", "US", "Sales", 70000.0, Attrition::No, 4.0, 5),
            employee("Bob", "US", "R&D", 90000.0, Attrition::Yes, 3.0, 5),
            employee("Carol", "US", "Sales", 60000.0, Attrition::Yes, 3.5, 3),
            employee("Dana", "US", "HR", 50000.0, Attrition::No, 4.5, 4),
            employee("Eve", "US", "Sales", 55000.0, Attrition::Yes, 2.0, 2),
        ])
    }

    #[test]
    fn test_empty_sentinels() {
        let ds = DataSet::default();
        assert_eq!(average_salary(&ds), None);
        assert_eq!(average_engagement(&ds), None);
        assert_eq!(average_perf_score(&ds), None);
        assert_eq!(attrition_rate_pct(&ds), 0.0);
        assert_eq!(top_attrition_dept(&ds), None);
        assert_eq!(most_engaged_dept(&ds), None);
        assert!(top_performers(&ds).is_empty());
        assert!(perf_score_distribution(&ds).is_empty());
        assert!(salary_by_department(&ds).is_empty());
    }

    #[test]
    fn test_scalar_metrics() {
        let ds = sample();
        assert_eq!(average_salary(&ds), Some(65000.0));
        assert_eq!(attrition_rate_pct(&ds), 60.0);
        assert_eq!(average_engagement(&ds), Some(3.4));
        assert_eq!(average_perf_score(&ds), Some(3.8));
    }

    #[test]
    fn test_top_attrition_dept() {
        assert_eq!(top_attrition_dept(&sample()).as_deref(), Some("Sales"));
    }

    #[test]
    fn test_top_attrition_dept_tie_is_alphabetical() {
        let ds = DataSet::new(vec![
            employee("A", "US", "Sales", 1.0, Attrition::Yes, 3.0, 3),
            employee("B", "US", "Engineering", 1.0, Attrition::Yes, 3.0, 3),
        ]);
        assert_eq!(top_attrition_dept(&ds).as_deref(), Some("Engineering"));
    }

    #[test]
    fn test_top_attrition_dept_without_leavers() {
        let ds = DataSet::new(vec![
            employee("A", "US", "Sales", 1.0, Attrition::No, 3.0, 3),
            employee("B", "US", "Finance", 1.0, Attrition::No, 3.0, 3),
        ]);
        assert_eq!(top_attrition_dept(&ds).as_deref(), Some("Finance"));
    }

    #[test]
    fn test_most_engaged_dept() {
        // HR 4.5, Sales 3.1666, R&D 3.0
        assert_eq!(most_engaged_dept(&sample()).as_deref(), Some("HR"));
    }

    #[test]
    fn test_most_engaged_dept_tie_is_alphabetical() {
        let ds = DataSet::new(vec![
            employee("A", "US", "Sales", 1.0, Attrition::No, 4.0, 3),
            employee("B", "US", "Legal", 1.0, Attrition::No, 4.0, 3),
        ]);
        assert_eq!(most_engaged_dept(&ds).as_deref(), Some("Legal"));
    }

    #[test]
    fn test_top_performers_returns_all_ties() {
        let ds = DataSet::new(vec![
            employee("Alice", "US", "Sales", 1.0, Attrition::No, 3.0, 5),
            employee("Bob", "US", "Sales", 1.0, Attrition::No, 3.0, 5),
            employee("Carol", "US", "Sales", 1.0, Attrition::No, 3.0, 3),
        ]);
        assert_eq!(top_performers(&ds), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_top_performers_deduplicates_names() {
        let ds = DataSet::new(vec![
            employee("Alice", "US", "Sales", 1.0, Attrition::No, 3.0, 5),
            employee("Alice", "UK", "Sales", 1.0, Attrition::No, 3.0, 5),
        ]);
        assert_eq!(top_performers(&ds), vec!["Alice"]);
    }

    #[test]
    fn test_perf_score_distribution_descending() {
        let dist = perf_score_distribution(&sample());
        let scores: Vec<u32> = dist.iter().map(|d| d.perf_score).collect();
        assert_eq!(scores, vec![5, 4, 3, 2]);
        assert_eq!(dist[0].employees, 2);
    }

    #[test]
    fn test_department_headcount() {
        let rows = department_headcount(&sample());
        assert_eq!(rows[0], DeptCount { dept: "Sales".to_string(), employees: 3 });
        // HR and R&D tie at 1, alphabetical
        assert_eq!(rows[1].dept, "HR");
        assert_eq!(rows[2].dept, "R&D");
    }

    #[test]
    fn test_attrition_by_perf_score() {
        let rows = attrition_by_perf_score(&sample());
        assert_eq!(
            rows[0],
            PerfAttrition { perf_score: 5, attrited: 1, retained: 1 }
        );
        let total: usize = rows.iter().map(|r| r.attrited + r.retained).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_salary_by_department() {
        let stats = salary_by_department(&sample());
        let sales = stats.iter().find(|s| s.dept == "Sales").unwrap();
        assert_eq!(sales.employees, 3);
        assert_eq!(sales.min, 55000.0);
        assert_eq!(sales.median, 60000.0);
        assert_eq!(sales.max, 70000.0);
    }

    #[test]
    fn test_engagement_absenteeism_by_department() {
        let rows = engagement_absenteeism_by_department(&sample());
        let hr = rows.iter().find(|r| r.dept == "HR").unwrap();
        assert_eq!(hr.avg_engagement, 4.5);
        assert_eq!(hr.avg_absenteeism_days, 2.0);
    }

    fn arb_dataset() -> impl Strategy<Value = DataSet> {
        prop::collection::vec(
            (
                0.0f64..500_000.0,
                any::<bool>(),
                0.0f64..5.0,
                1u32..=5,
                prop::sample::select(vec!["Sales", "R&D", "HR", "Finance"]),
            ),
            1..40,
        )
        .prop_map(|rows| {
            DataSet::new(
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (salary, left, engagement, perf, dept))| {
                        let attrition = if left { Attrition::Yes } else { Attrition::No };
                        employee(&format!("E{i}"), "US", dept, salary, attrition, engagement, perf)
                    })
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_average_salary_within_bounds(ds in arb_dataset()) {
            let avg = average_salary(&ds).unwrap();
            let min = ds.iter().map(|r| r.salary).fold(f64::INFINITY, f64::min);
            let max = ds.iter().map(|r| r.salary).fold(f64::NEG_INFINITY, f64::max);
            let tolerance = 1e-9 * max.max(1.0);
            prop_assert!(avg >= min - tolerance && avg <= max + tolerance);
        }

        #[test]
        fn prop_attrition_rate_in_range(ds in arb_dataset()) {
            let rate = attrition_rate_pct(&ds);
            prop_assert!((0.0..=100.0).contains(&rate));
            if ds.iter().all(|r| !r.attrition.is_yes()) {
                prop_assert_eq!(rate, 0.0);
            }
        }

        #[test]
        fn prop_top_performers_share_max_score(ds in arb_dataset()) {
            let max = ds.iter().map(|r| r.perf_score).max().unwrap();
            let names = top_performers(&ds);
            prop_assert!(!names.is_empty());
            for name in &names {
                prop_assert!(ds.iter().any(|r| &r.name == name && r.perf_score == max));
            }
        }
    }
}
