//! Workforce KPI queries
//!
//! Cross-country aggregates computed in SQL over the whole `employees`
//! table, independent of any dashboard filter.

use rusqlite::Row;
use serde::Serialize;

use super::Database;
use crate::types::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMetric {
    pub country: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeptMetric {
    pub dept: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeptCountryMetric {
    pub dept: String,
    pub country: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryHeadcount {
    pub country: String,
    pub employees: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerfScoreHeadcount {
    pub perf_score: i64,
    pub employees: i64,
}

/// Every KPI in one serializable bundle
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    pub headcount_by_country: Vec<CountryHeadcount>,
    pub attrition_rate_by_country: Vec<CountryMetric>,
    pub avg_engagement_by_country: Vec<CountryMetric>,
    pub avg_absenteeism_by_dept_country: Vec<DeptCountryMetric>,
    pub avg_salary_by_dept: Vec<DeptMetric>,
    pub avg_salary_by_dept_country: Vec<DeptCountryMetric>,
    pub perf_score_distribution: Vec<PerfScoreHeadcount>,
}

pub struct KpiStore<'a> {
    db: &'a Database,
}

impl<'a> KpiStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn report(&self) -> Result<KpiReport> {
        Ok(KpiReport {
            headcount_by_country: self.headcount_by_country()?,
            attrition_rate_by_country: self.attrition_rate_by_country()?,
            avg_engagement_by_country: self.avg_engagement_by_country()?,
            avg_absenteeism_by_dept_country: self.avg_absenteeism_by_dept_country()?,
            avg_salary_by_dept: self.avg_salary_by_dept()?,
            avg_salary_by_dept_country: self.avg_salary_by_dept_country()?,
            perf_score_distribution: self.perf_score_distribution()?,
        })
    }

    /// Percentage of leavers per country, 2 decimals, highest first
    pub fn attrition_rate_by_country(&self) -> Result<Vec<CountryMetric>> {
        self.query(
            r#"
            SELECT country,
                   ROUND(100.0 * SUM(CASE WHEN attrition = 'Yes' THEN 1 ELSE 0 END) / COUNT(*), 2) AS attrition_rate_pct
            FROM employees
            GROUP BY country
            ORDER BY attrition_rate_pct DESC, country
            "#,
            country_metric,
        )
    }

    /// Mean absenteeism days per department and country, 1 decimal, highest first
    pub fn avg_absenteeism_by_dept_country(&self) -> Result<Vec<DeptCountryMetric>> {
        self.query(
            r#"
            SELECT dept, country, ROUND(AVG(absenteeism_days), 1) AS avg_absenteeism_days
            FROM employees
            GROUP BY dept, country
            ORDER BY avg_absenteeism_days DESC, dept, country
            "#,
            dept_country_metric,
        )
    }

    /// Mean engagement per country, 2 decimals, highest first
    pub fn avg_engagement_by_country(&self) -> Result<Vec<CountryMetric>> {
        self.query(
            r#"
            SELECT country, ROUND(AVG(engagement), 2) AS avg_engagement
            FROM employees
            GROUP BY country
            ORDER BY avg_engagement DESC, country
            "#,
            country_metric,
        )
    }

    /// Employees per performance score, highest score first
    pub fn perf_score_distribution(&self) -> Result<Vec<PerfScoreHeadcount>> {
        self.query(
            r#"
            SELECT perf_score, COUNT(*) AS num_employees
            FROM employees
            GROUP BY perf_score
            ORDER BY perf_score DESC
            "#,
            |row| {
                Ok(PerfScoreHeadcount {
                    perf_score: row.get(0)?,
                    employees: row.get(1)?,
                })
            },
        )
    }

    /// Mean salary per department, 2 decimals, highest first
    pub fn avg_salary_by_dept(&self) -> Result<Vec<DeptMetric>> {
        self.query(
            r#"
            SELECT dept, ROUND(AVG(salary), 2) AS avg_salary
            FROM employees
            GROUP BY dept
            ORDER BY avg_salary DESC, dept
            "#,
            |row| {
                Ok(DeptMetric {
                    dept: row.get(0)?,
                    value: row.get(1)?,
                })
            },
        )
    }

    /// Employees per country, largest first
    pub fn headcount_by_country(&self) -> Result<Vec<CountryHeadcount>> {
        self.query(
            r#"
            SELECT country, COUNT(*) AS total_employees
            FROM employees
            GROUP BY country
            ORDER BY total_employees DESC, country
            "#,
            |row| {
                Ok(CountryHeadcount {
                    country: row.get(0)?,
                    employees: row.get(1)?,
                })
            },
        )
    }

    /// Mean salary per department and country, 2 decimals, highest first
    pub fn avg_salary_by_dept_country(&self) -> Result<Vec<DeptCountryMetric>> {
        self.query(
            r#"
            SELECT dept, country, ROUND(AVG(salary), 2) AS avg_salary
            FROM employees
            GROUP BY dept, country
            ORDER BY avg_salary DESC, dept, country
            "#,
            dept_country_metric,
        )
    }

    fn query<T, F>(&self, sql: &str, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], map)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn country_metric(row: &Row<'_>) -> rusqlite::Result<CountryMetric> {
    Ok(CountryMetric {
        country: row.get(0)?,
        value: row.get(1)?,
    })
}

fn dept_country_metric(row: &Row<'_>) -> rusqlite::Result<DeptCountryMetric> {
    Ok(DeptCountryMetric {
        dept: row.get(0)?,
        country: row.get(1)?,
        value: row.get(2)?,
    })
}
