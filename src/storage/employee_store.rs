use rusqlite::types::ValueRef;
use rusqlite::{Row, params};
use serde::Serialize;

use super::Database;
use crate::analytics::{DataSet, DataSetFilter};
use crate::types::{EmployeeRecord, RawEmployee, Result, ResultExt};

/// Column order of the `employees` table and of the full CSV export
pub const EMPLOYEE_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "country",
    "dept",
    "salary",
    "attrition",
    "engagement",
    "perf_score",
    "absenteeism_days",
];

/// Column description from `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Read/write access to the `employees` table
pub struct EmployeeStore<'a> {
    db: &'a Database,
}

impl<'a> EmployeeStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Replace the whole table with `records` in one transaction.
    pub fn replace_all(&self, records: &[EmployeeRecord]) -> Result<usize> {
        self.db.transaction(|conn| {
            conn.execute("DELETE FROM employees", [])
                .with_context("Failed to clear employees table")?;

            let mut stmt = conn.prepare(
                r#"
                INSERT INTO employees (id, name, country, dept, salary, attrition, engagement, perf_score, absenteeism_days)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.id,
                    record.name,
                    record.country,
                    record.dept,
                    record.salary,
                    record.attrition.as_str(),
                    record.engagement,
                    record.perf_score,
                    record.absenteeism_days,
                ])
                .with_context_fn(|| {
                    format!(
                        "Failed to insert employee '{}' ({})",
                        record.id, record.country
                    )
                })?;
            }

            Ok(records.len())
        })
    }

    /// Load the records matching `filter`, in insertion order.
    ///
    /// Filtering runs in SQL; every returned row is validated before it
    /// enters the `DataSet`.
    pub fn load(&self, filter: &DataSetFilter) -> Result<DataSet> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(country) = &filter.country {
            values.push(country.clone());
            clauses.push(format!("country = ?{}", values.len()));
        }

        if !filter.departments.is_empty() {
            let placeholders: Vec<String> = filter
                .departments
                .iter()
                .map(|dept| {
                    values.push(dept.clone());
                    format!("?{}", values.len())
                })
                .collect();
            clauses.push(format!("dept IN ({})", placeholders.join(", ")));
        }

        if filter.attrited_only {
            clauses.push("attrition = 'Yes'".to_string());
        }

        let mut query = format!("SELECT {} FROM employees", EMPLOYEE_COLUMNS.join(", "));
        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY rowid");

        tracing::debug!("Loading employees: {}", query);

        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(values.iter()), row_to_raw)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        DataSet::from_raw(rows)
    }

    /// Every stored record
    pub fn all(&self) -> Result<DataSet> {
        self.load(&DataSetFilter::default())
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.db.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Distinct countries, alphabetical
    pub fn countries(&self) -> Result<Vec<String>> {
        self.distinct("SELECT DISTINCT country FROM employees ORDER BY country", None)
    }

    /// Distinct departments, alphabetical, optionally within one country
    pub fn departments(&self, country: Option<&str>) -> Result<Vec<String>> {
        match country {
            Some(c) => self.distinct(
                "SELECT DISTINCT dept FROM employees WHERE country = ?1 ORDER BY dept",
                Some(c),
            ),
            None => self.distinct("SELECT DISTINCT dept FROM employees ORDER BY dept", None),
        }
    }

    fn distinct(&self, sql: &str, arg: Option<&str>) -> Result<Vec<String>> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(sql)?;
        let values = match arg {
            Some(a) => stmt
                .query_map(params![a], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?,
            None => stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?,
        };
        Ok(values)
    }

    /// Table layout as reported by SQLite
    pub fn columns(&self) -> Result<Vec<ColumnInfo>> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare("PRAGMA table_info(employees)")?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get(1)?,
                    decl_type: row.get(2)?,
                    not_null: row.get::<_, i64>(3)? != 0,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(columns)
    }
}

/// Read a row as text so that validation sees exactly what was stored,
/// whatever the column affinity.
fn row_to_raw(row: &Row<'_>) -> rusqlite::Result<RawEmployee> {
    Ok(RawEmployee {
        id: cell_text(row, 0)?,
        name: cell_text(row, 1)?,
        country: Some(cell_text(row, 2)?),
        dept: cell_text(row, 3)?,
        salary: cell_text(row, 4)?,
        attrition: cell_text(row, 5)?,
        engagement: cell_text(row, 6)?,
        perf_score: cell_text(row, 7)?,
        absenteeism_days: cell_text(row, 8)?,
    })
}

fn cell_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::dataset::fixtures::employee;
    use crate::types::{Attrition, HrError};

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let store = EmployeeStore::new(&db);
        store
            .replace_all(&[
                employee("Asha", "India", "Sales", 30000.0, Attrition::No, 4.0, 4),
                employee("Ravi", "India", "R&D", 42000.0, Attrition::Yes, 3.0, 5),
                employee("John", "US", "Sales", 70000.0, Attrition::Yes, 3.5, 3),
                employee("Mary", "US", "HR", 65000.0, Attrition::No, 4.2, 5),
            ])
            .unwrap();
        db
    }

    #[test]
    fn test_replace_all_and_count() {
        let db = seeded();
        let store = EmployeeStore::new(&db);
        assert_eq!(store.count().unwrap(), 4);

        store
            .replace_all(&[employee("Solo", "UK", "HR", 1.0, Attrition::No, 3.0, 3)])
            .unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let db = seeded();
        let ds = EmployeeStore::new(&db).all().unwrap();
        let ravi = ds.iter().find(|r| r.name == "Ravi").unwrap();
        assert_eq!(
            *ravi,
            employee("Ravi", "India", "R&D", 42000.0, Attrition::Yes, 3.0, 5)
        );
    }

    #[test]
    fn test_load_with_filters_matches_in_memory_filter() {
        let db = seeded();
        let store = EmployeeStore::new(&db);
        let everything = store.all().unwrap();

        let filters = [
            DataSetFilter::new().country("India"),
            DataSetFilter::new().country("US").departments(["Sales", "HR"]),
            DataSetFilter::new().attrited_only(true),
            DataSetFilter::new().country("US").attrited_only(true),
            DataSetFilter::new().country("Nowhere"),
        ];

        for filter in &filters {
            assert_eq!(store.load(filter).unwrap(), everything.filter(filter));
        }
    }

    #[test]
    fn test_duplicate_id_within_country_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let store = EmployeeStore::new(&db);

        let a = employee("Same", "US", "HR", 1.0, Attrition::No, 3.0, 3);
        let result = store.replace_all(&[a.clone(), a]);
        assert!(matches!(result, Err(HrError::Storage(_))));
        // Transaction rolled back
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_distinct_values() {
        let db = seeded();
        let store = EmployeeStore::new(&db);
        assert_eq!(store.countries().unwrap(), vec!["India", "US"]);
        assert_eq!(store.departments(None).unwrap(), vec!["HR", "R&D", "Sales"]);
        assert_eq!(store.departments(Some("India")).unwrap(), vec!["R&D", "Sales"]);
    }

    #[test]
    fn test_columns() {
        let db = seeded();
        let columns = EmployeeStore::new(&db).columns().unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, EMPLOYEE_COLUMNS);
        assert!(columns[0].primary_key);
    }

    #[test]
    fn test_malformed_stored_row_rejected() {
        let db = Database::open_in_memory().unwrap();
        // Legacy table without type constraints
        db.execute(
            "CREATE TABLE employees (id, name, country, dept, salary, attrition, engagement, perf_score, absenteeism_days)",
            &[],
        )
        .unwrap();
        db.execute(
            "INSERT INTO employees VALUES ('1', 'A', 'US', 'HR', 'n/a', 'No', 3.0, 3, 0)",
            &[],
        )
        .unwrap();

        let err = EmployeeStore::new(&db).all().unwrap_err();
        assert!(matches!(
            err,
            HrError::MalformedRecord { field: "salary", .. }
        ));
    }
}
