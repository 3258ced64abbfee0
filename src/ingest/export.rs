//! Full-table CSV export

use std::io::Write;
use std::path::Path;

use crate::analytics::DataSet;
use crate::storage::{Database, EMPLOYEE_COLUMNS, EmployeeStore};
use crate::types::Result;

/// Write every record with a header row. Returns the number of rows.
pub fn write_employees<W: Write>(ds: &DataSet, writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in ds {
        csv.serialize(record)?;
    }
    if ds.is_empty() {
        csv.write_record(EMPLOYEE_COLUMNS)?;
    }
    csv.flush()?;
    Ok(ds.len())
}

/// Export the whole `employees` table to `path`
pub fn export_table(db: &Database, path: &Path) -> Result<usize> {
    let ds = EmployeeStore::new(db).all()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let rows = write_employees(&ds, file)?;
    tracing::info!("Exported {} employees to {}", rows, path.display());
    Ok(rows)
}
