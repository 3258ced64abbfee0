//! Inspect Command
//!
//! Show the layout and contents summary of the `employees` table.

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::types::Result;

pub fn run(format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let store = ctx.store();

    let columns = store.columns()?;
    let rows = store.count()?;
    let countries = store.countries()?;
    let departments = store.departments(None)?;

    if format == "json" {
        let json = serde_json::json!({
            "table": "employees",
            "rows": rows,
            "columns": columns,
            "countries": countries,
            "departments": departments,
            "schema_version": ctx.db.schema_version()?,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let out = Output::new();
    out.header("Columns in 'employees' table");
    for column in &columns {
        let mut flags = Vec::new();
        if column.primary_key {
            flags.push("primary key");
        }
        if column.not_null {
            flags.push("not null");
        }
        out.row(&[
            format!("{:<18}", column.name),
            format!("{:<8}", column.decl_type),
            flags.join(", "),
        ]);
    }

    out.section("Contents");
    out.metric("Rows", &rows.to_string());
    out.metric("Countries", &countries.join(", "));
    out.metric("Departments", &departments.join(", "));

    Ok(())
}
