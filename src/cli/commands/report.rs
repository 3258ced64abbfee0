//! Report Command
//!
//! Build the summary record for a selection and save it as a dated CSV.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, FilterArgs};
use crate::report::{SummaryRecord, SummaryReportBuilder};
use crate::types::{Result, format_currency};

pub fn run(args: &FilterArgs, output: Option<PathBuf>, format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let (filter, ds) = ctx.select(args)?;
    let record = SummaryReportBuilder::build(&ds);

    let dir = output.unwrap_or_else(|| ctx.config.export.report_dir.clone());
    let today = chrono::Local::now().date_naive();
    let path = SummaryReportBuilder::write_to_dir(&record, &dir, today)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let out = Output::new();
    out.header(&format!("HR Summary Report: {}", filter.describe()));
    print_record(&out, &record);
    println!();
    out.success(&format!("Report saved to {}", path.display()));
    Ok(())
}

fn print_record(out: &Output, record: &SummaryRecord) {
    let or_none = |value: Option<&str>| value.unwrap_or("none").to_string();

    out.metric("Total Employees", &record.total_employees.to_string());
    out.metric(
        "Average Salary",
        &record
            .avg_salary
            .map(format_currency)
            .unwrap_or_else(|| "n/a".to_string()),
    );
    out.metric(
        "Attrition Rate (%)",
        &format!("{:.2}", record.attrition_rate_pct),
    );
    out.metric(
        "Highest Attrition Dept",
        &or_none(record.top_attrition_dept.as_deref()),
    );
    out.metric(
        "Most Engaged Dept",
        &or_none(record.most_engaged_dept.as_deref()),
    );
    out.metric(
        "Top Performer(s)",
        &if record.top_performers.is_empty() {
            "none".to_string()
        } else {
            record.top_performers.join(", ")
        },
    );
}
