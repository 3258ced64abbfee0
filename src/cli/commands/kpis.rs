//! KPIs Command
//!
//! Cross-country workforce KPIs computed over the whole table.

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::storage::{DeptCountryMetric, KpiReport, KpiStore};
use crate::types::{Result, format_currency};

pub fn run(format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let report = KpiStore::new(&ctx.db).report()?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

fn print_text(report: &KpiReport) {
    let out = Output::new();

    out.section("Headcount by Country");
    for row in &report.headcount_by_country {
        out.row(&[format!("{:<12}", row.country), row.employees.to_string()]);
    }

    out.section("Attrition Rate by Country");
    for row in &report.attrition_rate_by_country {
        out.row(&[format!("{:<12}", row.country), format!("{:.2}%", row.value)]);
    }

    out.section("Average Engagement by Country");
    for row in &report.avg_engagement_by_country {
        out.row(&[format!("{:<12}", row.country), format!("{:.2}", row.value)]);
    }

    out.section("Average Absenteeism by Dept & Country");
    print_dept_country(&out, &report.avg_absenteeism_by_dept_country, |v| {
        format!("{:.1} days", v)
    });

    out.section("Performance Score Distribution");
    for row in &report.perf_score_distribution {
        out.row(&[format!("{:<12}", row.perf_score), row.employees.to_string()]);
    }

    out.section("Average Salary by Department");
    for row in &report.avg_salary_by_dept {
        out.row(&[format!("{:<12}", row.dept), format_currency(row.value)]);
    }

    out.section("Average Salary by Dept & Country");
    print_dept_country(&out, &report.avg_salary_by_dept_country, format_currency);
}

fn print_dept_country(out: &Output, rows: &[DeptCountryMetric], render: impl Fn(f64) -> String) {
    for row in rows {
        out.row(&[
            format!("{:<12}", row.dept),
            format!("{:<12}", row.country),
            render(row.value),
        ]);
    }
}
