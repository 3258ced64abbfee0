//! Dashboard Command
//!
//! KPI cards and per-department views for one filtered selection.

use serde::Serialize;

use crate::analytics::{
    self, DataSet, DataSetFilter, DeptCount, DeptEngagement, PerfAttrition, PerfScoreCount,
    SalaryStats,
};
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, FilterArgs};
use crate::types::{Result, format_currency, format_optional};

/// Everything the dashboard shows for one selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: DataSetFilter,
    pub total_employees: usize,
    pub avg_salary: Option<f64>,
    pub avg_engagement: Option<f64>,
    pub attrition_rate_pct: f64,
    pub department_headcount: Vec<DeptCount>,
    pub perf_score_distribution: Vec<PerfScoreCount>,
    pub attrition_by_perf_score: Vec<PerfAttrition>,
    pub salary_by_department: Vec<SalaryStats>,
    pub engagement_by_department: Vec<DeptEngagement>,
}

impl DashboardView {
    pub fn build(selection: DataSetFilter, ds: &DataSet) -> Self {
        Self {
            selection,
            total_employees: ds.len(),
            avg_salary: analytics::average_salary(ds),
            avg_engagement: analytics::average_engagement(ds),
            attrition_rate_pct: analytics::attrition_rate_pct(ds),
            department_headcount: analytics::department_headcount(ds),
            perf_score_distribution: analytics::perf_score_distribution(ds),
            attrition_by_perf_score: analytics::attrition_by_perf_score(ds),
            salary_by_department: analytics::salary_by_department(ds),
            engagement_by_department: analytics::engagement_absenteeism_by_department(ds),
        }
    }

    /// KPI card values as displayed
    pub fn cards(&self) -> [(&'static str, String); 4] {
        [
            ("Total Employees", self.total_employees.to_string()),
            (
                "Avg Salary",
                self.avg_salary
                    .map(format_currency)
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
            ("Avg Engagement", format_optional(self.avg_engagement, 2)),
            ("Attrition Rate", format!("{:.1}%", self.attrition_rate_pct)),
        ]
    }
}

pub fn run(args: &FilterArgs, format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let (filter, ds) = ctx.select(args)?;
    let view = DashboardView::build(filter, &ds);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_text(&view);
    }
    Ok(())
}

fn print_text(view: &DashboardView) {
    let out = Output::new();
    out.header(&format!("HR Analytics Dashboard: {}", view.selection.describe()));

    for (label, value) in view.cards() {
        out.metric(label, &value);
    }

    if view.total_employees == 0 {
        out.warning("No employees match the current selection.");
        return;
    }

    out.section("Employees by Department");
    for row in &view.department_headcount {
        out.row(&[format!("{:<14}", row.dept), row.employees.to_string()]);
    }

    out.section("Performance Score Distribution");
    for row in &view.perf_score_distribution {
        let share = 100.0 * row.employees as f64 / view.total_employees as f64;
        out.row(&[
            format!("{:<14}", row.perf_score),
            format!("{:>4}", row.employees),
            format!("{:.1}%", share),
        ]);
    }

    out.section("Attrition by Performance Score");
    out.row(&[
        format!("{:<14}", "score"),
        format!("{:>6}", "left"),
        format!("{:>6}", "stayed"),
    ]);
    for row in &view.attrition_by_perf_score {
        out.row(&[
            format!("{:<14}", row.perf_score),
            format!("{:>6}", row.attrited),
            format!("{:>6}", row.retained),
        ]);
    }

    out.section("Salary Distribution by Department");
    for row in &view.salary_by_department {
        out.row(&[
            format!("{:<14}", row.dept),
            format!("min {}", format_currency(row.min)),
            format!("median {}", format_currency(row.median)),
            format!("mean {}", format_currency(row.mean)),
            format!("max {}", format_currency(row.max)),
        ]);
    }

    out.section("Engagement vs Absenteeism");
    for row in &view.engagement_by_department {
        out.row(&[
            format!("{:<14}", row.dept),
            format!("engagement {:.2}", row.avg_engagement),
            format!("absenteeism {:.1} days", row.avg_absenteeism_days),
        ]);
    }
}
