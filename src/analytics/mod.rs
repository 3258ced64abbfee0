//! Analytics Core
//!
//! In-memory employee views and the pure metrics computed over them.

pub mod aggregation;
pub mod dataset;

pub use aggregation::{
    DeptCount, DeptEngagement, PerfAttrition, PerfScoreCount, SalaryStats,
    attrition_by_perf_score, attrition_rate_pct, average_engagement, average_perf_score,
    average_salary, department_headcount, engagement_absenteeism_by_department,
    most_engaged_dept, perf_score_distribution, salary_by_department, top_attrition_dept,
    top_performers,
};
pub use dataset::{DataSet, DataSetFilter};
