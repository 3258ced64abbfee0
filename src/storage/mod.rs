pub mod database;
pub mod employee_store;
pub mod kpi_store;

pub use database::{Database, PoolConfig};
pub use employee_store::{ColumnInfo, EMPLOYEE_COLUMNS, EmployeeStore};
pub use kpi_store::{
    CountryHeadcount, CountryMetric, DeptCountryMetric, DeptMetric, KpiReport, KpiStore,
    PerfScoreHeadcount,
};
