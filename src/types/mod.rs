pub mod employee;
pub mod error;
pub mod utils;

pub use employee::{Attrition, EmployeeRecord, RawEmployee};
pub use error::{HrError, Result, ResultExt};
pub use utils::{format_currency, format_optional, round_to};
