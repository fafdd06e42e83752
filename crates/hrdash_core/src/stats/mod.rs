//! Payroll statistics derived from compensation records.
//!
//! Everything here is a pure function of its input: no storage access,
//! no logging, no failure modes.

pub mod salary;
pub mod workforce;

pub use salary::{
    aggregate_salaries, group_by_department, mean, population_std_dev, CompensationRecord,
    DepartmentSalaries, SalaryStatistic,
};
pub use workforce::{GenderTally, WorkforceSummary};
