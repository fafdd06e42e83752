//! Dashboard read model: per-department salary statistics and headcount.
//!
//! Reads never fail outward. A storage error is logged and produces an
//! empty view carrying a notice for the caller to render inline.

use crate::model::org::CompanyId;
use crate::repo::employee_repo::EmployeeRepository;
use crate::stats::{aggregate_salaries, group_by_department, SalaryStatistic, WorkforceSummary};
use log::{debug, error};
use serde::Serialize;

pub const LOAD_FAILED_NOTICE: &str = "Could not load payroll data. Try again later.";

/// Which employees the dashboard aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanyFilter {
    #[default]
    All,
    Company(CompanyId),
}

impl CompanyFilter {
    pub fn company_id(self) -> Option<CompanyId> {
        match self {
            Self::All => None,
            Self::Company(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub statistics: Vec<SalaryStatistic>,
    pub summary: WorkforceSummary,
    pub notice: Option<String>,
}

pub struct DashboardService<E: EmployeeRepository> {
    employees: E,
}

impl<E: EmployeeRepository> DashboardService<E> {
    pub fn new(employees: E) -> Self {
        Self { employees }
    }

    pub fn load(&self, filter: CompanyFilter) -> DashboardView {
        let records = match self.employees.list_compensation(filter.company_id()) {
            Ok(records) => records,
            Err(err) => {
                error!("event=dashboard_load module=dashboard status=error error={err}");
                return DashboardView {
                    notice: Some(LOAD_FAILED_NOTICE.to_string()),
                    ..DashboardView::default()
                };
            }
        };

        let statistics = aggregate_salaries(&group_by_department(&records));
        debug!(
            "event=dashboard_load module=dashboard status=ok records={} departments={}",
            records.len(),
            statistics.len()
        );
        DashboardView {
            statistics,
            summary: WorkforceSummary::from_records(&records),
            notice: None,
        }
    }
}
