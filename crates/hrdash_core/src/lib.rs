//! Core domain logic for the HR dashboard.
//! Salary statistics, the reminder lifecycle, org and employee records,
//! and role-gated navigation all live here; front ends only render.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod poll;
pub mod repo;
pub mod service;
pub mod session;
pub mod stats;

pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Employee, EmployeeDraft, EmployeeId, Gender, Placement};
pub use model::reminder::{Reminder, ReminderId, ReminderTier};
pub use model::user::{Role, UserProfile};
pub use poll::{PollDecision, PollScheduler};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::org_repo::{OrgRepository, SqliteOrgRepository};
pub use repo::reminder_repo::{ReminderRepository, SqliteReminderRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::dashboard_service::{CompanyFilter, DashboardService, DashboardView};
pub use service::employee_service::{EmployeeService, EmployeeServiceError};
pub use service::org_service::{provision_user, OrgService, OrgServiceError};
pub use service::reminder_feed::ReminderFeed;
pub use service::reminder_service::{
    ArchiveOutcome, DetectionReport, ReminderService, ReminderSubject,
};
pub use session::{AccessError, AuthIdentity, SessionContext, SessionError, SessionEvent};
pub use stats::{aggregate_salaries, SalaryStatistic};

/// Minimal health-check API for front ends.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
