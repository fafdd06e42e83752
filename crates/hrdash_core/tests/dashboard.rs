use hrdash_core::db::open_db_in_memory;
use hrdash_core::model::employee::{
    Employee, EmployeeDraft, EmployeeId, EmployeeListItem, EmployeeStatus, Gender, Placement,
};
use hrdash_core::model::org::CompanyId;
use hrdash_core::repo::employee_repo::{
    EmployeeListQuery, EmployeeRepository, SqliteEmployeeRepository,
};
use hrdash_core::repo::org_repo::{OrgRepository, SqliteOrgRepository};
use hrdash_core::service::dashboard_service::LOAD_FAILED_NOTICE;
use hrdash_core::stats::CompensationRecord;
use hrdash_core::{CompanyFilter, DashboardService, RepoError, RepoResult};
use rusqlite::Connection;

fn department(conn: &Connection, company_id: CompanyId, name: &str) -> Placement {
    let org = SqliteOrgRepository::try_new(conn).unwrap();
    let department = org.create_department(company_id, name).unwrap();
    let subdepartment = org.create_subdepartment(department.id, "Core").unwrap();
    let position = org.create_position(subdepartment.id, "Staff").unwrap();
    Placement {
        company_id,
        department_id: department.id,
        subdepartment_id: subdepartment.id,
        position_id: position.id,
    }
}

fn hire(
    repo: &SqliteEmployeeRepository<'_>,
    placement: &Placement,
    salary: Option<f64>,
    gender: Gender,
) -> Employee {
    let mut draft = EmployeeDraft::new("Test", "Employee");
    draft.salary = salary;
    draft.gender = gender;
    repo.create_employee(placement, &draft).unwrap()
}

#[test]
fn dashboard_aggregates_active_employees_per_department() {
    let conn = open_db_in_memory().unwrap();
    let org = SqliteOrgRepository::try_new(&conn).unwrap();
    let acme = org.create_company("Acme", None, None).unwrap();
    let globex = org.create_company("Globex", None, None).unwrap();
    let sales = department(&conn, acme.id, "Sales");
    let finance = department(&conn, acme.id, "Finance");
    let elsewhere = department(&conn, globex.id, "Sales");

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    hire(&repo, &sales, Some(50_000.0), Gender::Female);
    hire(&repo, &sales, Some(60_000.0), Gender::Male);
    hire(&repo, &sales, Some(70_000.0), Gender::Female);
    hire(&repo, &sales, None, Gender::Unspecified);
    let gone = hire(&repo, &finance, Some(90_000.0), Gender::Male);
    hire(&repo, &finance, Some(0.0), Gender::Male);
    hire(&repo, &elsewhere, Some(10_000.0), Gender::Female);
    repo.set_status(gone.id, EmployeeStatus::Inactive).unwrap();

    let view = DashboardService::new(repo).load(CompanyFilter::Company(acme.id));

    assert!(view.notice.is_none());
    assert_eq!(view.statistics.len(), 2);
    let sales_stats = &view.statistics[0];
    assert_eq!(sales_stats.name, "Sales");
    assert!((sales_stats.average - 60_000.0).abs() < 1e-9);
    assert!((sales_stats.standard_deviation - 8_164.965_809).abs() < 1e-3);

    let finance_stats = &view.statistics[1];
    assert_eq!(finance_stats.name, "Finance");
    assert_eq!(finance_stats.average, 0.0);
    assert_eq!(finance_stats.standard_deviation, 0.0);

    assert_eq!(view.summary.headcount, 5);
    assert_eq!(view.summary.gender.female, 2);
    assert_eq!(view.summary.gender.male, 2);
}

#[test]
fn all_companies_filter_merges_departments_by_name() {
    let conn = open_db_in_memory().unwrap();
    let org = SqliteOrgRepository::try_new(&conn).unwrap();
    let acme = org.create_company("Acme", None, None).unwrap();
    let globex = org.create_company("Globex", None, None).unwrap();
    let acme_sales = department(&conn, acme.id, "Sales");
    let globex_sales = department(&conn, globex.id, "Sales");

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    hire(&repo, &acme_sales, Some(40_000.0), Gender::Male);
    hire(&repo, &globex_sales, Some(20_000.0), Gender::Female);

    let view = DashboardService::new(repo).load(CompanyFilter::All);

    assert_eq!(view.summary.headcount, 2);
    assert_eq!(view.summary.payroll_total, 60_000.0);
    assert_eq!(view.statistics.len(), 1);
    assert_eq!(view.statistics[0].name, "Sales");
    assert_eq!(view.statistics[0].average, 30_000.0);
    assert_eq!(view.statistics[0].standard_deviation, 10_000.0);
}

struct BrokenEmployees;

impl EmployeeRepository for BrokenEmployees {
    fn create_employee(&self, _: &Placement, _: &EmployeeDraft) -> RepoResult<Employee> {
        Err(RepoError::InvalidData("offline".to_string()))
    }

    fn update_employee(&self, _: EmployeeId, _: &Placement, _: &EmployeeDraft) -> RepoResult<()> {
        Err(RepoError::InvalidData("offline".to_string()))
    }

    fn get_employee(&self, _: EmployeeId) -> RepoResult<Option<Employee>> {
        Err(RepoError::InvalidData("offline".to_string()))
    }

    fn list_employees(&self, _: &EmployeeListQuery) -> RepoResult<Vec<EmployeeListItem>> {
        Err(RepoError::InvalidData("offline".to_string()))
    }

    fn set_status(&self, _: EmployeeId, _: EmployeeStatus) -> RepoResult<()> {
        Err(RepoError::InvalidData("offline".to_string()))
    }

    fn list_compensation(&self, _: Option<CompanyId>) -> RepoResult<Vec<CompensationRecord>> {
        Err(RepoError::InvalidData("offline".to_string()))
    }
}

#[test]
fn backend_failure_yields_empty_view_with_notice() {
    let view = DashboardService::new(BrokenEmployees).load(CompanyFilter::All);

    assert!(view.statistics.is_empty());
    assert_eq!(view.summary.headcount, 0);
    assert_eq!(view.notice.as_deref(), Some(LOAD_FAILED_NOTICE));
}
