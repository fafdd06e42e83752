use chrono::NaiveDate;
use hrdash_core::db::open_db_in_memory;
use hrdash_core::model::employee::{EmployeeDraft, EmployeeValidationError, Gender, Placement};
use hrdash_core::repo::employee_repo::{EmployeeListQuery, SqliteEmployeeRepository};
use hrdash_core::repo::org_repo::{OrgRepository, SqliteOrgRepository};
use hrdash_core::{EmployeeService, EmployeeServiceError};
use rusqlite::Connection;

type Service<'conn> =
    EmployeeService<SqliteEmployeeRepository<'conn>, SqliteOrgRepository<'conn>>;

fn service(conn: &Connection) -> Service<'_> {
    EmployeeService::new(
        SqliteEmployeeRepository::try_new(conn).unwrap(),
        SqliteOrgRepository::try_new(conn).unwrap(),
    )
}

fn branch(conn: &Connection, company: &str, department: &str) -> Placement {
    let org = SqliteOrgRepository::try_new(conn).unwrap();
    let company_id = match org
        .list_companies()
        .unwrap()
        .into_iter()
        .find(|c| c.name == company)
    {
        Some(existing) => existing.id,
        None => org.create_company(company, None, None).unwrap().id,
    };
    let department = org.create_department(company_id, department).unwrap();
    let subdepartment = org.create_subdepartment(department.id, "Core").unwrap();
    let position = org.create_position(subdepartment.id, "Analyst").unwrap();
    Placement {
        company_id,
        department_id: department.id,
        subdepartment_id: subdepartment.id,
        position_id: position.id,
    }
}

fn draft(first: &str, last: &str, salary: Option<f64>) -> EmployeeDraft {
    let mut draft = EmployeeDraft::new(first, last);
    draft.salary = salary;
    draft
}

#[test]
fn badge_numbers_count_per_company() {
    let conn = open_db_in_memory().unwrap();
    let acme_sales = branch(&conn, "Acme", "Sales");
    let acme_ops = branch(&conn, "Acme", "Operations");
    let globex = branch(&conn, "Globex", "Sales");
    let service = service(&conn);

    let first = service.create(&acme_sales, draft("Ana", "Ruiz", None)).unwrap();
    let second = service.create(&acme_ops, draft("Luis", "Gil", None)).unwrap();
    let other = service.create(&globex, draft("Eva", "Sanz", None)).unwrap();

    assert_eq!(first.badge_number, 1);
    assert_eq!(second.badge_number, 2);
    assert_eq!(other.badge_number, 1);
    assert!(first.is_active());
}

#[test]
fn create_normalizes_and_persists_details() {
    let conn = open_db_in_memory().unwrap();
    let placement = branch(&conn, "Acme", "Sales");
    let service = service(&conn);

    let mut input = draft("  Ana ", " Ruiz", Some(52_000.0));
    input.email = Some("ana.ruiz@acme.test".to_string());
    input.title = Some("   ".to_string());
    input.gender = Gender::Female;
    input.birth_date = NaiveDate::from_ymd_opt(1990, 3, 15);

    let created = service.create(&placement, input).unwrap();
    let stored = service.get(created.id).unwrap().unwrap();

    assert_eq!(stored, created);
    assert_eq!(stored.full_name(), "Ana Ruiz");
    assert_eq!(stored.details.title, None);
    assert_eq!(stored.details.gender, Gender::Female);
    assert_eq!(stored.details.birth_date, NaiveDate::from_ymd_opt(1990, 3, 15));
    assert_eq!(stored.details.salary, Some(52_000.0));
}

#[test]
fn invalid_drafts_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let placement = branch(&conn, "Acme", "Sales");
    let service = service(&conn);

    let mut bad_email = draft("Ana", "Ruiz", None);
    bad_email.email = Some("not-an-email".to_string());
    assert!(matches!(
        service.create(&placement, bad_email),
        Err(EmployeeServiceError::Invalid(
            EmployeeValidationError::InvalidEmail(_)
        ))
    ));

    assert!(matches!(
        service.create(&placement, draft(" ", "Ruiz", None)),
        Err(EmployeeServiceError::Invalid(
            EmployeeValidationError::BlankFirstName
        ))
    ));
    assert!(matches!(
        service.create(&placement, draft("Ana", "Ruiz", Some(-1.0))),
        Err(EmployeeServiceError::Invalid(
            EmployeeValidationError::InvalidAmount { field: "salary", .. }
        ))
    ));
}

#[test]
fn placement_levels_must_belong_to_each_other() {
    let conn = open_db_in_memory().unwrap();
    let sales = branch(&conn, "Acme", "Sales");
    let globex = branch(&conn, "Globex", "Sales");
    let service = service(&conn);

    let mixed = Placement {
        department_id: globex.department_id,
        ..sales
    };
    assert!(matches!(
        service.create(&mixed, draft("Ana", "Ruiz", None)),
        Err(EmployeeServiceError::InvalidPlacement(_))
    ));

    let missing_company = Placement {
        company_id: 999,
        ..sales
    };
    assert!(matches!(
        service.create(&missing_company, draft("Ana", "Ruiz", None)),
        Err(EmployeeServiceError::InvalidPlacement(_))
    ));
}

#[test]
fn update_rewrites_fields_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let sales = branch(&conn, "Acme", "Sales");
    let ops = branch(&conn, "Acme", "Operations");
    let service = service(&conn);
    let created = service.create(&sales, draft("Ana", "Ruiz", Some(40_000.0))).unwrap();

    let updated = service
        .update(created.id, &ops, draft("Ana", "Ruiz Soto", Some(45_000.0)))
        .unwrap();

    assert_eq!(updated.badge_number, created.badge_number);
    assert_eq!(updated.placement, ops);
    assert_eq!(updated.details.last_name, "Ruiz Soto");
    assert_eq!(updated.details.salary, Some(45_000.0));

    assert!(matches!(
        service.update(999, &ops, draft("No", "Body", None)),
        Err(EmployeeServiceError::NotFound(999))
    ));
}

#[test]
fn list_joins_names_orders_by_surname_and_hides_inactive() {
    let conn = open_db_in_memory().unwrap();
    let sales = branch(&conn, "Acme", "Sales");
    let globex = branch(&conn, "Globex", "Sales");
    let service = service(&conn);

    let zapata = service.create(&sales, draft("Eva", "Zapata", None)).unwrap();
    let alba = service.create(&sales, draft("Luis", "Alba", None)).unwrap();
    service.create(&globex, draft("Ana", "Ruiz", None)).unwrap();

    let acme = service.list_active(Some(sales.company_id)).unwrap();
    let names = acme
        .iter()
        .map(|item| item.employee.details.last_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Alba", "Zapata"]);
    assert_eq!(acme[0].company_name, "Acme");
    assert_eq!(acme[0].department_name, "Sales");
    assert_eq!(acme[0].subdepartment_name, "Core");
    assert_eq!(acme[0].position_name, "Analyst");
    assert_eq!(service.list_active(None).unwrap().len(), 3);

    service.deactivate(zapata.id).unwrap();
    let active = service.list_active(Some(sales.company_id)).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].employee.id, alba.id);

    let everyone = service
        .list(&EmployeeListQuery {
            company_id: Some(sales.company_id),
            include_inactive: true,
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert_eq!(everyone.len(), 2);
    assert!(!service.get(zapata.id).unwrap().unwrap().is_active());

    assert!(matches!(
        service.deactivate(999),
        Err(EmployeeServiceError::NotFound(999))
    ));
}
