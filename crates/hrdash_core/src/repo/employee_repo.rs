//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist employee rows and assign per-company badge numbers.
//! - Serve the joined list read model and the dashboard compensation feed.
//!
//! # Invariants
//! - Badge assignment and row insert commit in one transaction.
//! - Employees are never hard-deleted; deactivation flips `status`.
//! - List ordering is deterministic: `last_name ASC, first_name ASC, id ASC`.

use crate::db::ensure_migrated;
use crate::model::employee::{
    Employee, EmployeeDraft, EmployeeId, EmployeeListItem, EmployeeStatus, Gender, Placement,
};
use crate::model::org::{CompanyId, DepartmentId};
use crate::repo::{RepoError, RepoResult};
use crate::stats::CompensationRecord;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    e.id,
    e.badge_number,
    e.first_name,
    e.last_name,
    e.national_id,
    e.email,
    e.birth_date,
    e.gender,
    e.status,
    e.title,
    e.linkedin,
    e.salary,
    e.bonus,
    e.incentive,
    e.company_id,
    e.department_id,
    e.subdepartment_id,
    e.position_id
FROM employees e";

/// Query options for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    /// Restricts to one company. `None` lists every company.
    pub company_id: Option<CompanyId>,
    /// Restricts to one department.
    pub department_id: Option<DepartmentId>,
    /// Includes deactivated employees when true.
    pub include_inactive: bool,
}

/// Repository interface for employee operations.
pub trait EmployeeRepository {
    /// Inserts a new active employee and assigns the next badge number of
    /// its company.
    fn create_employee(&self, placement: &Placement, draft: &EmployeeDraft)
        -> RepoResult<Employee>;
    /// Replaces editable fields and placement of an existing employee.
    fn update_employee(
        &self,
        id: EmployeeId,
        placement: &Placement,
        draft: &EmployeeDraft,
    ) -> RepoResult<()>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<EmployeeListItem>>;
    fn set_status(&self, id: EmployeeId, status: EmployeeStatus) -> RepoResult<()>;
    /// Compensation rows of active employees, optionally scoped to a company.
    fn list_compensation(&self, company_id: Option<CompanyId>)
        -> RepoResult<Vec<CompensationRecord>>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(
        &self,
        placement: &Placement,
        draft: &EmployeeDraft,
    ) -> RepoResult<Employee> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let badge_number: i64 = tx.query_row(
            "INSERT INTO employee_counters (company_id, last_id) VALUES (?1, 1)
             ON CONFLICT (company_id) DO UPDATE SET last_id = last_id + 1
             RETURNING last_id;",
            [placement.company_id],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT INTO employees (
                badge_number,
                first_name,
                last_name,
                national_id,
                email,
                birth_date,
                gender,
                status,
                title,
                linkedin,
                salary,
                bonus,
                incentive,
                company_id,
                department_id,
                subdepartment_id,
                position_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17);",
            params![
                badge_number,
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.national_id,
                draft.email.as_deref(),
                draft.birth_date.map(format_birth_date),
                draft.gender.as_db(),
                EmployeeStatus::Active.as_db(),
                draft.title.as_deref(),
                draft.linkedin.as_deref(),
                draft.salary,
                draft.bonus,
                draft.incentive,
                placement.company_id,
                placement.department_id,
                placement.subdepartment_id,
                placement.position_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Employee {
            id,
            badge_number,
            status: EmployeeStatus::Active,
            placement: *placement,
            details: draft.clone(),
        })
    }

    fn update_employee(
        &self,
        id: EmployeeId,
        placement: &Placement,
        draft: &EmployeeDraft,
    ) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE employees
             SET
                first_name = ?1,
                last_name = ?2,
                national_id = ?3,
                email = ?4,
                birth_date = ?5,
                gender = ?6,
                title = ?7,
                linkedin = ?8,
                salary = ?9,
                bonus = ?10,
                incentive = ?11,
                company_id = ?12,
                department_id = ?13,
                subdepartment_id = ?14,
                position_id = ?15
             WHERE id = ?16;",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.national_id,
                draft.email.as_deref(),
                draft.birth_date.map(format_birth_date),
                draft.gender.as_db(),
                draft.title.as_deref(),
                draft.linkedin.as_deref(),
                draft.salary,
                draft.bonus,
                draft.incentive,
                placement.company_id,
                placement.department_id,
                placement.subdepartment_id,
                placement.position_id,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("employee", id));
        }
        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE e.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<EmployeeListItem>> {
        let select = EMPLOYEE_SELECT_SQL.replace(
            "FROM employees e",
            ",
    c.name AS company_name,
    d.name AS department_name,
    s.name AS subdepartment_name,
    p.name AS position_name
FROM employees e
JOIN companies c ON c.id = e.company_id
JOIN departments d ON d.id = e.department_id
JOIN subdepartments s ON s.id = e.subdepartment_id
JOIN positions p ON p.id = e.position_id",
        );
        let mut sql = format!("{select} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_inactive {
            sql.push_str(" AND e.status = ?");
            bind_values.push(Value::Text(EmployeeStatus::Active.as_db().to_string()));
        }
        if let Some(company_id) = query.company_id {
            sql.push_str(" AND e.company_id = ?");
            bind_values.push(Value::Integer(company_id));
        }
        if let Some(department_id) = query.department_id {
            sql.push_str(" AND e.department_id = ?");
            bind_values.push(Value::Integer(department_id));
        }
        sql.push_str(" ORDER BY e.last_name ASC, e.first_name ASC, e.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(EmployeeListItem {
                employee: parse_employee_row(row)?,
                company_name: row.get("company_name")?,
                department_name: row.get("department_name")?,
                subdepartment_name: row.get("subdepartment_name")?,
                position_name: row.get("position_name")?,
            });
        }
        Ok(items)
    }

    fn set_status(&self, id: EmployeeId, status: EmployeeStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees SET status = ?1 WHERE id = ?2;",
            params![status.as_db(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("employee", id));
        }
        Ok(())
    }

    fn list_compensation(
        &self,
        company_id: Option<CompanyId>,
    ) -> RepoResult<Vec<CompensationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.department_id, d.name AS department_name, e.salary, e.gender
             FROM employees e
             LEFT JOIN departments d ON d.id = e.department_id
             WHERE e.status = 'active'
               AND (?1 IS NULL OR e.company_id = ?1)
             ORDER BY e.id ASC;",
        )?;
        let mut rows = stmt.query([company_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(CompensationRecord {
                department_id: row.get("department_id")?,
                department_name: row.get("department_name")?,
                salary: row.get("salary")?,
                gender: parse_gender(&row.get::<_, String>("gender")?)?,
            });
        }
        Ok(records)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let status_text: String = row.get("status")?;
    let status = EmployeeStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in employees.status"
        ))
    })?;

    let birth_date = match row.get::<_, Option<String>>("birth_date")? {
        Some(text) => Some(
            NaiveDate::parse_from_str(&text, BIRTH_DATE_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid birth date `{text}` in employees.birth_date"
                ))
            })?,
        ),
        None => None,
    };

    Ok(Employee {
        id: row.get("id")?,
        badge_number: row.get("badge_number")?,
        status,
        placement: Placement {
            company_id: row.get("company_id")?,
            department_id: row.get("department_id")?,
            subdepartment_id: row.get("subdepartment_id")?,
            position_id: row.get("position_id")?,
        },
        details: EmployeeDraft {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            national_id: row.get("national_id")?,
            email: row.get("email")?,
            birth_date,
            gender: parse_gender(&row.get::<_, String>("gender")?)?,
            title: row.get("title")?,
            linkedin: row.get("linkedin")?,
            salary: row.get("salary")?,
            bonus: row.get("bonus")?,
            incentive: row.get("incentive")?,
        },
    })
}

fn parse_gender(value: &str) -> RepoResult<Gender> {
    Gender::parse(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid gender `{value}` in employees.gender"))
    })
}

fn format_birth_date(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_FORMAT).to_string()
}
