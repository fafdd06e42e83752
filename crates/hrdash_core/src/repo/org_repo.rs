//! Organization hierarchy repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist companies, departments, subdepartments and positions.
//! - Keep child listings deterministic: `name ASC, id ASC`.
//!
//! # Invariants
//! - Names are unique inside their parent (case-insensitive); violations
//!   surface as `RepoError::Duplicate`.
//! - Parent rows must exist (`foreign_keys=ON`).

use crate::db::ensure_migrated;
use crate::model::org::{
    unit_name_key, Company, CompanyId, Department, DepartmentId, Position, PositionId, Subdepartment,
    SubdepartmentId,
};
use crate::repo::{map_unique_violation, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for the org hierarchy.
pub trait OrgRepository {
    fn create_company(
        &self,
        name: &str,
        group_id: Option<i64>,
        created_by: Option<&str>,
    ) -> RepoResult<Company>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn list_companies(&self) -> RepoResult<Vec<Company>>;

    fn create_department(&self, company_id: CompanyId, name: &str) -> RepoResult<Department>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn list_departments(&self, company_id: CompanyId) -> RepoResult<Vec<Department>>;

    fn create_subdepartment(
        &self,
        department_id: DepartmentId,
        name: &str,
    ) -> RepoResult<Subdepartment>;
    fn get_subdepartment(&self, id: SubdepartmentId) -> RepoResult<Option<Subdepartment>>;
    fn list_subdepartments(&self, department_id: DepartmentId) -> RepoResult<Vec<Subdepartment>>;

    fn create_position(&self, subdepartment_id: SubdepartmentId, name: &str)
        -> RepoResult<Position>;
    fn get_position(&self, id: PositionId) -> RepoResult<Option<Position>>;
    fn list_positions(&self, subdepartment_id: SubdepartmentId) -> RepoResult<Vec<Position>>;
}

/// SQLite-backed org repository.
pub struct SqliteOrgRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrgRepository<'conn> {
    /// Creates a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }

    fn query_list<T>(
        &self,
        sql: &str,
        parent_id: i64,
        parse: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([parent_id], parse)?;
        Ok(rows.collect::<rusqlite::Result<Vec<T>>>()?)
    }
}

impl OrgRepository for SqliteOrgRepository<'_> {
    fn create_company(
        &self,
        name: &str,
        group_id: Option<i64>,
        created_by: Option<&str>,
    ) -> RepoResult<Company> {
        self.conn
            .execute(
                "INSERT INTO companies (name, name_key, group_id, created_by) VALUES (?1, ?2, ?3, ?4);",
                params![name, unit_name_key(name), group_id, created_by],
            )
            .map_err(|err| map_unique_violation(err, "company", name))?;

        Ok(Company {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            group_id,
        })
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, group_id FROM companies WHERE id = ?1;",
                [id],
                parse_company_row,
            )
            .optional()?)
    }

    fn list_companies(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, group_id FROM companies ORDER BY name ASC, id ASC;")?;
        let rows = stmt.query_map([], parse_company_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn create_department(&self, company_id: CompanyId, name: &str) -> RepoResult<Department> {
        self.conn
            .execute(
                "INSERT INTO departments (name, name_key, company_id) VALUES (?1, ?2, ?3);",
                params![name, unit_name_key(name), company_id],
            )
            .map_err(|err| map_unique_violation(err, "department", name))?;

        Ok(Department {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            company_id,
        })
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, company_id FROM departments WHERE id = ?1;",
                [id],
                parse_department_row,
            )
            .optional()?)
    }

    fn list_departments(&self, company_id: CompanyId) -> RepoResult<Vec<Department>> {
        self.query_list(
            "SELECT id, name, company_id FROM departments
             WHERE company_id = ?1
             ORDER BY name ASC, id ASC;",
            company_id,
            parse_department_row,
        )
    }

    fn create_subdepartment(
        &self,
        department_id: DepartmentId,
        name: &str,
    ) -> RepoResult<Subdepartment> {
        self.conn
            .execute(
                "INSERT INTO subdepartments (name, name_key, department_id) VALUES (?1, ?2, ?3);",
                params![name, unit_name_key(name), department_id],
            )
            .map_err(|err| map_unique_violation(err, "subdepartment", name))?;

        Ok(Subdepartment {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            department_id,
        })
    }

    fn get_subdepartment(&self, id: SubdepartmentId) -> RepoResult<Option<Subdepartment>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, department_id FROM subdepartments WHERE id = ?1;",
                [id],
                parse_subdepartment_row,
            )
            .optional()?)
    }

    fn list_subdepartments(&self, department_id: DepartmentId) -> RepoResult<Vec<Subdepartment>> {
        self.query_list(
            "SELECT id, name, department_id FROM subdepartments
             WHERE department_id = ?1
             ORDER BY name ASC, id ASC;",
            department_id,
            parse_subdepartment_row,
        )
    }

    fn create_position(
        &self,
        subdepartment_id: SubdepartmentId,
        name: &str,
    ) -> RepoResult<Position> {
        self.conn
            .execute(
                "INSERT INTO positions (name, name_key, subdepartment_id) VALUES (?1, ?2, ?3);",
                params![name, unit_name_key(name), subdepartment_id],
            )
            .map_err(|err| map_unique_violation(err, "position", name))?;

        Ok(Position {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            subdepartment_id,
        })
    }

    fn get_position(&self, id: PositionId) -> RepoResult<Option<Position>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, subdepartment_id FROM positions WHERE id = ?1;",
                [id],
                parse_position_row,
            )
            .optional()?)
    }

    fn list_positions(&self, subdepartment_id: SubdepartmentId) -> RepoResult<Vec<Position>> {
        self.query_list(
            "SELECT id, name, subdepartment_id FROM positions
             WHERE subdepartment_id = ?1
             ORDER BY name ASC, id ASC;",
            subdepartment_id,
            parse_position_row,
        )
    }
}

fn parse_company_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        group_id: row.get("group_id")?,
    })
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
        company_id: row.get("company_id")?,
    })
}

fn parse_subdepartment_row(row: &Row<'_>) -> rusqlite::Result<Subdepartment> {
    Ok(Subdepartment {
        id: row.get("id")?,
        name: row.get("name")?,
        department_id: row.get("department_id")?,
    })
}

fn parse_position_row(row: &Row<'_>) -> rusqlite::Result<Position> {
    Ok(Position {
        id: row.get("id")?,
        name: row.get("name")?,
        subdepartment_id: row.get("subdepartment_id")?,
    })
}
