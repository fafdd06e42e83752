//! Employee use-case service.
//!
//! # Responsibility
//! - Normalize and validate employee drafts before persistence.
//! - Check that a placement forms one consistent org branch.
//! - Expose list/deactivate entry points used by the dashboard and the
//!   reminder detection pass.

use crate::model::employee::{
    Employee, EmployeeDraft, EmployeeId, EmployeeListItem, EmployeeStatus,
    EmployeeValidationError, Placement,
};
use crate::model::org::CompanyId;
use crate::repo::employee_repo::{EmployeeListQuery, EmployeeRepository};
use crate::repo::org_repo::OrgRepository;
use crate::repo::RepoError;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmployeeServiceError {
    #[error(transparent)]
    Invalid(#[from] EmployeeValidationError),
    #[error("placement is inconsistent: {0}")]
    InvalidPlacement(String),
    #[error("employee not found: {0}")]
    NotFound(EmployeeId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type EmployeeServiceResult<T> = Result<T, EmployeeServiceError>;

pub struct EmployeeService<E: EmployeeRepository, O: OrgRepository> {
    employees: E,
    org: O,
}

impl<E: EmployeeRepository, O: OrgRepository> EmployeeService<E, O> {
    pub fn new(employees: E, org: O) -> Self {
        Self { employees, org }
    }

    /// Registers a new active employee and assigns its per-company badge.
    pub fn create(
        &self,
        placement: &Placement,
        draft: EmployeeDraft,
    ) -> EmployeeServiceResult<Employee> {
        let draft = draft.normalized();
        draft.validate()?;
        self.check_placement(placement)?;

        let employee = self.employees.create_employee(placement, &draft)?;
        info!(
            "event=employee_create module=employees status=ok employee_id={} company_id={} badge={}",
            employee.id, placement.company_id, employee.badge_number
        );
        Ok(employee)
    }

    pub fn update(
        &self,
        id: EmployeeId,
        placement: &Placement,
        draft: EmployeeDraft,
    ) -> EmployeeServiceResult<Employee> {
        let draft = draft.normalized();
        draft.validate()?;
        self.check_placement(placement)?;

        match self.employees.update_employee(id, placement, &draft) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => return Err(EmployeeServiceError::NotFound(id)),
            Err(err) => return Err(err.into()),
        }
        self.employees
            .get_employee(id)?
            .ok_or(EmployeeServiceError::NotFound(id))
    }

    pub fn get(&self, id: EmployeeId) -> EmployeeServiceResult<Option<Employee>> {
        Ok(self.employees.get_employee(id)?)
    }

    /// Active employees, optionally scoped to one company.
    pub fn list_active(
        &self,
        company_id: Option<CompanyId>,
    ) -> EmployeeServiceResult<Vec<EmployeeListItem>> {
        Ok(self.employees.list_employees(&EmployeeListQuery {
            company_id,
            ..EmployeeListQuery::default()
        })?)
    }

    pub fn list(&self, query: &EmployeeListQuery) -> EmployeeServiceResult<Vec<EmployeeListItem>> {
        Ok(self.employees.list_employees(query)?)
    }

    /// Marks an employee inactive. Inactive rows drop out of statistics and
    /// birthday detection but stay queryable.
    pub fn deactivate(&self, id: EmployeeId) -> EmployeeServiceResult<()> {
        match self.employees.set_status(id, EmployeeStatus::Inactive) {
            Ok(()) => {
                info!("event=employee_deactivate module=employees status=ok employee_id={id}");
                Ok(())
            }
            Err(RepoError::NotFound { .. }) => Err(EmployeeServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    fn check_placement(&self, placement: &Placement) -> EmployeeServiceResult<()> {
        if self.org.get_company(placement.company_id)?.is_none() {
            return Err(EmployeeServiceError::InvalidPlacement(format!(
                "company {} does not exist",
                placement.company_id
            )));
        }
        let department = self.org.get_department(placement.department_id)?;
        if department.map(|d| d.company_id) != Some(placement.company_id) {
            return Err(EmployeeServiceError::InvalidPlacement(format!(
                "department {} is not part of company {}",
                placement.department_id, placement.company_id
            )));
        }
        let subdepartment = self.org.get_subdepartment(placement.subdepartment_id)?;
        if subdepartment.map(|s| s.department_id) != Some(placement.department_id) {
            return Err(EmployeeServiceError::InvalidPlacement(format!(
                "subdepartment {} is not part of department {}",
                placement.subdepartment_id, placement.department_id
            )));
        }
        let position = self.org.get_position(placement.position_id)?;
        if position.map(|p| p.subdepartment_id) != Some(placement.subdepartment_id) {
            return Err(EmployeeServiceError::InvalidPlacement(format!(
                "position {} is not part of subdepartment {}",
                placement.position_id, placement.subdepartment_id
            )));
        }
        Ok(())
    }
}
