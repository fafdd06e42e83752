//! Administration of the org hierarchy and of user profiles.
//!
//! # Responsibility
//! - Create companies, departments, subdepartments and positions.
//! - Provision user profiles with an explicit role.
//!
//! # Invariants
//! - Every write requires an admin actor.
//! - Names are trimmed; blank names are rejected before storage.
//! - A child is only created under an existing parent.

use crate::model::employee::is_valid_email;
use crate::model::org::{
    normalize_unit_name, Company, CompanyId, Department, DepartmentId, Position, Subdepartment,
    SubdepartmentId,
};
use crate::model::user::{AppSettings, Role, UserId, UserProfile};
use crate::repo::org_repo::OrgRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::session::{require_admin, AccessError};
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrgServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("name must not be blank")]
    InvalidName,
    #[error("invalid e-mail address: {0}")]
    InvalidEmail(String),
    #[error("{entity} not found: {id}")]
    ParentNotFound { entity: &'static str, id: i64 },
    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for OrgServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Duplicate { entity, name } => Self::Duplicate { entity, name },
            other => Self::Repo(other),
        }
    }
}

pub type OrgServiceResult<T> = Result<T, OrgServiceError>;

pub struct OrgService<O: OrgRepository> {
    repo: O,
}

impl<O: OrgRepository> OrgService<O> {
    pub fn new(repo: O) -> Self {
        Self { repo }
    }

    pub fn create_company(
        &self,
        actor: &UserProfile,
        name: &str,
        group_id: Option<i64>,
    ) -> OrgServiceResult<Company> {
        require_admin(actor)?;
        let name = unit_name(name)?;
        let company = self
            .repo
            .create_company(&name, group_id, Some(actor.email.as_str()))
            .inspect_err(|err| log_rejected("company", err))?;
        info!(
            "event=org_create module=org status=ok entity=company id={}",
            company.id
        );
        Ok(company)
    }

    pub fn create_department(
        &self,
        actor: &UserProfile,
        company_id: CompanyId,
        name: &str,
    ) -> OrgServiceResult<Department> {
        require_admin(actor)?;
        let name = unit_name(name)?;
        if self.repo.get_company(company_id)?.is_none() {
            return Err(OrgServiceError::ParentNotFound {
                entity: "company",
                id: company_id,
            });
        }
        let department = self
            .repo
            .create_department(company_id, &name)
            .inspect_err(|err| log_rejected("department", err))?;
        info!(
            "event=org_create module=org status=ok entity=department id={}",
            department.id
        );
        Ok(department)
    }

    pub fn create_subdepartment(
        &self,
        actor: &UserProfile,
        department_id: DepartmentId,
        name: &str,
    ) -> OrgServiceResult<Subdepartment> {
        require_admin(actor)?;
        let name = unit_name(name)?;
        if self.repo.get_department(department_id)?.is_none() {
            return Err(OrgServiceError::ParentNotFound {
                entity: "department",
                id: department_id,
            });
        }
        let subdepartment = self
            .repo
            .create_subdepartment(department_id, &name)
            .inspect_err(|err| log_rejected("subdepartment", err))?;
        info!(
            "event=org_create module=org status=ok entity=subdepartment id={}",
            subdepartment.id
        );
        Ok(subdepartment)
    }

    pub fn create_position(
        &self,
        actor: &UserProfile,
        subdepartment_id: SubdepartmentId,
        name: &str,
    ) -> OrgServiceResult<Position> {
        require_admin(actor)?;
        let name = unit_name(name)?;
        if self.repo.get_subdepartment(subdepartment_id)?.is_none() {
            return Err(OrgServiceError::ParentNotFound {
                entity: "subdepartment",
                id: subdepartment_id,
            });
        }
        let position = self
            .repo
            .create_position(subdepartment_id, &name)
            .inspect_err(|err| log_rejected("position", err))?;
        info!(
            "event=org_create module=org status=ok entity=position id={}",
            position.id
        );
        Ok(position)
    }

    pub fn list_companies(&self) -> OrgServiceResult<Vec<Company>> {
        Ok(self.repo.list_companies()?)
    }

    pub fn list_departments(&self, company_id: CompanyId) -> OrgServiceResult<Vec<Department>> {
        Ok(self.repo.list_departments(company_id)?)
    }

    pub fn list_subdepartments(
        &self,
        department_id: DepartmentId,
    ) -> OrgServiceResult<Vec<Subdepartment>> {
        Ok(self.repo.list_subdepartments(department_id)?)
    }

    pub fn list_positions(
        &self,
        subdepartment_id: SubdepartmentId,
    ) -> OrgServiceResult<Vec<Position>> {
        Ok(self.repo.list_positions(subdepartment_id)?)
    }
}

/// Creates a profile for another user with an explicit role.
pub fn provision_user<U: UserRepository>(
    users: &U,
    actor: &UserProfile,
    user_id: UserId,
    email: &str,
    role: Role,
    now_ms: i64,
) -> OrgServiceResult<UserProfile> {
    require_admin(actor)?;
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(OrgServiceError::InvalidEmail(email.to_string()));
    }

    let profile = UserProfile {
        id: user_id,
        email: email.to_string(),
        role,
        settings: AppSettings::default(),
        created_by: Some(actor.email.clone()),
        created_at: now_ms,
    };
    users
        .create_user(&profile)
        .inspect_err(|err| log_rejected("user", err))?;
    info!(
        "event=user_provision module=org status=ok role={}",
        role.as_db()
    );
    Ok(profile)
}

fn unit_name(name: &str) -> OrgServiceResult<String> {
    normalize_unit_name(name).ok_or(OrgServiceError::InvalidName)
}

fn log_rejected(entity: &str, err: &RepoError) {
    warn!("event=org_create module=org status=rejected entity={entity} error={err}");
}
