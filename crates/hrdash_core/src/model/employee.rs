//! Employee domain model.
//!
//! # Responsibility
//! - Define the stored employee record and its create/update input.
//! - Validate contact and compensation fields before persistence.
//!
//! # Invariants
//! - Employees are deactivated, never hard-deleted.
//! - `salary` is optional; when present it is finite and non-negative.
//! - `badge_number` is assigned once per company and never reused.

use crate::model::org::{CompanyId, DepartmentId, PositionId, SubdepartmentId};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub type EmployeeId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unspecified => "unspecified",
        }
    }

    /// Parses stored or user-entered values; accepts the Spanish labels
    /// used by older rows.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "masculino" => Some(Self::Male),
            "female" | "femenino" => Some(Self::Female),
            "unspecified" | "" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Employee-level validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmployeeValidationError {
    #[error("employee first name must not be blank")]
    BlankFirstName,
    #[error("employee last name must not be blank")]
    BlankLastName,
    #[error("invalid email address: `{0}`")]
    InvalidEmail(String),
    #[error("invalid {field} amount: {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// Org placement of one employee. All four levels are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub company_id: CompanyId,
    pub department_id: DepartmentId,
    pub subdepartment_id: SubdepartmentId,
    pub position_id: PositionId,
}

/// Editable employee fields shared by create and update paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<i64>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub title: Option<String>,
    pub linkedin: Option<String>,
    pub salary: Option<f64>,
    pub bonus: f64,
    pub incentive: f64,
}

impl EmployeeDraft {
    /// Creates a draft with names only; every other field is empty.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            national_id: None,
            email: None,
            birth_date: None,
            gender: Gender::Unspecified,
            title: None,
            linkedin: None,
            salary: None,
            bonus: 0.0,
            incentive: 0.0,
        }
    }

    /// Trims text fields and turns empty optional strings into `None`.
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = blank_to_none(self.email);
        self.title = blank_to_none(self.title);
        self.linkedin = blank_to_none(self.linkedin);
        self
    }

    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankLastName);
        }
        if let Some(email) = self.email.as_deref() {
            if !is_valid_email(email) {
                return Err(EmployeeValidationError::InvalidEmail(email.to_string()));
            }
        }
        if let Some(salary) = self.salary {
            validate_amount("salary", salary)?;
        }
        validate_amount("bonus", self.bonus)?;
        validate_amount("incentive", self.incentive)?;
        Ok(())
    }
}

/// Stored employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub badge_number: i64,
    pub status: EmployeeStatus,
    pub placement: Placement,
    #[serde(flatten)]
    pub details: EmployeeDraft,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.details.first_name, self.details.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Employee row joined with the display names of its placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListItem {
    pub employee: Employee,
    pub company_name: String,
    pub department_name: String,
    pub subdepartment_name: String,
    pub position_name: String,
}

/// Returns whether `value` looks like a deliverable e-mail address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn validate_amount(field: &'static str, value: f64) -> Result<(), EmployeeValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EmployeeValidationError::InvalidAmount { field, value })
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_accepts_legacy_labels() {
        assert_eq!(Gender::parse("Masculino"), Some(Gender::Male));
        assert_eq!(Gender::parse("femenino"), Some(Gender::Female));
        assert_eq!(Gender::parse(""), Some(Gender::Unspecified));
        assert_eq!(Gender::parse("robot"), None);
    }

    #[test]
    fn normalized_draft_drops_blank_optionals() {
        let mut draft = EmployeeDraft::new("  Ana ", " Paz");
        draft.email = Some("   ".to_string());
        draft.title = Some(" Analyst ".to_string());
        let draft = draft.normalized();
        assert_eq!(draft.first_name, "Ana");
        assert_eq!(draft.last_name, "Paz");
        assert_eq!(draft.email, None);
        assert_eq!(draft.title.as_deref(), Some("Analyst"));
    }

    #[test]
    fn validate_rejects_bad_email_and_negative_salary() {
        let mut draft = EmployeeDraft::new("Ana", "Paz");
        draft.email = Some("ana.example.com".to_string());
        assert!(matches!(
            draft.validate(),
            Err(EmployeeValidationError::InvalidEmail(_))
        ));

        draft.email = Some("ana@example.com".to_string());
        draft.salary = Some(-1.0);
        assert!(matches!(
            draft.validate(),
            Err(EmployeeValidationError::InvalidAmount { field: "salary", .. })
        ));

        draft.salary = Some(52_000.0);
        assert!(draft.validate().is_ok());
    }
}
