//! Organization hierarchy: company → department → subdepartment → position.
//!
//! # Invariants
//! - Every level except `Company` belongs to exactly one parent.
//! - Names are unique inside their parent, compared case-insensitively.

use serde::{Deserialize, Serialize};

pub type CompanyId = i64;
pub type DepartmentId = i64;
pub type SubdepartmentId = i64;
pub type PositionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Holding group the company belongs to, when tracked.
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdepartment {
    pub id: SubdepartmentId,
    pub name: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,
    pub subdepartment_id: SubdepartmentId,
}

/// Uniqueness key for an org-unit name: trimmed and Unicode-lowercased, so
/// "Ñandú SA" and "ñandú sa" collide.
pub fn unit_name_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trims an org-unit name; returns `None` when nothing is left.
pub fn normalize_unit_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
