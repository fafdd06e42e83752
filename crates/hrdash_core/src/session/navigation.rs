//! Role-gated navigation sections.
//!
//! Menu content is static per role; the presentation layer owns labels
//! (looked up by `label_key`) and icons.

use crate::model::user::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Employees,
    Attendance,
    Performance,
    Payroll,
    Benefits,
    Courses,
    Applications,
    Reminders,
}

impl Section {
    pub fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Employees => "/employees",
            Self::Attendance => "/attendance",
            Self::Performance => "/performance",
            Self::Payroll => "/payroll",
            Self::Benefits => "/benefits",
            Self::Courses => "/courses",
            Self::Applications => "/applications",
            Self::Reminders => "/reminders",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Dashboard => "menu.dashboard",
            Self::Employees => "menu.employees",
            Self::Attendance => "menu.attendance",
            Self::Performance => "menu.performance",
            Self::Payroll => "menu.payroll",
            Self::Benefits => "menu.benefits",
            Self::Courses => "menu.courses",
            Self::Applications => "menu.applications",
            Self::Reminders => "menu.reminders",
        }
    }
}

const ADMIN_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Employees,
    Section::Attendance,
    Section::Performance,
    Section::Payroll,
    Section::Benefits,
    Section::Courses,
    Section::Applications,
    Section::Reminders,
];

const HUMAN_RESOURCES_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Employees,
    Section::Attendance,
    Section::Performance,
    Section::Benefits,
    Section::Courses,
    Section::Reminders,
];

const PAYROLL_SECTIONS: &[Section] = &[Section::Dashboard, Section::Payroll, Section::Reminders];

/// One visible sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub section: Section,
    pub route: &'static str,
    pub label_key: &'static str,
}

/// Sections visible to `role`, in display order.
pub fn sections_for(role: Role) -> &'static [Section] {
    match role {
        Role::Admin => ADMIN_SECTIONS,
        Role::HumanResources => HUMAN_RESOURCES_SECTIONS,
        Role::Payroll => PAYROLL_SECTIONS,
    }
}

pub fn menu_for(role: Role) -> Vec<MenuItem> {
    sections_for(role)
        .iter()
        .map(|&section| MenuItem {
            section,
            route: section.route(),
            label_key: section.label_key(),
        })
        .collect()
}

pub fn can_access(role: Role, section: Section) -> bool {
    sections_for(role).contains(&section)
}
