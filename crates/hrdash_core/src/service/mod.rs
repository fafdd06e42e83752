//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI and UI layers decoupled from storage details.
//! - Turn read failures on dashboard surfaces into notices, not errors.

pub mod dashboard_service;
pub mod employee_service;
pub mod org_service;
pub mod reminder_feed;
pub mod reminder_service;
