//! Domain model for the HR dashboard core.
//!
//! # Responsibility
//! - Define canonical records shared by repositories and services.
//! - Keep validation next to the data it guards.

pub mod employee;
pub mod org;
pub mod reminder;
pub mod user;
