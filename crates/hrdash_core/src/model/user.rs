//! User profile, role and per-user display settings.
//!
//! # Invariants
//! - Role wire values are `ADMIN`, `rrhh` and `nominas`; parsing is
//!   case-insensitive so legacy `admin` rows still load.
//! - Settings always deserialize: missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of an authenticated user, issued by the identity provider.
pub type UserId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    /// Human resources staff.
    #[serde(rename = "rrhh")]
    HumanResources,
    /// Payroll staff.
    #[serde(rename = "nominas")]
    Payroll,
}

impl Role {
    /// Role assigned to users that sign in without a stored profile.
    pub const DEFAULT: Self = Self::HumanResources;

    pub fn as_db(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::HumanResources => "rrhh",
            Self::Payroll => "nominas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "rrhh" => Some(Self::HumanResources),
            "nominas" => Some(Self::Payroll),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Fr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    pub mode: ThemeMode,
    pub font_size: FontSize,
    pub animations: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: ThemeMode::System,
            font_size: FontSize::Normal,
            animations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub preferred: Language,
}

/// Per-user presentation settings, stored as JSON on the profile row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: ThemeSettings,
    pub language: LanguageSettings,
}

/// Stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub settings: AppSettings,
    /// E-mail of the admin that provisioned this profile.
    pub created_by: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse(" RRHH "), Some(Role::HumanResources));
        assert_eq!(Role::parse("nominas"), Some(Role::Payroll));
        assert_eq!(Role::parse("guest"), None);
    }

    #[test]
    fn partial_settings_json_falls_back_to_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"theme":{"mode":"dark"}}"#).unwrap();
        assert_eq!(settings.theme.mode, ThemeMode::Dark);
        assert_eq!(settings.theme.font_size, FontSize::Normal);
        assert!(settings.theme.animations);
        assert_eq!(settings.language.preferred, Language::Es);
    }

    #[test]
    fn settings_serialize_with_camel_case_theme_fields() {
        let json = serde_json::to_string(&AppSettings::default()).unwrap();
        assert!(json.contains("\"fontSize\":\"normal\""));
        assert!(json.contains("\"preferred\":\"es\""));
    }
}
