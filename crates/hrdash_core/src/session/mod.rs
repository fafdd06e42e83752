//! Session context: who is signed in, with which role and settings.
//!
//! # Responsibility
//! - Own the current user profile explicitly instead of through globals.
//! - Translate identity-provider events into profile load/teardown.
//! - Gate admin-only operations and compute the visible menu.
//!
//! # Invariants
//! - A signed-out context has no profile, an empty menu and default
//!   settings.
//! - Sign-in for an identity without a stored profile provisions one with
//!   `Role::DEFAULT`.

pub mod navigation;

use crate::model::user::{AppSettings, Role, UserId, UserProfile};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::info;
use navigation::{can_access, menu_for, MenuItem, Section};
use thiserror::Error;

/// Identity reported by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: UserId,
    pub email: String,
}

/// Change notification from the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(AuthIdentity),
    SignedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("no user is signed in")]
    Unauthenticated,
    #[error("role `{}` may not access {section:?}", .role.as_db())]
    Forbidden { role: Role, section: Section },
    #[error("operation requires an admin; current role is `{}`", .role.as_db())]
    AdminRequired { role: Role },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Explicit per-session state.
#[derive(Debug, Default)]
pub struct SessionContext {
    profile: Option<UserProfile>,
}

impl SessionContext {
    /// Creates a signed-out context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one identity-provider event.
    pub fn handle<U: UserRepository>(
        &mut self,
        event: SessionEvent,
        users: &U,
        now_ms: i64,
    ) -> Result<Option<&UserProfile>, SessionError> {
        match event {
            SessionEvent::SignedIn(identity) => {
                let profile = match users.get_user(identity.user_id)? {
                    Some(profile) => profile,
                    None => {
                        let profile = UserProfile {
                            id: identity.user_id,
                            email: identity.email,
                            role: Role::DEFAULT,
                            settings: AppSettings::default(),
                            created_by: None,
                            created_at: now_ms,
                        };
                        users.create_user(&profile)?;
                        info!(
                            "event=profile_provisioned module=session status=ok role={}",
                            profile.role.as_db()
                        );
                        profile
                    }
                };
                info!(
                    "event=sign_in module=session status=ok role={}",
                    profile.role.as_db()
                );
                self.profile = Some(profile);
            }
            SessionEvent::SignedOut => {
                if self.profile.take().is_some() {
                    info!("event=sign_out module=session status=ok");
                }
            }
        }
        Ok(self.profile.as_ref())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|profile| profile.role)
    }

    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Current settings; defaults when signed out.
    pub fn settings(&self) -> AppSettings {
        self.profile
            .as_ref()
            .map(|profile| profile.settings.clone())
            .unwrap_or_default()
    }

    /// Persists new settings for the signed-in user.
    pub fn update_settings<U: UserRepository>(
        &mut self,
        users: &U,
        settings: AppSettings,
    ) -> Result<(), SessionError> {
        let profile = self.profile.as_mut().ok_or(AccessError::Unauthenticated)?;
        users.update_settings(profile.id, &settings)?;
        profile.settings = settings;
        Ok(())
    }

    /// Visible sidebar entries; empty when signed out.
    pub fn menu(&self) -> Vec<MenuItem> {
        self.role().map(menu_for).unwrap_or_default()
    }

    pub fn authorize(&self, section: Section) -> Result<&UserProfile, AccessError> {
        let profile = self.profile.as_ref().ok_or(AccessError::Unauthenticated)?;
        if can_access(profile.role, section) {
            Ok(profile)
        } else {
            Err(AccessError::Forbidden {
                role: profile.role,
                section,
            })
        }
    }

    pub fn require_admin(&self) -> Result<&UserProfile, AccessError> {
        let profile = self.profile.as_ref().ok_or(AccessError::Unauthenticated)?;
        require_admin(profile)?;
        Ok(profile)
    }
}

/// Fails unless `profile` has the admin role.
pub fn require_admin(profile: &UserProfile) -> Result<(), AccessError> {
    if profile.is_admin() {
        Ok(())
    } else {
        Err(AccessError::AdminRequired { role: profile.role })
    }
}
