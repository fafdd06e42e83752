use hrdash_core::db::open_db_in_memory;
use hrdash_core::model::user::{AppSettings, Language, Role, ThemeMode};
use hrdash_core::repo::user_repo::{SqliteUserRepository, UserRepository};
use hrdash_core::session::navigation::Section;
use hrdash_core::{AccessError, AuthIdentity, SessionContext, SessionError, SessionEvent};
use uuid::Uuid;

fn identity(email: &str) -> AuthIdentity {
    AuthIdentity {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
    }
}

#[test]
fn first_sign_in_provisions_a_human_resources_profile() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let mut session = SessionContext::new();
    let who = identity("new.hire@acme.test");

    let profile = session
        .handle(SessionEvent::SignedIn(who.clone()), &users, 1_000)
        .unwrap()
        .cloned()
        .unwrap();

    assert_eq!(profile.role, Role::HumanResources);
    assert_eq!(profile.created_at, 1_000);
    assert_eq!(users.get_user(who.user_id).unwrap(), Some(profile));
    assert!(session.menu().iter().any(|item| item.section == Section::Employees));
    assert!(!session.menu().iter().any(|item| item.section == Section::Payroll));
}

#[test]
fn sign_in_loads_the_stored_role() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let who = identity("payroll@acme.test");

    let mut session = SessionContext::new();
    session
        .handle(SessionEvent::SignedIn(who.clone()), &users, 0)
        .unwrap();
    users.update_role(who.user_id, Role::Payroll).unwrap();

    let mut fresh = SessionContext::new();
    fresh
        .handle(SessionEvent::SignedIn(who), &users, 0)
        .unwrap();

    assert_eq!(fresh.role(), Some(Role::Payroll));
    let sections = fresh
        .menu()
        .into_iter()
        .map(|item| item.section)
        .collect::<Vec<_>>();
    assert_eq!(
        sections,
        vec![Section::Dashboard, Section::Payroll, Section::Reminders]
    );
    assert!(fresh.authorize(Section::Payroll).is_ok());
    assert!(matches!(
        fresh.authorize(Section::Employees),
        Err(AccessError::Forbidden {
            role: Role::Payroll,
            section: Section::Employees
        })
    ));
    assert!(matches!(
        fresh.require_admin(),
        Err(AccessError::AdminRequired { role: Role::Payroll })
    ));
}

#[test]
fn sign_out_clears_profile_menu_and_settings() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let mut session = SessionContext::new();
    session
        .handle(SessionEvent::SignedIn(identity("hr@acme.test")), &users, 0)
        .unwrap();

    let mut settings = AppSettings::default();
    settings.theme.mode = ThemeMode::Dark;
    session.update_settings(&users, settings).unwrap();
    assert_eq!(session.settings().theme.mode, ThemeMode::Dark);

    let after = session.handle(SessionEvent::SignedOut, &users, 0).unwrap();
    assert!(after.is_none());
    assert!(!session.is_signed_in());
    assert!(session.menu().is_empty());
    assert_eq!(session.settings(), AppSettings::default());
    assert!(matches!(
        session.authorize(Section::Dashboard),
        Err(AccessError::Unauthenticated)
    ));
}

#[test]
fn settings_persist_across_sessions() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let who = identity("hr@acme.test");

    let mut session = SessionContext::new();
    session
        .handle(SessionEvent::SignedIn(who.clone()), &users, 0)
        .unwrap();
    let mut settings = session.settings();
    settings.language.preferred = Language::Fr;
    settings.theme.animations = false;
    session.update_settings(&users, settings.clone()).unwrap();

    let mut later = SessionContext::new();
    later.handle(SessionEvent::SignedIn(who), &users, 0).unwrap();
    assert_eq!(later.settings(), settings);
}

#[test]
fn updating_settings_while_signed_out_fails() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let mut session = SessionContext::new();

    let err = session
        .update_settings(&users, AppSettings::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Access(AccessError::Unauthenticated)
    ));
}
