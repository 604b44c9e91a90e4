//! Sign-up, sign-in and legacy password migration

use gearloan::{
    models::{Registration, Role},
    repository::Collection,
    services::identity::hash_password,
    AppError,
};

use crate::common::{harness, PASSWORD, STUDENT_EMAIL};

fn registration(email: &str, password: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: password.to_string(),
        role: Role::Student,
        admin_code: None,
    }
}

#[tokio::test]
async fn test_register_rules() {
    let h = harness().await;

    assert!(matches!(
        h.app.sign_up(registration("A@X.COM", "another99")).await,
        Err(AppError::EmailInUse(_))
    ));
    assert!(matches!(
        h.app.sign_up(registration("not-an-email", "another99")).await,
        Err(AppError::InvalidEmailFormat(_))
    ));
    assert!(matches!(
        h.app.sign_up(registration("b@x.com", "short1")).await,
        Err(AppError::WeakPassword)
    ));
    assert!(matches!(
        h.app.sign_up(registration("b@x.com", "onlyletters")).await,
        Err(AppError::WeakPassword)
    ));

    let mut admin = registration("boss@x.com", "another99");
    admin.role = Role::Admin;
    admin.admin_code = Some("wrong".to_string());
    assert!(matches!(
        h.app.sign_up(admin).await,
        Err(AppError::InvalidAdminCode)
    ));

    let user = h
        .app
        .sign_up(registration("  New.User@X.com ", "another99"))
        .await
        .unwrap();
    assert_eq!(user.email, "new.user@x.com");
    assert_eq!(user.password_hash, hash_password("another99"));
}

#[tokio::test]
async fn test_authenticate_single_error() {
    let h = harness().await;

    let session = h.app.log_in("  A@X.com", PASSWORD).await.unwrap();
    assert_eq!(session.email(), STUDENT_EMAIL);
    assert!(!session.is_admin());
    assert_eq!(h.app.current_user(&session).email, STUDENT_EMAIL);
    h.app.log_out(session);
    assert!(h.notifier.titles().contains(&"Logged Out".to_string()));

    let wrong_password = h.app.log_in(STUDENT_EMAIL, "letmein43").await.unwrap_err();
    let unknown_user = h.app.log_in("ghost@x.com", PASSWORD).await.unwrap_err();
    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_user, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_plaintext_never_persisted() {
    let h = harness().await;
    let raw = h.repository.raw(Collection::Users).await.unwrap().unwrap();
    assert!(!raw.contains(PASSWORD));
    assert!(!raw.contains("\"password\""));
}

#[tokio::test]
async fn test_legacy_migration_is_idempotent() {
    let h = harness().await;
    h.repository
        .write_raw(
            Collection::Users,
            r#"[{"email":"old@x.com","password":"plain123"},
                {"email":"both@x.com","passwordHash":"abc","password":"leftover1","role":"admin","createdAt":5}]"#,
        )
        .await
        .unwrap();

    let identity = &h.app.services().identity;
    assert_eq!(identity.migrate_legacy_users().await.unwrap(), 2);

    let users = h.repository.users_list().await;
    assert_eq!(users[0].password_hash, hash_password("plain123"));
    assert!(users[0].legacy_password.is_none());
    assert_eq!(users[1].password_hash, "abc");
    assert_eq!(users[1].role, Role::Admin);

    let raw = h.repository.raw(Collection::Users).await.unwrap().unwrap();
    assert!(!raw.contains("plain123"));
    assert!(!raw.contains("leftover1"));

    assert_eq!(identity.migrate_legacy_users().await.unwrap(), 0);
    assert_eq!(h.repository.users_list().await, users);

    h.app.log_in("old@x.com", "plain123").await.unwrap();
}
