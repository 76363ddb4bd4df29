//! User manager and authenticator tests against a real SQLite store.

use std::sync::Arc;

use usermgmt::cli::args::CreateSuperuserArgs;
use usermgmt::commands::create_superuser;
use usermgmt::config::Config;
use usermgmt::domain::{NewUser, Password, UserType};
use usermgmt::errors::AppError;
use usermgmt::infra::{Database, UserRepository, UserStore};
use usermgmt::services::{
    AuthService, Authenticator, CompleteUser, UserManager, UserService,
};

const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

async fn store() -> Arc<dyn UserRepository> {
    let db = Database::open_migrated("sqlite::memory:")
        .await
        .expect("in-memory database");
    Arc::new(UserStore::new(db.get_connection()))
}

fn complete(username: &str, email: &str, phone: &str) -> CompleteUser {
    CompleteUser {
        username: username.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        user_type: UserType::Candidate,
        location: "Pune".to_string(),
        team_name: None,
        skill: Some("Go".to_string()),
        password: Some("s3cret-pass".to_string()),
    }
}

#[tokio::test]
async fn test_create_complete_user_persists_profile() {
    let repo = store().await;
    let manager = UserManager::new(repo.clone());

    let user = manager
        .create_complete_user(complete("meera", "meera@Example.COM", "9000000001"))
        .await
        .unwrap();

    assert_eq!(user.email, "meera@example.com");
    assert!(user.is_active);
    assert!(!user.is_admin);
    assert!(!user.is_staff);
    assert_ne!(user.password_hash, "s3cret-pass");
    assert!(Password::from_hash(user.password_hash.clone()).verify("s3cret-pass"));

    let found = repo.find_by_email("meera@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_unique_fields_are_enforced() {
    let manager = UserManager::new(store().await);
    manager
        .create_complete_user(complete("meera", "meera@example.com", "9000000001"))
        .await
        .unwrap();

    let err = manager
        .create_complete_user(complete("other", "meera@example.com", "9000000002"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { field: Some(ref f) } if f == "email"));

    let err = manager
        .create_complete_user(complete("other", "other@example.com", "9000000001"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { field: Some(ref f) } if f == "phone"));
}

fn new_user(username: &str, email: &str, phone: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        location: "Pune".to_string(),
        password_hash: Password::unusable().into_string(),
        ..NewUser::default()
    }
}

#[tokio::test]
async fn test_store_maps_unique_violations_to_conflicts() {
    let repo = store().await;
    repo.create(new_user("meera", "meera@example.com", "9000000001"))
        .await
        .unwrap();

    let cases = [
        (new_user("other", "meera@example.com", "9000000002"), "email"),
        (new_user("meera", "other@example.com", "9000000003"), "username"),
        (new_user("third", "third@example.com", "9000000001"), "phone"),
    ];

    for (duplicate, expected) in cases {
        let err = repo.create(duplicate).await.unwrap_err();
        match err {
            AppError::Conflict { field: Some(field) } => assert_eq!(field, expected),
            other => panic!("expected conflict on {}, got {:?}", expected, other),
        }
    }
}

#[tokio::test]
async fn test_both_factories_reject_empty_email() {
    let manager = UserManager::new(store().await);

    let err = manager
        .create_user("nomail".to_string(), String::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = manager
        .create_complete_user(complete("nomail", "", "9000000001"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_user_without_password_cannot_log_in() {
    let repo = store().await;
    let manager = UserManager::new(repo.clone());
    let auth = Authenticator::new(repo, Config::new("sqlite::memory:", TEST_SECRET));

    let user = manager
        .create_user("nopass".to_string(), "nopass@example.com".to_string(), None)
        .await
        .unwrap();

    assert!(!Password::from_hash(user.password_hash).is_usable());
    assert!(auth
        .authenticate("nopass@example.com", "")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_superuser_sets_flags() {
    let repo = store().await;
    let manager = UserManager::new(repo.clone());

    let user = manager
        .create_superuser(
            "root".to_string(),
            "root@example.com".to_string(),
            "changeme123".to_string(),
        )
        .await
        .unwrap();

    assert!(user.is_admin);
    assert!(user.is_staff);

    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(reloaded.is_admin);
    assert!(reloaded.is_staff);
}

#[tokio::test]
async fn test_createsuperuser_command_validates_username() {
    let manager = UserManager::new(store().await);

    let err = create_superuser::create(
        &manager,
        CreateSuperuserArgs {
            username: "bad name".to_string(),
            email: "root@example.com".to_string(),
            password: "changeme123".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let user = create_superuser::create(
        &manager,
        CreateSuperuserArgs {
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            password: "changeme123".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(user.is_admin);
}

#[tokio::test]
async fn test_login_round_trip_through_store() {
    let repo = store().await;
    let manager = UserManager::new(repo.clone());
    let auth = Authenticator::new(repo.clone(), Config::new("sqlite::memory:", TEST_SECRET));

    let created = manager
        .create_complete_user(complete("meera", "meera@example.com", "9000000001"))
        .await
        .unwrap();

    let user = auth
        .authenticate("meera@EXAMPLE.com", "s3cret-pass")
        .await
        .unwrap()
        .expect("credentials should match");
    assert_eq!(user.id, created.id);

    let token = auth.login(user).await.unwrap();
    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, created.id);

    let reloaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(reloaded.last_login.is_some());

    assert!(auth
        .authenticate("meera@example.com", "wrong")
        .await
        .unwrap()
        .is_none());
}
