//! Integration tests for the PostgreSQL user repository
//!
//! All tests here hit a real database and are `#[ignore]`d so the default
//! suite passes without one. Run with `DATABASE_URL` set and a provisioned
//! `users` table:
//!
//! ```text
//! cargo test -- --ignored
//! ```

use accounts_api::auth::password::hash_password;
use accounts_api::domain::repositories::user_repository::{
    RepositoryError, User, UserRepository,
};
use accounts_api::domain::user::value_objects::Email;
use accounts_api::infrastructure::repositories::PostgresUserRepository;
use sqlx::PgPool;
use uuid::Uuid;

async fn setup_test_db() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

fn test_user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: Email::new(email).expect("valid email"),
        password_hash: hash_password("testpass-123").expect("hash password"),
        name: "Repo Test User".to_string(),
        is_active: true,
    }
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@test.com", prefix, Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL with DATABASE_URL set"]
async fn create_and_find_by_email() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = test_user(&unique_email("create"));
    let created_id = repo.create(user.clone()).await.expect("create user");
    assert_eq!(created_id, user.id);

    let found = repo
        .find_by_email(&user.email)
        .await
        .expect("find by email")
        .expect("user exists");
    assert_eq!(found.id, user.id);
    assert_eq!(found.name, user.name);
    assert!(found.is_active);

    repo.delete(user.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL with DATABASE_URL set"]
async fn duplicate_email_surfaces_as_duplicate() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let email = unique_email("dup");
    let first = test_user(&email);
    repo.create(first.clone()).await.expect("create first");

    let second = test_user(&email);
    let result = repo.create(second).await;
    assert!(matches!(result, Err(RepositoryError::Duplicate(_))));

    repo.delete(first.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL with DATABASE_URL set"]
async fn update_overwrites_the_record() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let mut user = test_user(&unique_email("update"));
    repo.create(user.clone()).await.expect("create user");

    user.name = "Updated Name".to_string();
    repo.update(&user).await.expect("update user");

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("find by id")
        .expect("user exists");
    assert_eq!(found.name, "Updated Name");

    repo.delete(user.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL with DATABASE_URL set"]
async fn update_of_missing_user_is_not_found() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let ghost = test_user(&unique_email("ghost"));
    let result = repo.update(&ghost).await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL with DATABASE_URL set"]
async fn delete_reports_whether_a_row_existed() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = test_user(&unique_email("delete"));
    repo.create(user.clone()).await.expect("create user");

    assert!(repo.delete(user.id).await.expect("first delete"));
    assert!(!repo.delete(user.id).await.expect("second delete"));

    let found = repo.find_by_id(user.id).await.expect("find by id");
    assert!(found.is_none());
}
