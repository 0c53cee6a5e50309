use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::value_objects::Email;

/// User record as persisted.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
}

/// Errors a repository operation can surface.
///
/// An explicit sum type so the API layer maps storage failures to HTTP
/// statuses with an exhaustive match instead of inspecting message strings.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("already exists: {0}")]
    Duplicate(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Repository contract for the User aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Duplicate email surfaces as [`RepositoryError::Duplicate`].
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Overwrite the stored record for `user.id`.
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    /// Delete a user. Returns `false` when no row existed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Stamp the user's last successful login. Best effort for callers.
    async fn touch_last_login(&self, user_id: Uuid) -> Result<(), RepositoryError>;
}
