use axum::{extract::State, http::StatusCode, http::Uri, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::repositories::user_repository::{User, UserRepository};
use crate::domain::user::value_objects::Email;
use crate::infrastructure::repositories::PostgresUserRepository;

const MIN_PASSWORD_LEN: usize = 8;

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Request body for profile update; absent fields are left unchanged
#[derive(Debug, Deserialize, Default)]
pub struct UpdateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Public representation of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
        }
    }
}

/// Response from account deletion
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Register a new user
///
/// POST /register
pub async fn register(
    State(pool): State<PgPool>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;
    validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {}", e)))?;

    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        name: req.name,
        is_active: true,
    };

    let repo = PostgresUserRepository::new(pool);
    repo.create(user.clone()).await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Authenticate with email and password, returning a session token
///
/// POST /login
pub async fn login(
    State(pool): State<PgPool>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;

    let repo = PostgresUserRepository::new(pool);
    let user = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(ApiError::unauthorized("Account is disabled"));
    }

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        ApiError::internal_server_error(format!("Password verification failed: {}", e))
    })?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if let Err(e) = repo.touch_last_login(user.id).await {
        tracing::warn!(user_id = %user.id, "failed to record last login: {}", e);
    }

    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-key".to_string());
    let token = create_token(user.id, &secret)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        id: user.id,
        email: user.email.to_string(),
        name: user.name,
    }))
}

/// View the calling user's profile
///
/// GET /view
pub async fn view(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = PostgresUserRepository::new(pool);
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", user_id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Update the calling user's profile
///
/// POST /edit
pub async fn edit(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = PostgresUserRepository::new(pool);
    let mut user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", user_id)))?;

    if let Some(email) = req.email {
        user.email = Email::new(&email).map_err(ApiError::bad_request)?;
    }
    if let Some(password) = req.password {
        validate_password(&password)?;
        user.password_hash = hash_password(&password).map_err(|e| {
            ApiError::internal_server_error(format!("Failed to hash password: {}", e))
        })?;
    }
    if let Some(name) = req.name {
        user.name = name;
    }

    repo.update(&user).await?;

    tracing::info!(user_id = %user.id, "user updated");
    Ok(Json(UserResponse::from(&user)))
}

/// Delete the calling user's account
///
/// DELETE /delete
pub async fn delete(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let repo = PostgresUserRepository::new(pool);
    let deleted = repo.delete(user_id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("User not found: {}", user_id)));
    }

    tracing::info!(user_id = %user_id, "user deleted");
    Ok(Json(DeleteResponse {
        message: "User deleted".to_string(),
    }))
}

/// Liveness probe, independent of database connectivity
///
/// GET /app
pub async fn liveness() -> &'static str {
    "API is running"
}

/// Fallback for unmatched routes; feeds the error normalizer a 404
/// naming the requested path.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Not Found - {}", uri.path()))
}
