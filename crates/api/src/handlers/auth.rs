//! Handlers for the `/auth` resource (register, login, me, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::account::{is_demo_login, DEMO_EMAIL};
use studio_core::error::CoreError;
use studio_db::models::user::{CreateUser, User, UserResponse};
use studio_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_length, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::present;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Normalized registration fields, checked after trimming.
#[derive(Debug, Validate)]
struct NewAccount {
    #[validate(length(max = 255, message = "Name too long"))]
    name: String,
    #[validate(email(message = "Invalid email address"))]
    email: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and return it with a fresh token.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthPayload>>)> {
    let name = present(input.name);
    let email = present(input.email).map(|e| e.to_lowercase());
    let password = input.password.filter(|p| !p.is_empty());
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(AppError::BadRequest(
            "Name, email and password are required".into(),
        ));
    };

    validate_password_length(&password).map_err(AppError::BadRequest)?;
    let account = NewAccount { name, email };
    account.validate()?;
    let NewAccount { name, email } = account;

    // The demo address stays reserved for the demo login, enabled or not.
    if email == DEMO_EMAIL || UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await
    .map_err(|e| match &e {
        // Lost a race with a concurrent registration for the same email.
        sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email") => {
            AppError::Core(CoreError::Conflict(
                "User with this email already exists".into(),
            ))
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = %user.id, "User registered");

    let payload = auth_payload(&state, user)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(payload).with_message("User registered successfully")),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. When the demo login is enabled the
/// demo credentials bypass the hash check.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    let email = present(input.email).map(|e| e.to_lowercase());
    let password = input.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    };

    if state.config.demo_login_enabled && is_demo_login(&email, &password) {
        let user = UserRepo::upsert_demo(&state.pool).await?;
        tracing::info!(user_id = %user.id, "Demo login");
        let payload = auth_payload(&state, user)?;
        return Ok(Json(
            ApiResponse::data(payload).with_message("Login successful"),
        ));
    }

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = %user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = %user.id, "User logged in");
    let payload = auth_payload(&state, user)?;
    Ok(Json(
        ApiResponse::data(payload).with_message("Login successful"),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserPayload>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    Ok(Json(ApiResponse::data(UserPayload { user: user.into() })))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(auth: AuthUser) -> Json<ApiResponse<()>> {
    tracing::info!(user_id = %auth.user_id, "User logged out");
    Json(ApiResponse::message("Logout successful"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_payload(state: &AppState, user: User) -> AppResult<AuthPayload> {
    let token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthPayload {
        user: user.into(),
        token,
    })
}
