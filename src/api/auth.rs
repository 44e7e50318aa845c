//! Account creation and token issuance.

use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AppState;
use crate::auth::{hash_password, verify_password};
use crate::db::models::{Role, UserResponse};
use crate::db::repository::UserRepository;
use crate::error::{AppError, AppResult};

/// Body for `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// OAuth2 password-grant form for `POST /token`.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    /// The account's email.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /signup - create an account.
///
/// Admin accounts cannot be self-registered; use `fms create-admin`.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(req) = payload?;

    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("email and password required".to_string()));
    }
    // The email prefixes stored upload names.
    if email.contains(['/', '\\']) || email.chars().any(char::is_control) {
        return Err(AppError::BadRequest("invalid email".to_string()));
    }

    let role = match req.role.as_deref() {
        Some(role) => role.parse::<Role>().map_err(AppError::BadRequest)?,
        None => Role::Accountant,
    };
    if role == Role::Admin {
        warn!(name: "auth.signup.admin_refused", email = %email, "Self-signup as admin refused");
        return Err(AppError::Forbidden(
            "admin accounts cannot be self-registered".to_string(),
        ));
    }

    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("User");
    let password_hash = hash_password(password)?;
    let user = UserRepository::create(state.db.pool(), name, email, &password_hash, role)
        .await?
        .ok_or_else(|| AppError::BadRequest("user already exists".to_string()))?;

    info!(name: "auth.signup", email = %user.email, role = %role, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /token - exchange email and password for a bearer token.
pub async fn token(
    State(state): State<AppState>,
    form: Result<Form<TokenForm>, FormRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Form(form) = form?;
    let user = UserRepository::get_by_email(state.db.pool(), form.username.trim()).await?;

    let Some(user) = user.filter(|u| verify_password(&u.password_hash, &form.password)) else {
        warn!(name: "auth.login.failed", email = %form.username, "Login failed");
        return Err(AppError::Unauthorized(
            "Incorrect username or password".to_string(),
        ));
    };

    let access_token = state.tokens.issue(&user.email, user.role())?;

    info!(name: "auth.login", email = %user.email, "Token issued");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
