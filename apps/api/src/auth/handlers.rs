use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{NewUser, PublicUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub success: bool,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Returns the trimmed value if present and non-blank.
fn required(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// POST /api/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    let Json(req) = body.map_err(|_| AppError::Validation("Invalid request body".to_string()))?;

    // Passwords are taken verbatim; only presence is checked.
    let password = req.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password), Some(first_name), Some(last_name)) = (
        required(req.email),
        password,
        required(req.first_name),
        required(req.last_name),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    if state.users.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Validation("User already exists".to_string()));
    }

    let password_hash = hash_password(password).await?;
    let user = state
        .users
        .create_user(NewUser {
            email,
            password_hash,
            first_name,
            last_name,
            phone_number: required(req.phone_number),
        })
        .await?
        .ok_or_else(|| AppError::Validation("User already exists".to_string()))?;

    let token = state.tokens.issue(user.id).map_err(anyhow::Error::from)?;
    info!("Signed up user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            success: true,
            user: user.into(),
            token,
        }),
    ))
}

/// POST /api/auth/signin
pub async fn handle_signin(
    State(state): State<AppState>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<SignInResponse>, AppError> {
    let Json(req) = body.map_err(|_| AppError::Validation("Invalid request body".to_string()))?;

    let (Some(email), Some(password)) = (required(req.email), req.password.filter(|p| !p.is_empty()))
    else {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let Some(user) = state.users.find_user_by_email(&email).await? else {
        warn!("Sign-in attempt for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        warn!("Sign-in attempt with wrong password for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id).map_err(anyhow::Error::from)?;

    Ok(Json(SignInResponse {
        user: user.into(),
        token,
    }))
}
