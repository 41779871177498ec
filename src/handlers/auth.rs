// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, LoginUser, NewUser, RegisterRequest},
    repository::UserStore,
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it; every profile field
/// starts at its registration default.
/// Returns 201 Created with a confirmation message.
pub async fn register(
    State(users): State<UserStore>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = users
        .insert(NewUser::new(payload.name, payload.email, hashed_password))
        .await?;

    tracing::info!(user_id = user.id, "Registered new user");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown email and wrong password get the same answer.
pub async fn login(
    State(users): State<UserStore>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::BadRequest("Invalid credentials".to_string()))?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.email,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "user": LoginUser::from(&user),
    })))
}
