// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::user::{DeletedUser, UserId},
    repository::UserStore,
    utils::jwt::Claims,
};

/// Lists all users in the system (passwords are never serialized).
/// Admin only.
pub async fn list_users(State(users): State<UserStore>) -> Result<impl IntoResponse, AppError> {
    let list = users.list().await.map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(list))
}

/// Deletes a user by ID.
/// Admin only. Prevents deleting self.
pub async fn delete_user(
    State(users): State<UserStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    if id == claims.user_id()? {
        return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
    }

    let deleted = users
        .delete(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = id, "Deleted user");

    let summary = DeletedUser {
        id: deleted.id,
        name: deleted.name,
    };

    Ok(Json(json!({
        "message": "User deleted successfully",
        "deletedUser": summary,
    })))
}
