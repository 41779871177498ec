// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::{Map, Value, json};

use crate::{
    error::AppError,
    models::profile_update::ProfileUpdate,
    services::profile::ProfileService,
    utils::jwt::Claims,
};

/// Get the current user's full profile (password excluded).
pub async fn get_profile(
    State(profiles): State<ProfileService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = profiles.get_profile(claims.user_id()?).await?;
    Ok(Json(user))
}

/// Partially update the current user's profile.
///
/// Scalar fields and `<topic>Time` keys overwrite; each `<topic>Marks` key
/// appends one mark. Unknown keys are ignored.
pub async fn update_profile(
    State(profiles): State<ProfileService>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let update = ProfileUpdate::try_from(payload)?;

    let user = profiles.update_profile(user_id, &update).await?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": user,
    })))
}
