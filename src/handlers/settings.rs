use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::auth::{hash_password, AdminSession};
use crate::db::Database;
use crate::error::ApiError;
use crate::types::api::{ChangePassword, PublicSettings, UpdateSettings};

/// Upload policy as shown to anyone; never includes the credential hash.
pub async fn get_public(
    State(mut db): State<Database>,
) -> crate::ApiResult<Json<PublicSettings>> {
    Ok(Json(db.get_settings().await?.into()))
}

pub async fn get_admin(
    _admin: AdminSession,
    State(mut db): State<Database>,
) -> crate::ApiResult<Json<PublicSettings>> {
    Ok(Json(db.get_settings().await?.into()))
}

pub async fn update(
    _admin: AdminSession,
    State(mut db): State<Database>,
    Json(req): Json<UpdateSettings>,
) -> crate::ApiResult<Json<PublicSettings>> {
    db.update_settings(
        req.uploads_enabled,
        req.max_file_size_mb,
        req.allowed_formats.as_deref(),
    )
    .await?;

    info!("settings updated");

    Ok(Json(db.get_settings().await?.into()))
}

/// Re-hash the admin credential. Existing sessions stay valid.
pub async fn change_password(
    _admin: AdminSession,
    State(mut db): State<Database>,
    Json(req): Json<ChangePassword>,
) -> crate::ApiResult<impl IntoResponse> {
    let new_password = req.new_password.trim();
    if new_password.is_empty() {
        return Err(ApiError::MissingPassword);
    }

    db.set_admin_password_hash(&hash_password(new_password)).await?;

    info!("admin password changed");

    Ok(Json(json!({ "success": true })))
}
