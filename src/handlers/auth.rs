use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::auth::{
    clear_session_cookie, hash_password, new_session, session_cookie, session_id_from_headers,
};
use crate::db::Database;
use crate::error::ApiError;
use crate::types::api::Login;

pub async fn login(
    State(mut db): State<Database>,
    Json(req): Json<Login>,
) -> crate::ApiResult<impl IntoResponse> {
    let password = req.password.ok_or(ApiError::MissingPassword)?;

    let settings = db.get_settings().await?;
    if hash_password(&password) != settings.admin_password_hash {
        return Err(ApiError::Unauthorized);
    }

    let session = new_session();
    db.insert_session(&session).await?;

    info!("admin logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&session.id))],
        Json(json!({ "success": true })),
    ))
}

/// Idempotent: clearing an unknown or absent session still succeeds.
pub async fn logout(
    State(mut db): State<Database>,
    headers: HeaderMap,
) -> crate::ApiResult<impl IntoResponse> {
    if let Some(session_id) = session_id_from_headers(&headers) {
        db.delete_session(&session_id).await?;
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "success": true })),
    ))
}
