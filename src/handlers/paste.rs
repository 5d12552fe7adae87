use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use tracing::info;

use super::parse_expiry;
use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use crate::ids::generate_id;
use crate::models::Paste;
use crate::types::api::{CreatePaste, PasteCreated, PasteFull, PasteMeta, UnlockPaste};

pub async fn create(
    State(config): State<Config>,
    State(mut db): State<Database>,
    Json(req): Json<CreatePaste>,
) -> crate::ApiResult<impl IntoResponse> {
    let content = req
        .content
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_owned();

    if content.is_empty() && req.attachments.is_empty() {
        return Err(ApiError::EmptyPaste);
    }

    // attachment references must point at real uploads
    for attachment in &req.attachments {
        db.get_file(&attachment.file_id)
            .await
            .map_err(|_| ApiError::UnknownAttachment)?;
    }

    let now = Utc::now();
    let paste = Paste {
        id: generate_id(),
        content,
        language: req
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "plaintext".into()),
        password: req
            .password
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty()),
        expires_at: parse_expiry(req.expires_in.as_deref(), now),
        created_at: now,
    };

    db.insert_paste(&paste).await?;
    for attachment in &req.attachments {
        db.insert_attachment(&paste.id, attachment).await?;
    }

    info!(
        "new paste: id='{id}', language='{language}', protected={protected}, \
         attachments={attachments}, size={size}",
        id = paste.id,
        language = paste.language,
        protected = paste.has_password(),
        attachments = req.attachments.len(),
        size = paste.content.len()
    );

    let url = format!("{base_url}/c/{id}", base_url = config.base_url, id = paste.id);

    Ok((StatusCode::CREATED, Json(PasteCreated { id: paste.id, url })))
}

/// Public metadata; content is included only for unprotected pastes.
pub async fn get_meta(
    State(mut db): State<Database>,
    Path(id): Path<String>,
) -> crate::ApiResult<Json<PasteMeta>> {
    let paste = db.get_paste(&id).await?;
    if paste.is_expired(Utc::now()) {
        return Err(ApiError::NotFound);
    }

    Ok(Json(PasteMeta::from_paste(&paste)))
}

/// Full paste, with the password check when one is set. The body is
/// optional so unprotected pastes unlock without one.
pub async fn unlock(
    State(mut db): State<Database>,
    Path(id): Path<String>,
    body: Option<Json<UnlockPaste>>,
) -> crate::ApiResult<Json<PasteFull>> {
    let paste = db.get_paste(&id).await?;
    if paste.is_expired(Utc::now()) {
        return Err(ApiError::NotFound);
    }

    if let Some(password) = &paste.password {
        let provided = body
            .and_then(|Json(unlock)| unlock.password)
            .ok_or(ApiError::PasswordRequired)?;
        if &provided != password {
            return Err(ApiError::WrongPassword);
        }
    }

    let attachments = db.get_attachments(&paste.id).await?;

    Ok(Json(PasteFull {
        has_password: paste.has_password(),
        id: paste.id,
        content: paste.content,
        language: paste.language,
        created_at: paste.created_at,
        attachments,
    }))
}
