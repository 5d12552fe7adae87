use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, warn};

use crate::auth::AdminSession;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::StoredFile;
use crate::storage::{AnyStorage, Storage};
use crate::types::api::{AdminPasteEntry, ToggleFile};

/// Every paste, newest first, expired and protected ones included.
pub async fn list_pastes(
    _admin: AdminSession,
    State(mut db): State<Database>,
) -> crate::ApiResult<Json<Vec<AdminPasteEntry>>> {
    let pastes = db.get_all_pastes().await?;

    let mut entries = Vec::with_capacity(pastes.len());
    for paste in pastes {
        let attachment_count = db.count_attachments(&paste.id).await?;
        entries.push(AdminPasteEntry::from_paste(paste, attachment_count));
    }

    Ok(Json(entries))
}

pub async fn delete_paste(
    _admin: AdminSession,
    State(mut db): State<Database>,
    Path(id): Path<String>,
) -> crate::ApiResult<impl IntoResponse> {
    // confirm it exists so the admin gets a 404 for stale ids
    db.get_paste(&id).await?;
    db.delete_paste(&id).await?;

    info!("deleted paste: {id}");

    Ok(())
}

/// Every file record, disabled and expired ones included.
pub async fn list_files(
    _admin: AdminSession,
    State(mut db): State<Database>,
) -> crate::ApiResult<Json<Vec<StoredFile>>> {
    Ok(Json(db.get_all_files().await?))
}

pub async fn toggle_file(
    _admin: AdminSession,
    State(mut db): State<Database>,
    Path(id): Path<String>,
    Json(req): Json<ToggleFile>,
) -> crate::ApiResult<impl IntoResponse> {
    db.set_file_enabled(&id, req.enabled).await?;

    info!("file {id} {}", if req.enabled { "enabled" } else { "disabled" });

    Ok(())
}

pub async fn delete_file(
    _admin: AdminSession,
    State(mut db): State<Database>,
    State(mut storage): State<AnyStorage>,
    Path(id): Path<String>,
) -> crate::ApiResult<impl IntoResponse> {
    let file = db.get_file(&id).await?;

    // a missing object is not fatal; the record still goes away
    match storage.delete_object(&file.stored_name).await {
        Ok(()) => {}
        Err(ApiError::NotFound) => warn!("stored object already gone for file {id}"),
        Err(err) => return Err(err),
    }

    db.delete_file(&id).await?;

    info!("deleted file: {id}");

    Ok(())
}
