use axum::body::{self, Bytes};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::info;

use super::parse_expiry;
use crate::auth::AdminSession;
use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use crate::ids::{file_extension, generate_id, generate_stored_name};
use crate::models::StoredFile;
use crate::storage::{AnyStorage, Storage};
use crate::types::api::{FileMeta, FileUploaded};

struct UploadFields {
    data: Bytes,
    original_name: String,
    content_type: String,
    display_name: Option<String>,
    expires_in: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> crate::ApiResult<UploadFields> {
    let mut file: Option<(Bytes, String, String)> = None;
    let mut display_name = None;
    let mut expires_in = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let original_name = field
                    .file_name()
                    .ok_or(ApiError::MissingFileName)?
                    .to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let data = field.bytes().await?;
                file = Some((data, original_name, content_type));
            }
            Some("name") => display_name = Some(field.text().await?),
            Some("expires_in") => expires_in = Some(field.text().await?),
            _ => continue,
        }
    }

    let (data, original_name, content_type) = file.ok_or(ApiError::MissingFile)?;
    Ok(UploadFields {
        data,
        original_name,
        content_type,
        display_name: display_name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()),
        expires_in,
    })
}

/// Public upload, gated by the global policy. A logged-in admin bypasses
/// the enabled toggle and the extension allowlist, but not the size cap.
pub async fn upload(
    State(config): State<Config>,
    State(mut db): State<Database>,
    State(mut storage): State<AnyStorage>,
    admin: Option<AdminSession>,
    multipart: Multipart,
) -> crate::ApiResult<impl IntoResponse> {
    let upload = read_upload(multipart).await?;
    let settings = db.get_settings().await?;
    let is_admin = admin.is_some();

    if !settings.uploads_enabled && !is_admin {
        return Err(ApiError::UploadsDisabled);
    }
    if upload.data.len() > settings.max_file_size_bytes() {
        return Err(ApiError::FileTooLarge);
    }
    if !is_admin && !settings.allows_extension(file_extension(&upload.original_name).as_deref())
    {
        return Err(ApiError::FormatNotAllowed);
    }

    let now = Utc::now();
    let file = StoredFile {
        id: generate_id(),
        name: upload
            .display_name
            .unwrap_or_else(|| upload.original_name.clone()),
        stored_name: generate_stored_name(&upload.original_name),
        original_name: upload.original_name,
        file_size: upload.data.len() as i64,
        mime_type: upload.content_type,
        expires_at: parse_expiry(upload.expires_in.as_deref(), now),
        enabled: true,
        created_at: now,
    };

    info!(
        "uploading: id='{id}', file='{name}', content_type='{content_type}', size={size}",
        id = file.id,
        name = file.original_name,
        content_type = file.mime_type,
        size = file.file_size
    );

    storage.put_object(&file.stored_name, upload.data).await?;
    db.insert_file(&file).await?;

    let url = format!("{base_url}/f/{id}", base_url = config.base_url, id = file.id);

    Ok((
        StatusCode::CREATED,
        Json(FileUploaded {
            id: file.id,
            url,
            name: file.name,
            size: file.file_size,
            mime_type: file.mime_type,
        }),
    ))
}

/// Serve the raw bytes of an enabled, unexpired file.
pub async fn serve(
    State(mut db): State<Database>,
    State(mut storage): State<AnyStorage>,
    Path(id): Path<String>,
) -> crate::ApiResult<Response<body::Full<Bytes>>> {
    let file = public_file(&mut db, &id).await?;
    let data = storage.get_object(&file.stored_name).await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, file.mime_type.as_str())
        .header(header::CONTENT_LENGTH, data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "inline; filename=\"{}\"",
                sanitize_disposition_name(&file.original_name)
            ),
        )
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(body::Full::new(data))?;

    Ok(response)
}

pub async fn get_meta(
    State(mut db): State<Database>,
    Path(id): Path<String>,
) -> crate::ApiResult<Json<FileMeta>> {
    let file = public_file(&mut db, &id).await?;

    Ok(Json(FileMeta {
        id: file.id,
        name: file.name,
        original_name: file.original_name,
        file_size: file.file_size,
        mime_type: file.mime_type,
        created_at: file.created_at,
    }))
}

/// Fetch a file as the public sees it: disabled and expired read as absent.
async fn public_file(db: &mut Database, id: &str) -> crate::ApiResult<StoredFile> {
    let file = db.get_file(id).await?;
    if !file.enabled || file.is_expired(Utc::now()) {
        return Err(ApiError::NotFound);
    }
    Ok(file)
}

/// Keep the disposition filename a plain quoted-string token.
fn sanitize_disposition_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .filter(|c| *c != '"' && *c != '\\')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_name_strips_quotes_and_controls() {
        assert_eq!(sanitize_disposition_name("report 2024.pdf"), "report 2024.pdf");
        assert_eq!(sanitize_disposition_name("a\"b\\c.txt"), "abc.txt");
        assert_eq!(sanitize_disposition_name("line\nbreak"), "linebreak");
    }
}
