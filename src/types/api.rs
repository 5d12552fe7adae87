use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Paste, PasteAttachment, Settings};

// ---- pastes ----

#[derive(Debug, Deserialize)]
pub struct CreatePaste {
    pub content: Option<String>,
    pub language: Option<String>,
    pub password: Option<String>,
    /// One of `10m`, `1h`, `1d`, `7d`, `30d`, `never`.
    pub expires_in: Option<String>,
    #[serde(default)]
    pub attachments: Vec<PasteAttachment>,
}

#[derive(Serialize)]
pub struct PasteCreated {
    pub id: String,
    /// Shareable link, `{base_url}/c/{id}`.
    pub url: String,
}

/// Public metadata; `content` is withheld for protected pastes.
#[derive(Serialize)]
pub struct PasteMeta {
    pub id: String,
    pub language: String,
    pub has_password: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PasteMeta {
    pub fn from_paste(paste: &Paste) -> Self {
        PasteMeta {
            id: paste.id.clone(),
            language: paste.language.clone(),
            has_password: paste.has_password(),
            created_at: paste.created_at,
            content: (!paste.has_password()).then(|| paste.content.clone()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UnlockPaste {
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct PasteFull {
    pub id: String,
    pub content: String,
    pub language: String,
    pub has_password: bool,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<PasteAttachment>,
}

// ---- files ----

#[derive(Serialize)]
pub struct FileUploaded {
    pub id: String,
    /// Shareable link, `{base_url}/f/{id}`.
    pub url: String,
    pub name: String,
    pub size: i64,
    pub mime_type: String,
}

#[derive(Serialize)]
pub struct FileMeta {
    pub id: String,
    pub name: String,
    pub original_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleFile {
    pub enabled: bool,
}

// ---- auth ----

#[derive(Debug, Deserialize)]
pub struct Login {
    pub password: Option<String>,
}

// ---- settings ----

/// The policy fields; the credential hash never leaves the server.
#[derive(Serialize)]
pub struct PublicSettings {
    pub uploads_enabled: bool,
    pub max_file_size_mb: i64,
    pub allowed_formats: String,
}

impl From<Settings> for PublicSettings {
    fn from(settings: Settings) -> Self {
        PublicSettings {
            uploads_enabled: settings.uploads_enabled,
            max_file_size_mb: settings.max_file_size_mb,
            allowed_formats: settings.allowed_formats,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettings {
    pub uploads_enabled: Option<bool>,
    pub max_file_size_mb: Option<i64>,
    pub allowed_formats: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePassword {
    pub new_password: String,
}

// ---- admin ----

#[derive(Serialize)]
pub struct AdminPasteEntry {
    pub id: String,
    pub content: String,
    pub language: String,
    pub has_password: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub attachment_count: i64,
}

impl AdminPasteEntry {
    pub fn from_paste(paste: Paste, attachment_count: i64) -> Self {
        AdminPasteEntry {
            has_password: paste.has_password(),
            id: paste.id,
            content: paste.content,
            language: paste.language,
            expires_at: paste.expires_at,
            created_at: paste.created_at,
            attachment_count,
        }
    }
}
