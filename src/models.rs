use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Extensions allowed for public uploads until the admin changes them.
pub const DEFAULT_ALLOWED_FORMATS: &str =
    "jpg,jpeg,png,gif,webp,pdf,zip,rar,7z,txt,doc,docx,xls,xlsx,mp3,mp4";

pub const DEFAULT_MAX_FILE_SIZE_MB: i64 = 50;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub language: String,
    /// Plain access password; `None` means the paste is public.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Paste {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |at| at < now)
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PasteAttachment {
    pub file_id: String,
    pub name: String,
    pub size: i64,
    pub mime_type: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub original_name: String,
    /// Storage key; never contains path separators.
    pub stored_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |at| at < now)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Settings {
    pub admin_password_hash: String,
    pub uploads_enabled: bool,
    pub max_file_size_mb: i64,
    /// Comma-separated lowercase extension allowlist.
    pub allowed_formats: String,
}

impl Settings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }

    pub fn allows_extension(&self, extension: Option<&str>) -> bool {
        let Some(extension) = extension else { return false };
        let extension = extension.to_ascii_lowercase();
        self.allowed_formats
            .split(',')
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(&extension))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn settings() -> Settings {
        Settings {
            admin_password_hash: String::new(),
            uploads_enabled: true,
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            allowed_formats: DEFAULT_ALLOWED_FORMATS.into(),
        }
    }

    #[test]
    fn extension_allowlist() {
        let settings = settings();
        assert!(settings.allows_extension(Some("png")));
        assert!(settings.allows_extension(Some("PNG")));
        assert!(!settings.allows_extension(Some("exe")));
        assert!(!settings.allows_extension(None));
    }

    #[test]
    fn allowlist_tolerates_spaces() {
        let mut settings = settings();
        settings.allowed_formats = "jpg, png , pdf".into();
        assert!(settings.allows_extension(Some("png")));
        assert!(!settings.allows_extension(Some("zip")));
    }

    #[test]
    fn paste_expiry_is_strict() {
        let now = Utc::now();
        let paste = Paste {
            id: "x".into(),
            content: String::new(),
            language: "plaintext".into(),
            password: None,
            expires_at: Some(now - Duration::seconds(1)),
            created_at: now,
        };
        assert!(paste.is_expired(now));
        assert!(!paste.is_expired(now - Duration::seconds(2)));
    }
}
