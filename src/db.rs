use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::auth;
use crate::models::{
    Paste, PasteAttachment, Session, Settings, StoredFile, DEFAULT_ALLOWED_FORMATS,
    DEFAULT_MAX_FILE_SIZE_MB,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS pastes (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    language TEXT NOT NULL,
    password TEXT,
    expires_at TIMESTAMP,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS paste_attachments (
    paste_id TEXT NOT NULL REFERENCES pastes(id) ON DELETE CASCADE,
    file_id TEXT NOT NULL,
    name TEXT NOT NULL,
    size INTEGER NOT NULL,
    mime_type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS files (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    original_name TEXT NOT NULL,
    stored_name TEXT NOT NULL,
    file_size INTEGER NOT NULL,
    mime_type TEXT NOT NULL,
    expires_at TIMESTAMP,
    enabled INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    admin_password_hash TEXT NOT NULL,
    uploads_enabled INTEGER NOT NULL,
    max_file_size_mb INTEGER NOT NULL,
    allowed_formats TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    expires_at TIMESTAMP NOT NULL
);
";

/// The admin password every fresh install starts with.
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to a database by URL and ensure the schema exists.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(url).await?;

        let mut conn = pool.acquire().await?;
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&mut conn).await?;
        }

        // seed the settings singleton on first run
        sqlx::query(
            "INSERT OR IGNORE INTO settings (id, admin_password_hash, uploads_enabled, \
             max_file_size_mb, allowed_formats) VALUES (1, ?, 1, ?, ?)",
        )
        .bind(auth::hash_password(DEFAULT_ADMIN_PASSWORD))
        .bind(DEFAULT_MAX_FILE_SIZE_MB)
        .bind(DEFAULT_ALLOWED_FORMATS)
        .execute(&mut conn)
        .await?;

        Ok(Self { pool })
    }

    // ---- pastes ----

    /// Get all pastes, newest first.
    pub async fn get_all_pastes(&mut self) -> crate::ApiResult<Vec<Paste>> {
        let mut conn = self.pool.acquire().await?;
        Ok(
            sqlx::query_as::<_, Paste>("SELECT * FROM pastes ORDER BY created_at DESC")
                .fetch_all(&mut conn)
                .await?,
        )
    }

    /// Get a paste by id.
    pub async fn get_paste(&mut self, id: &str) -> crate::ApiResult<Paste> {
        let mut conn = self.pool.acquire().await?;
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT id, content, language, password, expires_at, created_at FROM pastes \
             WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut conn)
        .await?;
        Ok(paste)
    }

    /// Insert a paste.
    pub async fn insert_paste(&mut self, paste: &Paste) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "INSERT INTO pastes (id, content, language, password, expires_at, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&paste.id)
        .bind(&paste.content)
        .bind(&paste.language)
        .bind(&paste.password)
        .bind(paste.expires_at)
        .bind(paste.created_at)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    /// Delete a paste and its attachment rows.
    pub async fn delete_paste(&mut self, id: &str) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("DELETE FROM paste_attachments WHERE paste_id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        sqlx::query("DELETE FROM pastes WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn insert_attachment(
        &mut self,
        paste_id: &str,
        attachment: &PasteAttachment,
    ) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "INSERT INTO paste_attachments (paste_id, file_id, name, size, mime_type) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(paste_id)
        .bind(&attachment.file_id)
        .bind(&attachment.name)
        .bind(attachment.size)
        .bind(&attachment.mime_type)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    pub async fn get_attachments(
        &mut self,
        paste_id: &str,
    ) -> crate::ApiResult<Vec<PasteAttachment>> {
        let mut conn = self.pool.acquire().await?;
        Ok(sqlx::query_as::<_, PasteAttachment>(
            "SELECT file_id, name, size, mime_type FROM paste_attachments WHERE paste_id = ?",
        )
        .bind(paste_id)
        .fetch_all(&mut conn)
        .await?)
    }

    pub async fn count_attachments(&mut self, paste_id: &str) -> crate::ApiResult<i64> {
        let mut conn = self.pool.acquire().await?;
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM paste_attachments WHERE paste_id = ?")
                .bind(paste_id)
                .fetch_one(&mut conn)
                .await?,
        )
    }

    // ---- files ----

    /// Get all file records, newest first.
    pub async fn get_all_files(&mut self) -> crate::ApiResult<Vec<StoredFile>> {
        let mut conn = self.pool.acquire().await?;
        Ok(
            sqlx::query_as::<_, StoredFile>("SELECT * FROM files ORDER BY created_at DESC")
                .fetch_all(&mut conn)
                .await?,
        )
    }

    /// Get a file record by id.
    pub async fn get_file(&mut self, id: &str) -> crate::ApiResult<StoredFile> {
        let mut conn = self.pool.acquire().await?;
        let file = sqlx::query_as::<_, StoredFile>(
            "SELECT id, name, original_name, stored_name, file_size, mime_type, expires_at, \
             enabled, created_at FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut conn)
        .await?;
        Ok(file)
    }

    /// Insert a file record.
    pub async fn insert_file(&mut self, file: &StoredFile) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "INSERT INTO files (id, name, original_name, stored_name, file_size, mime_type, \
             expires_at, enabled, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&file.id)
        .bind(&file.name)
        .bind(&file.original_name)
        .bind(&file.stored_name)
        .bind(file.file_size)
        .bind(&file.mime_type)
        .bind(file.expires_at)
        .bind(file.enabled)
        .bind(file.created_at)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    /// Toggle a file's enabled flag. Errors with not-found on an unknown id.
    pub async fn set_file_enabled(&mut self, id: &str, enabled: bool) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("UPDATE files SET enabled = ? WHERE id = ?")
            .bind(enabled)
            .bind(id)
            .execute(&mut conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(crate::ApiError::NotFound);
        }
        Ok(())
    }

    /// Delete a file record by id.
    pub async fn delete_file(&mut self, id: &str) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    // ---- settings ----

    pub async fn get_settings(&mut self) -> crate::ApiResult<Settings> {
        let mut conn = self.pool.acquire().await?;
        let settings = sqlx::query_as::<_, Settings>(
            "SELECT admin_password_hash, uploads_enabled, max_file_size_mb, allowed_formats \
             FROM settings WHERE id = 1",
        )
        .fetch_one(&mut conn)
        .await?;
        Ok(settings)
    }

    /// Partially update the upload policy; `None` fields are left alone.
    pub async fn update_settings(
        &mut self,
        uploads_enabled: Option<bool>,
        max_file_size_mb: Option<i64>,
        allowed_formats: Option<&str>,
    ) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "UPDATE settings SET uploads_enabled = COALESCE(?, uploads_enabled), \
             max_file_size_mb = COALESCE(?, max_file_size_mb), \
             allowed_formats = COALESCE(?, allowed_formats) WHERE id = 1",
        )
        .bind(uploads_enabled)
        .bind(max_file_size_mb)
        .bind(allowed_formats)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    pub async fn set_admin_password_hash(&mut self, hash: &str) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("UPDATE settings SET admin_password_hash = ? WHERE id = 1")
            .bind(hash)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    // ---- sessions ----

    pub async fn insert_session(&mut self, session: &Session) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("INSERT INTO sessions (id, expires_at) VALUES (?, ?)")
            .bind(&session.id)
            .bind(session.expires_at)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Check a session id, lazily deleting it once expired.
    pub async fn validate_session(&mut self, id: &str) -> crate::ApiResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let session =
            sqlx::query_as::<_, Session>("SELECT id, expires_at FROM sessions WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut conn)
                .await?;
        match session {
            Some(session) if session.is_expired(Utc::now()) => {
                drop(conn);
                self.delete_session(id).await?;
                Ok(false)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    pub async fn delete_session(&mut self, id: &str) -> crate::ApiResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Delete every session past its expiry, returning how many went away.
    pub async fn delete_expired_sessions(
        &mut self,
        now: DateTime<Utc>,
    ) -> crate::ApiResult<u64> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now)
            .execute(&mut conn)
            .await?;
        Ok(result.rows_affected())
    }
}
