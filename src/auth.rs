use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::db::Database;
use crate::models::Session;
use crate::ApiError;

/// Cookie carrying the admin session id.
pub const SESSION_COOKIE: &str = "cv_session";

const SESSION_TTL_DAYS: i64 = 7;

/// Hash a password with SHA-256, hex-encoded.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build a fresh admin session record.
pub fn new_session() -> Session {
    Session {
        id: Uuid::new_v4().to_string(),
        expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
    }
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(session_id: &str) -> String {
    let max_age = SESSION_TTL_DAYS * 24 * 60 * 60;
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session id out of the `Cookie` header, if present.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_owned())
    })
}

/// Extractor proving the request carries a valid admin session.
pub struct AdminSession {
    pub session_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session_id =
            session_id_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;

        let mut database = Database::from_ref(state);
        if database.validate_session(&session_id).await? {
            Ok(AdminSession { session_id })
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn password_hash_matches_known_vector() {
        // SHA-256 for "admin"
        assert_eq!(
            hash_password("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
    }

    #[test]
    fn cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cv_session=abc-123; lang=en"),
        );
        assert_eq!(session_id_from_headers(&headers), Some("abc-123".into()));

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn new_sessions_are_not_expired() {
        let session = new_session();
        assert!(!session.is_expired(Utc::now()));
    }
}
