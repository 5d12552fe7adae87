use axum::extract::multipart::MultipartError;
use axum::http::{self, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("wrong password")]
    WrongPassword,
    #[error("password is required")]
    PasswordRequired,
    #[error("missing password")]
    MissingPassword,
    #[error("content or attachments required")]
    EmptyPaste,
    #[error("attachment does not resolve to an uploaded file")]
    UnknownAttachment,
    #[error("missing multipart file")]
    MissingFile,
    #[error("missing multipart file name")]
    MissingFileName,
    #[error("uploads are disabled")]
    UploadsDisabled,
    #[error("file exceeds the maximum upload size")]
    FileTooLarge,
    #[error("file format is not allowed")]
    FormatNotAllowed,
    #[error("insufficient storage")]
    InsufficientStorage,
    #[error("error reading multipart data")]
    Multipart {
        #[from]
        source: MultipartError,
    },
    #[error("http error")]
    Http {
        #[from]
        source: http::Error,
    },
    #[error("database error")]
    Database { source: sqlx::Error },
    #[error("IO error")]
    IO { source: std::io::Error },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::WrongPassword => StatusCode::FORBIDDEN,
            ApiError::PasswordRequired => StatusCode::FORBIDDEN,
            ApiError::MissingPassword => StatusCode::BAD_REQUEST,
            ApiError::EmptyPaste => StatusCode::BAD_REQUEST,
            ApiError::UnknownAttachment => StatusCode::BAD_REQUEST,
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::MissingFileName => StatusCode::BAD_REQUEST,
            ApiError::UploadsDisabled => StatusCode::FORBIDDEN,
            ApiError::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::FormatNotAllowed => StatusCode::BAD_REQUEST,
            ApiError::InsufficientStorage => StatusCode::INSUFFICIENT_STORAGE,
            ApiError::Multipart { .. } => StatusCode::BAD_REQUEST,
            ApiError::Http { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::IO { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, Json(json!({ "error": format!("{self}") }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            _ => ApiError::Database { source },
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ApiError::NotFound,
            std::io::ErrorKind::StorageFull => ApiError::InsufficientStorage,
            _ => ApiError::IO { source },
        }
    }
}
