use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use pastevault::commands::serve::router;
use pastevault::config::{Config, Database, Limits, Storage, StorageKind};
use pastevault::App;

/// Build an app backed by a throwaway SQLite file and in-memory object
/// storage. The `TempDir` must stay alive for the duration of the test.
pub async fn setup() -> (Router, App, TempDir) {
    let dir = TempDir::new().unwrap();

    let config = Config {
        base_url: "http://localhost".into(),
        port: 0,
        database: Database {
            url: format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display()),
        },
        storage: Storage {
            kind: StorageKind::Memory,
            dir: dir.path().join("uploads"),
        },
        limits: Limits {
            max_upload_size: 16 * 1024 * 1024,
        },
    };

    let app = App::new(config).await.unwrap();
    (router(app.clone()), app, dir)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    hyper::body::to_bytes(response.into_body())
        .await
        .unwrap()
        .to_vec()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Log in with the default password and return the `cv_session=...` cookie
/// pair for subsequent requests.
pub async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "password": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_owned()
}

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart form with a single file part plus extra text fields.
pub fn multipart_body(
    file_name: &str,
    content_type: &str,
    data: &[u8],
    fields: &[(&str, &str)],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(
    file_name: &str,
    content_type: &str,
    data: &[u8],
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .uri("/api/files/upload")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(multipart_body(
            file_name,
            content_type,
            data,
            fields,
        )))
        .unwrap()
}
