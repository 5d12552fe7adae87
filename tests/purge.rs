use axum::http::StatusCode;
use chrono::{Duration, Utc};
use tower::ServiceExt;

use pastevault::commands::purge_expired;
use pastevault::models::{Paste, Session};
use pastevault::storage::Storage;

mod common;
use common::*;

#[tokio::test]
async fn purge_removes_expired_records_and_bytes() {
    let (app, mut state, _dir) = setup().await;
    let now = Utc::now();

    state
        .database
        .insert_paste(&Paste {
            id: "stale".into(),
            content: "old".into(),
            language: "plaintext".into(),
            password: None,
            expires_at: Some(now - Duration::hours(1)),
            created_at: now - Duration::days(2),
        })
        .await
        .unwrap();
    state
        .database
        .insert_paste(&Paste {
            id: "fresh".into(),
            content: "new".into(),
            language: "plaintext".into(),
            password: None,
            expires_at: None,
            created_at: now,
        })
        .await
        .unwrap();

    // expired upload with live bytes in storage
    let response = app
        .clone()
        .oneshot(upload_request("old.txt", "text/plain", b"bytes", &[], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let file_id = body_json(response).await["id"].as_str().unwrap().to_owned();
    let mut file = state.database.get_file(&file_id).await.unwrap();
    file.expires_at = Some(now - Duration::minutes(5));
    state.database.delete_file(&file_id).await.unwrap();
    state.database.insert_file(&file).await.unwrap();

    state
        .database
        .insert_session(&Session {
            id: "dead-session".into(),
            expires_at: now - Duration::days(1),
        })
        .await
        .unwrap();

    purge_expired::run(state.clone()).await.unwrap();

    assert!(state.database.get_paste("stale").await.is_err());
    assert!(state.database.get_paste("fresh").await.is_ok());
    assert!(state.database.get_file(&file_id).await.is_err());
    assert!(state.storage.get_object(&file.stored_name).await.is_err());
    assert!(!state.database.validate_session("dead-session").await.unwrap());
}
