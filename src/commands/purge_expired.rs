use chrono::Utc;
use tracing::{info, warn};

use crate::storage::Storage;
use crate::ApiError;
use crate::App;

/// One-shot sweep: drop expired pastes, files (records and stored bytes),
/// and sessions, then exit.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    let now = Utc::now();

    let mut pastes_deleted = 0;
    for paste in app.database.get_all_pastes().await? {
        if paste.is_expired(now) {
            app.database.delete_paste(&paste.id).await?;
            pastes_deleted += 1;
        }
    }

    let mut files_deleted = 0;
    for file in app.database.get_all_files().await? {
        if file.is_expired(now) {
            match app.storage.delete_object(&file.stored_name).await {
                Ok(()) => {}
                Err(ApiError::NotFound) => {
                    warn!("stored object already gone for file {}", file.id)
                }
                Err(err) => return Err(err.into()),
            }
            app.database.delete_file(&file.id).await?;
            files_deleted += 1;
        }
    }

    let sessions_deleted = app.database.delete_expired_sessions(now).await?;

    info!(
        "purged {pastes_deleted} pastes, {files_deleted} files, {sessions_deleted} sessions"
    );

    Ok(())
}
