use std::path::PathBuf;

use anyhow::bail;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use super::Storage;

#[derive(Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub async fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir: PathBuf = dir.into();

        fs::create_dir_all(&dir).await?;

        if !dir.is_dir() {
            bail!("not a directory");
        }

        Ok(FileStorage { dir })
    }
}

impl Storage for FileStorage {
    async fn get_object(&mut self, key: &str) -> crate::ApiResult<axum::body::Bytes> {
        assert!(!key.contains('/'));

        let mut buf = Vec::with_capacity(1024);
        let mut file = BufReader::new(fs::File::open(self.dir.join(key)).await?);
        file.read_to_end(&mut buf).await?;

        Ok(buf.into())
    }

    async fn put_object(&mut self, key: &str, data: axum::body::Bytes) -> crate::ApiResult<()> {
        assert!(!key.contains('/'));

        let mut file = fs::File::create(self.dir.join(key)).await?;
        file.write_all(&data[..]).await?;

        Ok(())
    }

    async fn delete_object(&mut self, key: &str) -> crate::ApiResult<()> {
        assert!(!key.contains('/'));

        fs::remove_file(self.dir.join(key)).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;

    #[tokio::test]
    async fn round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path()).await.unwrap();

        storage
            .put_object("key", axum::body::Bytes::from_static(b"hello"))
            .await
            .unwrap();
        assert_eq!(&storage.get_object("key").await.unwrap()[..], b"hello");

        storage.delete_object("key").await.unwrap();
        assert!(matches!(
            storage.get_object("key").await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        FileStorage::new(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
