use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;

use super::Storage;
use crate::ApiError;

/// Process-local object store. Nothing survives a restart; meant for tests
/// and throwaway deployments.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    async fn get_object(&mut self, key: &str) -> crate::ApiResult<Bytes> {
        let objects = self.objects.lock().unwrap();
        objects.get(key).cloned().ok_or(ApiError::NotFound)
    }

    async fn put_object(&mut self, key: &str, data: Bytes) -> crate::ApiResult<()> {
        let mut objects = self.objects.lock().unwrap();
        objects.insert(key.to_owned(), data);
        Ok(())
    }

    async fn delete_object(&mut self, key: &str) -> crate::ApiResult<()> {
        let mut objects = self.objects.lock().unwrap();
        objects.remove(key).ok_or(ApiError::NotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_the_map() {
        let mut storage = MemoryStorage::new();
        let mut other = storage.clone();

        storage
            .put_object("key", Bytes::from_static(b"data"))
            .await
            .unwrap();
        assert_eq!(&other.get_object("key").await.unwrap()[..], b"data");

        other.delete_object("key").await.unwrap();
        assert!(storage.get_object("key").await.is_err());
    }
}
