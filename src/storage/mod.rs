use axum::body::Bytes;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Object store for uploaded file bytes; metadata stays in the database.
pub trait Storage {
    /// Get an object by key.
    async fn get_object(&mut self, key: &str) -> crate::ApiResult<Bytes>;

    /// Put an object's data by key.
    async fn put_object(&mut self, key: &str, data: Bytes) -> crate::ApiResult<()>;

    /// Delete an object by key.
    async fn delete_object(&mut self, key: &str) -> crate::ApiResult<()>;
}

#[derive(Clone)]
pub enum AnyStorage {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl Storage for AnyStorage {
    async fn get_object(&mut self, key: &str) -> crate::ApiResult<Bytes> {
        match self {
            AnyStorage::File(file) => file.get_object(key).await,
            AnyStorage::Memory(memory) => memory.get_object(key).await,
        }
    }

    async fn put_object(&mut self, key: &str, data: Bytes) -> crate::ApiResult<()> {
        match self {
            AnyStorage::File(file) => file.put_object(key, data).await,
            AnyStorage::Memory(memory) => memory.put_object(key, data).await,
        }
    }

    async fn delete_object(&mut self, key: &str) -> crate::ApiResult<()> {
        match self {
            AnyStorage::File(file) => file.delete_object(key).await,
            AnyStorage::Memory(memory) => memory.delete_object(key).await,
        }
    }
}

impl From<FileStorage> for AnyStorage {
    fn from(value: FileStorage) -> Self {
        AnyStorage::File(value)
    }
}

impl From<MemoryStorage> for AnyStorage {
    fn from(value: MemoryStorage) -> Self {
        AnyStorage::Memory(value)
    }
}
