use std::collections::HashMap;

use async_trait::async_trait;

use crate::services::StorageError;

/// Primitive operations the upload pipeline needs from an object store.
/// Retries, if any, happen below this trait.
#[async_trait]
pub trait ObjectStoreGateway: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Removes `key`. Implementations report a missing object as
    /// `StorageError::NotFound`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Stores `body` under `key` with the given content type and user metadata.
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<(), StorageError>;

    fn provider_name(&self) -> &'static str;
}
