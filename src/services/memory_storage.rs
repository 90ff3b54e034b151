use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{application::services::ObjectStoreGateway, services::error::StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub content_type: String,
    pub metadata: HashMap<String, String>,
}

/// Process-local object store for development and tests.
#[derive(Default)]
pub struct MemoryStorageService {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStoreGateway for MemoryStorageService {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<(), StorageError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                content: body,
                content_type: content_type.to_string(),
                metadata: metadata.clone(),
            },
        );
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_exists_then_delete() {
        let store = MemoryStorageService::new();
        assert!(!store.exists("a.txt").await.unwrap());

        let metadata = HashMap::from([("objectid".to_string(), "oid-1".to_string())]);
        store
            .put("a.txt", b"hello".to_vec(), "text/plain", &metadata)
            .await
            .unwrap();

        assert!(store.exists("a.txt").await.unwrap());
        let stored = store.get("a.txt").await.unwrap();
        assert_eq!(stored.content, b"hello");
        assert_eq!(stored.content_type, "text/plain");
        assert_eq!(stored.metadata, metadata);

        store.delete("a.txt").await.unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn delete_missing_reports_not_found() {
        let store = MemoryStorageService::new();
        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
