mod error;
mod memory_storage;
mod s3_storage;

pub use error::StorageError;
pub use memory_storage::MemoryStorageService;
pub use s3_storage::S3StorageService;

use std::sync::Arc;

use crate::{
    application::services::ObjectStoreGateway,
    domain::config::{
        local::{LocalConfig, Provider},
        secrets::Secrets,
    },
};

/// Builds the configured gateway. For S3 the bucket is checked up front so a
/// misconfigured bucket fails at startup rather than on the first upload.
pub async fn create_object_store(
    config: &LocalConfig,
    secrets: &Secrets,
) -> Result<Arc<dyn ObjectStoreGateway>, StorageError> {
    match config.provider {
        Provider::S3 => {
            let s3_secrets = secrets.s3_secrets.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("S3 secrets not found".to_string())
            })?;

            let service = S3StorageService::new(s3_secrets.clone(), config.bucket_name.clone())?;
            service.verify_bucket().await?;
            Ok(Arc::new(service))
        }
        Provider::Memory => Ok(Arc::new(MemoryStorageService::new())),
    }
}
