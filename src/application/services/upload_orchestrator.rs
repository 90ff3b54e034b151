use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, services::ObjectStoreGateway},
    domain::models::{
        batch::{BatchResult, ConflictReason, FileOutcome},
        file::{FilePayload, UploadRequest},
        metadata::ObjectMetadata,
    },
    services::StorageError,
};

/// Drives a batch of files through the object store one at a time.
///
/// Each file is checked for an existing object, optionally replaced, and
/// uploaded with the batch's provenance metadata. A permission failure on
/// any store call ends the whole batch; files already written stay written.
#[derive(Clone)]
pub struct UploadOrchestrator {
    store: Arc<dyn ObjectStoreGateway>,
}

impl UploadOrchestrator {
    pub fn new(store: Arc<dyn ObjectStoreGateway>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStoreGateway> {
        &self.store
    }

    pub async fn process(&self, request: UploadRequest) -> Result<BatchResult, ApplicationError> {
        if request.files.is_empty() {
            warn!("Rejected upload batch without files");
            return Err(ApplicationError::EmptyBatch);
        }

        let metadata = ObjectMetadata::from_identity(request.identity.as_ref());
        let span = info_span!(
            "upload_batch",
            batch_id = %Uuid::new_v4(),
            files = request.files.len(),
            overwrite = request.overwrite,
            provider = self.store.provider_name(),
        );

        async move {
            let mut result = BatchResult::default();

            for file in request.files {
                let name = file.name.clone();
                let outcome = self.process_file(file, request.overwrite, &metadata).await?;
                result = result.apply(&name, outcome);

                if outcome == FileOutcome::Aborted {
                    warn!("Permission denied on '{}', aborting remaining files", name);
                    break;
                }
            }

            info!(
                succeeded = result.succeeded.len(),
                conflicted = result.conflicted.len(),
                aborted = result.is_aborted(),
                "Upload batch finished"
            );
            Ok::<_, ApplicationError>(result)
        }
        .instrument(span)
        .await
    }

    /// Runs one file through check, optional delete, and upload.
    ///
    /// Returns `Err` only for store failures that are neither permission
    /// problems nor upload failures, i.e. when the existence check or the
    /// overwrite delete cannot be completed.
    pub async fn process_file(
        &self,
        file: FilePayload,
        overwrite: bool,
        metadata: &ObjectMetadata,
    ) -> Result<FileOutcome, ApplicationError> {
        let exists = match self.store.exists(&file.name).await {
            Ok(exists) => exists,
            Err(e) if e.is_permission_denied() => {
                warn!("Existence check for '{}' denied: {}", file.name, e);
                return Ok(FileOutcome::Aborted);
            }
            Err(e) => {
                error!("Existence check for '{}' failed: {}", file.name, e);
                return Err(e.into());
            }
        };

        if exists {
            if !overwrite {
                info!("'{}' already exists, skipping", file.name);
                return Ok(FileOutcome::Conflicted(ConflictReason::AlreadyExists));
            }

            match self.store.delete(&file.name).await {
                Ok(()) => info!("Deleted existing '{}' before overwrite", file.name),
                Err(StorageError::NotFound(_)) => {
                    info!("'{}' vanished before delete, continuing", file.name);
                }
                Err(e) if e.is_permission_denied() => {
                    warn!("Delete of '{}' denied: {}", file.name, e);
                    return Ok(FileOutcome::Aborted);
                }
                Err(e) => {
                    error!("Delete of '{}' failed: {}", file.name, e);
                    return Err(e.into());
                }
            }
        }

        let FilePayload {
            name,
            content_type,
            content,
        } = file;
        let size = content.len();

        match self
            .store
            .put(&name, content, &content_type, metadata.as_map())
            .await
        {
            Ok(()) => {
                info!("Uploaded '{}' ({} bytes, {})", name, size, content_type);
                Ok(FileOutcome::Succeeded)
            }
            Err(e) if e.is_permission_denied() => {
                warn!("Upload of '{}' denied: {}", name, e);
                Ok(FileOutcome::Aborted)
            }
            Err(e) => {
                warn!("Upload of '{}' failed: {}", name, e);
                Ok(FileOutcome::Conflicted(ConflictReason::UploadFailed))
            }
        }
    }
}
