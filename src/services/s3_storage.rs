use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{http::HttpResponse, BehaviorVersion, Credentials, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    primitives::ByteStream,
    Client,
};
use tracing::{debug, info};

use crate::{
    application::services::ObjectStoreGateway, domain::config::secrets::S3Secrets,
    services::error::StorageError,
};

const PERMISSION_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AuthorizationPermissionMismatch",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
];
const NOT_FOUND_ERROR_CODES: &[&str] = &["NoSuchKey", "NotFound"];

pub struct S3StorageService {
    client: Client,
    bucket_name: String,
}

impl S3StorageService {
    pub fn new(secrets: S3Secrets, bucket_name: String) -> Result<Self, StorageError> {
        let (access_key_id, secret_access_key) =
            match (secrets.access_key_id, secrets.secret_access_key) {
                (Some(id), Some(secret)) => (id, secret),
                _ => {
                    return Err(StorageError::InvalidCredentials(
                        "S3 access key id and secret access key are required".to_string(),
                    ))
                }
            };

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(secrets.region))
            .credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "blob-upload-service",
            ))
            .force_path_style(true);

        if let Some(endpoint) = secrets.endpoint {
            builder = builder.endpoint_url(endpoint.trim_end_matches('/'));
        }

        Ok(Self::from_client(Client::from_conf(builder.build()), bucket_name))
    }

    pub fn from_client(client: Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }

    /// Checks that the configured bucket exists and the credentials can
    /// reach it. `HeadObject` cannot tell a missing bucket from a missing
    /// key, so this runs once at startup.
    pub async fn verify_bucket(&self) -> Result<(), StorageError> {
        self.client
            .head_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
            .map_err(|e| classify(&self.bucket_name, e))?;

        info!("Bucket '{}' is reachable", self.bucket_name);
        Ok(())
    }
}

/// Maps an SDK failure onto the gateway error taxonomy. Status codes win
/// over error codes since `HeadObject` responses carry no body.
fn classify<E>(key: &str, error: SdkError<E, HttpResponse>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = error.raw_response().map(|r| r.status().as_u16());
    let code = error.code().map(str::to_string);
    let message = format!("{}: {}", key, DisplayErrorContext(&error));

    debug!("S3 error for '{}': status={:?}, code={:?}", key, status, code);

    match (status, code.as_deref()) {
        (Some(401) | Some(403), _) => StorageError::PermissionDenied(message),
        (_, Some(code)) if PERMISSION_ERROR_CODES.contains(&code) => {
            StorageError::PermissionDenied(message)
        }
        (Some(404), _) => StorageError::NotFound(message),
        (_, Some(code)) if NOT_FOUND_ERROR_CODES.contains(&code) => {
            StorageError::NotFound(message)
        }
        _ => StorageError::Transient(message),
    }
}

#[async_trait]
impl ObjectStoreGateway for S3StorageService {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let response = self
            .client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match response {
            Ok(_) => Ok(true),
            Err(e) => match classify(key, e) {
                StorageError::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(key, e))?;

        Ok(())
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .set_metadata(Some(metadata.clone()))
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| classify(key, e))?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::config::retry::RetryConfig;
    use aws_smithy_http_client::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_types::body::SdkBody;
    use axum::http;

    use super::*;

    fn secrets() -> S3Secrets {
        S3Secrets {
            endpoint: Some("http://localhost:9000/".to_string()),
            region: "us-east-1".to_string(),
            access_key_id: Some("minio".to_string()),
            secret_access_key: Some("minio123".to_string()),
        }
    }

    fn event(status: u16, body: &str) -> ReplayEvent {
        ReplayEvent::new(
            http::Request::builder()
                .uri("http://localhost:9000/uploads")
                .body(SdkBody::empty())
                .unwrap(),
            http::Response::builder()
                .status(status)
                .body(SdkBody::from(body.to_string()))
                .unwrap(),
        )
    }

    fn error_body(code: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>{}</Code><Message>denied</Message></Error>",
            code
        )
    }

    /// A service whose HTTP calls are answered, in order, by `events`.
    fn replayed(events: Vec<ReplayEvent>) -> S3StorageService {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("minio", "minio123", None, None, "test"))
            .endpoint_url("http://localhost:9000")
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .http_client(StaticReplayClient::new(events))
            .build();

        S3StorageService::from_client(Client::from_conf(config), "uploads".to_string())
    }

    #[test]
    fn requires_static_credentials() {
        let mut secrets = secrets();
        secrets.secret_access_key = None;

        let err = S3StorageService::new(secrets, "uploads".to_string())
            .err()
            .unwrap();
        assert!(matches!(err, StorageError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn builds_with_custom_endpoint() {
        let service = S3StorageService::new(secrets(), "uploads".to_string()).unwrap();
        assert_eq!(service.bucket_name, "uploads");
        assert_eq!(service.provider_name(), "s3");
    }

    #[tokio::test]
    async fn head_object_status_maps_to_existence() {
        let service = replayed(vec![event(200, ""), event(404, "")]);

        assert!(service.exists("a.txt").await.unwrap());
        assert!(!service.exists("b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn forbidden_head_object_is_permission_denied() {
        let service = replayed(vec![event(403, "")]);

        let err = service.exists("a.txt").await.unwrap_err();
        assert!(err.is_permission_denied(), "got {:?}", err);
    }

    #[tokio::test]
    async fn put_permission_failures_are_permission_denied() {
        let service = replayed(vec![
            event(403, &error_body("AuthorizationPermissionMismatch")),
            event(400, &error_body("AccessDenied")),
        ]);

        for _ in 0..2 {
            let err = service
                .put("a.txt", b"x".to_vec(), "text/plain", &HashMap::new())
                .await
                .unwrap_err();
            assert!(err.is_permission_denied(), "got {:?}", err);
        }
    }

    #[tokio::test]
    async fn server_errors_are_transient() {
        let service = replayed(vec![event(500, &error_body("InternalError"))]);

        let err = service
            .put("a.txt", b"x".to_vec(), "text/plain", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Transient(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn delete_of_missing_key_is_not_found() {
        let service = replayed(vec![event(204, ""), event(404, &error_body("NoSuchKey"))]);

        service.delete("a.txt").await.unwrap();
        let err = service.delete("a.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn verify_bucket_fails_for_missing_bucket() {
        let service = replayed(vec![event(200, ""), event(404, "")]);

        service.verify_bucket().await.unwrap();
        let err = service.verify_bucket().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)), "got {:?}", err);
    }
}
