mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{middleware::TokenVerifier, router::build_router, state::AppState};
use application::services::UploadOrchestrator;
use domain::config::{local::LocalConfig, secrets::Secrets};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Initialize AWS SDK crypto provider (required for aws-sdk-s3)
    // This must be called before any AWS SDK operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let local_config = LocalConfig::from_env().expect("ERROR: Invalid service configuration");
    let secrets =
        Secrets::from_env(local_config.provider).expect("ERROR: Invalid secrets configuration");

    tracing::info!(
        "Starting blob-upload-service with provider '{}' and bucket '{}'",
        local_config.provider.as_str(),
        local_config.bucket_name
    );

    let object_store = services::create_object_store(&local_config, &secrets)
        .await
        .expect("Failed to create object store");

    let port = local_config.port;
    let app_state = AppState {
        local_config: Arc::new(local_config),
        token_verifier: Arc::new(TokenVerifier::new(&secrets.jwt_secrets)),
        upload_orchestrator: UploadOrchestrator::new(object_store),
    };

    let router = build_router(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
