use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    adapters::middleware::TokenVerifier, application::services::UploadOrchestrator,
    domain::config::local::LocalConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub local_config: Arc<LocalConfig>,
    pub token_verifier: Arc<TokenVerifier>,
    pub upload_orchestrator: UploadOrchestrator,
}
