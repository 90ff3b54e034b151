use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::adapters::{
    controllers::{health_controller::HealthController, upload_controller::UploadController},
    middleware::require_identity,
    state::AppState,
};

async fn hello_world() -> &'static str {
    "Hello, world!"
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = cors_layer(app_state.local_config.cors_allowed_origins.as_deref());
    let max_upload_bytes = app_state.local_config.max_upload_bytes;

    // Routes that require a verified bearer token
    let protected_routes = Router::new()
        .route("/api/v1/uploads", post(UploadController::upload_files))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_identity,
        ));

    let public_routes = Router::new()
        .route("/", get(hello_world))
        .route("/api/v1/health", get(HealthController::health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(cors)
        .with_state(app_state)
}
