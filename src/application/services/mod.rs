mod object_store;
mod upload_orchestrator;

pub use object_store::ObjectStoreGateway;
pub use upload_orchestrator::UploadOrchestrator;
