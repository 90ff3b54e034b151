#[derive(Debug)]
pub enum ApplicationError {
    EmptyBatch,
    BadRequest(String),
    Unauthorized,
    PayloadTooLarge,
    StorageUnavailable(String),
    InternalError(String),
}
