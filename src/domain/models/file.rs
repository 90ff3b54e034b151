use crate::domain::models::identity::Identity;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A single file received for upload. `name` doubles as the object key.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: String, content_type: Option<String>, content: Vec<u8>) -> Self {
        Self {
            name,
            content_type: content_type
                .filter(|ct| !ct.is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            content,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub files: Vec<FilePayload>,
    pub overwrite: bool,
    pub identity: Option<Identity>,
}

impl UploadRequest {
    pub fn new(files: Vec<FilePayload>, overwrite: bool, identity: Option<Identity>) -> Self {
        Self {
            files,
            overwrite,
            identity,
        }
    }
}
