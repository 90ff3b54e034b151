use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::batch::BatchResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadMessages {
    pub success: Option<String>,
    pub failure: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadBatchResponse {
    pub succeeded: Vec<String>,
    pub conflicted: Vec<String>,
    #[serde(rename = "permissionDenied")]
    pub permission_denied: Option<String>,
    pub messages: UploadMessages,
    #[serde(rename = "processedAt")]
    pub processed_at: DateTime<Utc>,
}

impl From<BatchResult> for UploadBatchResponse {
    fn from(result: BatchResult) -> Self {
        let messages = UploadMessages {
            success: result.success_message(),
            failure: result.failure_message(),
        };

        Self {
            succeeded: result.succeeded,
            conflicted: result.conflicted,
            permission_denied: result.permission_denied,
            messages,
            processed_at: Utc::now(),
        }
    }
}
