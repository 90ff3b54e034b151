use serde::Serialize;

pub const PERMISSION_DENIED_MESSAGE: &str =
    "You do not have permission to upload files. Please contact the administrator.";

/// Why a file landed in the conflicted bucket. Both reasons are reported
/// the same way to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    AlreadyExists,
    UploadFailed,
}

/// Terminal state of a single file within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Succeeded,
    Conflicted(ConflictReason),
    Aborted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub succeeded: Vec<String>,
    pub conflicted: Vec<String>,
    #[serde(rename = "permissionDenied")]
    pub permission_denied: Option<String>,
}

impl BatchResult {
    /// Folds one file outcome into the result.
    pub fn apply(mut self, name: &str, outcome: FileOutcome) -> Self {
        match outcome {
            FileOutcome::Succeeded => self.succeeded.push(name.to_string()),
            FileOutcome::Conflicted(_) => self.conflicted.push(name.to_string()),
            FileOutcome::Aborted => {
                self.permission_denied = Some(PERMISSION_DENIED_MESSAGE.to_string());
            }
        }
        self
    }

    pub fn is_aborted(&self) -> bool {
        self.permission_denied.is_some()
    }

    pub fn success_message(&self) -> Option<String> {
        if self.succeeded.is_empty() {
            return None;
        }
        Some(format!(
            "Successfully uploaded files: {}",
            self.succeeded.join(", ")
        ))
    }

    /// The permission message, if any, comes first, followed by the list
    /// of conflicted files.
    pub fn failure_message(&self) -> Option<String> {
        let conflicts = (!self.conflicted.is_empty()).then(|| {
            format!(
                "Failed to upload files because they already exist: {}",
                self.conflicted.join(", ")
            )
        });

        match (self.permission_denied.as_deref(), conflicts) {
            (Some(denied), Some(conflicts)) => Some(format!("{} {}", denied, conflicts)),
            (Some(denied), None) => Some(denied.to_string()),
            (None, conflicts) => conflicts,
        }
    }
}
