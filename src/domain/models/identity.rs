use serde::{Deserialize, Serialize};

/// Caller identity as resolved by the authentication layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "principalName")]
    pub principal_name: Option<String>,
    #[serde(rename = "objectId")]
    pub object_id: Option<String>,
}

impl Identity {
    pub fn new(principal_name: Option<String>, object_id: Option<String>) -> Self {
        Self {
            principal_name,
            object_id,
        }
    }
}
