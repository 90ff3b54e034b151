use std::collections::HashMap;

use crate::domain::models::identity::Identity;

pub const USER_PRINCIPAL_NAME_KEY: &str = "userprincipalname";
pub const OBJECT_ID_KEY: &str = "objectid";

/// Provenance tags attached to every object stored in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    entries: HashMap<String, String>,
}

impl ObjectMetadata {
    /// Empty identity fields are left out instead of being stored as "".
    pub fn from_identity(identity: Option<&Identity>) -> Self {
        let mut entries = HashMap::new();

        if let Some(identity) = identity {
            if let Some(upn) = identity.principal_name.as_deref().filter(|v| !v.is_empty()) {
                entries.insert(USER_PRINCIPAL_NAME_KEY.to_string(), upn.to_string());
            }
            if let Some(oid) = identity.object_id.as_deref().filter(|v| !v.is_empty()) {
                entries.insert(OBJECT_ID_KEY.to_string(), oid.to_string());
            }
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }
}
