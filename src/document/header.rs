//! Shared document header

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata envelope embedded in every manifest, playlist, catalog and index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub description: String,
    pub created_by: String,
    /// Fresh v4 UUID per document
    pub uuid: String,
    /// UTC creation time, RFC 3339
    pub timestamp: String,
}

impl Header {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            created_by: created_by.into(),
            uuid: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
