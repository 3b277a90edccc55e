//! Generic DNS record model
//!
//! This is the caller-facing representation shared by every provider.
//! Provider crates convert their wire formats to and from [`Record`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A DNS record as seen by callers
///
/// `id` is assigned by the provider on creation. A record without an id has
/// not been created yet. Once created, the id alone identifies the record
/// within its zone: two records with the same id are the same logical
/// record, whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Record type (A, AAAA, CNAME, TXT, ...), not validated locally
    #[serde(rename = "type")]
    pub record_type: String,

    /// Owner name within the zone
    pub name: String,

    /// Record data
    pub value: String,

    /// Time-to-live, serialized as whole seconds
    #[serde(with = "ttl_secs")]
    pub ttl: Duration,
}

impl Record {
    /// Create a record that does not exist at the provider yet
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: None,
            record_type: record_type.into(),
            name: name.into(),
            value: value.into(),
            ttl,
        }
    }

    /// Set the provider id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Exact string comparison against the record id
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
