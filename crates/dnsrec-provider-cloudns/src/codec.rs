//! ClouDNS wire formats and the record codec
//!
//! ClouDNS answers list calls with a JSON object keyed by its own internal
//! record ids, and mutating calls with a status envelope:
//!
//! ```json
//! {"status": "Success", "statusDescription": "...", "data": {"id": 123}}
//! {"status": "Failed", "statusDescription": "Record already exists"}
//! ```
//!
//! TTLs travel as integer-second strings and must be one of a fixed set of
//! values, see [`quantize_ttl`].

use dnsrec_core::{Error, Record, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// TTL values ClouDNS accepts, in seconds, ascending
pub const TTL_BUCKETS: [u32; 13] = [
    60, 300, 900, 1800, 3600, 21600, 43200, 86400, 172800, 259200, 604800, 1209600, 2592000,
];

/// Largest accepted TTL (30 days)
pub const MAX_TTL: u32 = 2592000;

/// Status value of a successful envelope
const SUCCESS: &str = "Success";

/// A JSON scalar ClouDNS sends either quoted or bare
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireScalar {
    Text(String),
    Number(i64),
}

impl fmt::Display for WireScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireScalar::Text(s) => f.write_str(s),
            WireScalar::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Wire record from `records.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecord {
    pub id: WireScalar,
    #[serde(rename = "type")]
    pub record_type: String,
    pub host: String,
    pub record: String,
    #[serde(default)]
    pub failover: Option<WireScalar>,
    pub ttl: WireScalar,
    #[serde(default)]
    pub status: Option<i64>,
}

/// Status envelope returned by mutating calls
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(rename = "statusDescription", default)]
    pub status_description: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Record id carried in `data.id`, if the call returned one
    pub fn assigned_id(&self) -> Option<String> {
        let id = self.data.as_ref()?.get("id")?;
        match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Round a TTL up to the smallest bucket ClouDNS accepts
///
/// Requests above the largest bucket are clamped to [`MAX_TTL`]. Sub-second
/// remainders count as a whole extra second.
pub fn quantize_ttl(ttl: Duration) -> u32 {
    let mut secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs = secs.saturating_add(1);
    }
    TTL_BUCKETS
        .iter()
        .copied()
        .find(|bucket| u64::from(*bucket) >= secs)
        .unwrap_or(MAX_TTL)
}

/// TTL in seconds as a duration
pub fn ttl_duration(secs: u32) -> Duration {
    Duration::from_secs(u64::from(secs))
}

/// Parse a wire TTL
///
/// Unparseable values decode to a zero TTL instead of failing the whole
/// listing.
pub fn parse_ttl(raw: &WireScalar) -> Duration {
    let parsed = match raw {
        WireScalar::Text(s) => s.trim().parse::<u64>().ok(),
        WireScalar::Number(n) => u64::try_from(*n).ok(),
    };
    match parsed {
        Some(secs) => Duration::from_secs(secs),
        None => {
            tracing::warn!("[cloudns] Unparseable TTL {:?}, using 0s", raw);
            Duration::ZERO
        }
    }
}

/// Convert a wire record to the generic model
pub fn decode_record(wire: ApiRecord) -> Record {
    let ttl = parse_ttl(&wire.ttl);
    Record {
        id: Some(wire.id.to_string()),
        record_type: wire.record_type,
        name: wire.host,
        value: wire.record,
        ttl,
    }
}

/// Decode a `records.json` body
///
/// The body is a mapping of internal keys to wire records; keys are
/// dropped and the result order is unspecified. ClouDNS sends `[]` for a
/// zone without records and a failure envelope for an unknown zone.
pub fn decode_zone(body: &str) -> Result<Vec<Record>> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::decode(e.to_string(), body))?;

    if let Value::Array(items) = &value
        && items.is_empty()
    {
        return Ok(Vec::new());
    }

    if value.get("status").is_some_and(Value::is_string) {
        let envelope: Envelope =
            serde_json::from_value(value).map_err(|e| Error::decode(e.to_string(), body))?;
        return Err(rejection(&envelope));
    }

    let records: HashMap<String, ApiRecord> =
        serde_json::from_value(value).map_err(|e| Error::decode(e.to_string(), body))?;
    Ok(records.into_values().map(decode_record).collect())
}

/// Decode a status envelope, failing unless the status is `Success`
pub fn decode_envelope(body: &str) -> Result<Envelope> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| Error::decode(e.to_string(), body))?;
    if envelope.status != SUCCESS {
        return Err(rejection(&envelope));
    }
    Ok(envelope)
}

fn rejection(envelope: &Envelope) -> Error {
    if envelope.status_description.is_empty() {
        Error::vendor_rejected(format!("status {}", envelope.status))
    } else {
        Error::vendor_rejected(envelope.status_description.clone())
    }
}
