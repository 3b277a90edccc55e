//! ClouDNS API client
//!
//! One method per API call. Every request carries the account credentials
//! in its query string:
//!
//! ```http
//! GET  records.json?domain-name=example.com
//! POST add-record.json?domain-name=..&record-type=..&host=..&record=..&ttl=..
//! POST mod-record.json?domain-name=..&record-id=..&host=..&record=..&ttl=..
//! POST delete-record.json?domain-name=..&record-id=..
//! ```

use dnsrec_core::config::DEFAULT_CLOUDNS_BASE_URL;
use dnsrec_core::{ApiRequest, CallContext, Error, HttpMethod, Record, Result, Transport};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::codec::{self, Envelope};

const RECORDS: &str = "records.json";
const ADD_RECORD: &str = "add-record.json";
const MOD_RECORD: &str = "mod-record.json";
const DELETE_RECORD: &str = "delete-record.json";

/// Maximum number of body bytes written to logs and error messages
const LOG_BODY_LIMIT: usize = 256;

/// Which ClouDNS identity authenticates the calls
#[derive(Clone, PartialEq, Eq)]
enum Identity {
    /// Main account, sent as `auth-id`
    Account(String),
    /// Sub-account, sent as `sub-auth-id`
    SubAccount(String),
}

/// ClouDNS API credentials
///
/// # Security
///
/// The Debug implementation does NOT expose the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identity: Identity,
    auth_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, id) = match &self.identity {
            Identity::Account(id) => ("auth-id", id),
            Identity::SubAccount(id) => ("sub-auth-id", id),
        };
        f.debug_struct("Credentials")
            .field(kind, id)
            .field("auth_password", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from optional main and sub-account ids
    ///
    /// A non-empty sub-account id takes precedence over the main id.
    pub fn new(
        auth_id: Option<&str>,
        sub_auth_id: Option<&str>,
        auth_password: impl Into<String>,
    ) -> Result<Self> {
        let auth_password = auth_password.into();
        if auth_password.is_empty() {
            return Err(Error::config("ClouDNS auth password cannot be empty"));
        }

        let identity = match (
            sub_auth_id.filter(|s| !s.is_empty()),
            auth_id.filter(|s| !s.is_empty()),
        ) {
            (Some(sub), _) => Identity::SubAccount(sub.to_string()),
            (None, Some(id)) => Identity::Account(id.to_string()),
            (None, None) => {
                return Err(Error::config(
                    "ClouDNS requires either an auth id or a sub-account auth id",
                ));
            }
        };

        Ok(Self {
            identity,
            auth_password,
        })
    }

    /// Main account credentials
    pub fn account(auth_id: &str, auth_password: impl Into<String>) -> Result<Self> {
        Self::new(Some(auth_id), None, auth_password)
    }

    /// Sub-account credentials
    pub fn sub_account(sub_auth_id: &str, auth_password: impl Into<String>) -> Result<Self> {
        Self::new(None, Some(sub_auth_id), auth_password)
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        let request = match &self.identity {
            Identity::Account(id) => request.param("auth-id", id.as_str()),
            Identity::SubAccount(id) => request.param("sub-auth-id", id.as_str()),
        };
        request.param("auth-password", self.auth_password.as_str())
    }
}

/// Low-level ClouDNS client
///
/// Holds credentials, the API base URL and the transport. Stateless
/// otherwise; every method is one logical operation and never retries.
#[derive(Clone)]
pub struct CloudnsClient {
    credentials: Credentials,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for CloudnsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudnsClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CloudnsClient {
    /// Create a client against the public ClouDNS API
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_CLOUDNS_BASE_URL.to_string(),
            transport,
        }
    }

    /// Use a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// List every record in the zone
    ///
    /// One GET, no pagination. Order of the result is unspecified.
    pub async fn get_records(&self, ctx: &CallContext, zone: &str) -> Result<Vec<Record>> {
        let zone = zone_name(zone);
        let body = self
            .invoke(ctx, HttpMethod::Get, RECORDS, &[("domain-name", zone)])
            .await?;
        let records = codec::decode_zone(&body)?;
        tracing::debug!("[cloudns] {} record(s) in zone {}", records.len(), zone);
        Ok(records)
    }

    /// Find one record by id
    ///
    /// Lists the zone and scans it; fails with [`Error::NotFound`] when no
    /// record carries `id`.
    pub async fn get_record(&self, ctx: &CallContext, zone: &str, id: &str) -> Result<Record> {
        self.get_records(ctx, zone)
            .await?
            .into_iter()
            .find(|record| record.has_id(id))
            .ok_or_else(|| {
                Error::not_found(format!("record {} in zone {}", id, zone_name(zone)))
            })
    }

    /// Create a record
    ///
    /// The TTL is quantized before sending and the returned record carries
    /// the quantized value and the id ClouDNS assigned.
    pub async fn add_record(
        &self,
        ctx: &CallContext,
        zone: &str,
        record_type: &str,
        host: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<Record> {
        let zone = zone_name(zone);
        let ttl = codec::quantize_ttl(ttl);
        let ttl_param = ttl.to_string();

        let body = self
            .invoke(
                ctx,
                HttpMethod::Post,
                ADD_RECORD,
                &[
                    ("domain-name", zone),
                    ("record-type", record_type),
                    ("host", host),
                    ("record", value),
                    ("ttl", ttl_param.as_str()),
                ],
            )
            .await?;
        let envelope = codec::decode_envelope(&body)?;

        let id = envelope.assigned_id().ok_or_else(|| {
            Error::decode("success envelope without data.id", truncate_for_log(&body))
        })?;

        tracing::info!(
            "[cloudns] Created {} record {} in zone {} (id {}, ttl {}s)",
            record_type,
            host,
            zone,
            id,
            ttl
        );

        Ok(Record {
            id: Some(id),
            record_type: record_type.to_string(),
            name: host.to_string(),
            value: value.to_string(),
            ttl: codec::ttl_duration(ttl),
        })
    }

    /// Update a record in place
    ///
    /// The modify call does not echo the record type, so the record is read
    /// back afterwards under the id the vendor reports, which may differ from
    /// `id`. A record that vanished between the two calls is reported as
    /// [`Error::NotFound`].
    pub async fn update_record(
        &self,
        ctx: &CallContext,
        zone: &str,
        id: &str,
        host: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<Record> {
        let zone = zone_name(zone);
        let ttl = codec::quantize_ttl(ttl);
        let ttl_param = ttl.to_string();

        let body = self
            .invoke(
                ctx,
                HttpMethod::Post,
                MOD_RECORD,
                &[
                    ("domain-name", zone),
                    ("record-id", id),
                    ("host", host),
                    ("record", value),
                    ("ttl", ttl_param.as_str()),
                ],
            )
            .await?;
        let envelope = codec::decode_envelope(&body)?;
        let id = resulting_id(&envelope, id);

        let current = self.get_record(ctx, zone, &id).await?;

        tracing::info!(
            "[cloudns] Updated {} record {} in zone {} (id {}, ttl {}s)",
            current.record_type,
            host,
            zone,
            id,
            ttl
        );

        Ok(Record {
            id: Some(id),
            record_type: current.record_type,
            name: host.to_string(),
            value: value.to_string(),
            ttl: codec::ttl_duration(ttl),
        })
    }

    /// Delete a record
    ///
    /// Reads the record first so the deleted state can be returned. A
    /// record that does not exist is a no-op returning `Ok(None)`.
    pub async fn delete_record(
        &self,
        ctx: &CallContext,
        zone: &str,
        id: &str,
    ) -> Result<Option<Record>> {
        let zone = zone_name(zone);
        let existing = match self.get_record(ctx, zone, id).await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                tracing::debug!("[cloudns] Record {} not in zone {}, nothing to delete", id, zone);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let body = self
            .invoke(
                ctx,
                HttpMethod::Post,
                DELETE_RECORD,
                &[("domain-name", zone), ("record-id", id)],
            )
            .await?;
        codec::decode_envelope(&body)?;

        tracing::info!(
            "[cloudns] Deleted {} record {} from zone {} (id {})",
            existing.record_type,
            existing.name,
            zone,
            id
        );
        Ok(Some(existing))
    }

    /// Send one authenticated call and return the body of a 200 response
    async fn invoke(
        &self,
        ctx: &CallContext,
        method: HttpMethod,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        let mut request = self.credentials.apply(ApiRequest::new(method, url));
        for (key, value) in params {
            request = request.param(*key, *value);
        }

        tracing::debug!(
            "[cloudns] {} {} (zone {})",
            method,
            endpoint,
            request.query_value("domain-name").unwrap_or("-")
        );

        let response = ctx.run(self.transport.send(&request)).await?;

        tracing::debug!(
            "[cloudns] Response Status: {} Body: {}",
            response.status,
            truncate_for_log(&response.body)
        );

        if response.status != 200 {
            return Err(Error::unexpected_status(
                response.status,
                truncate_for_log(&response.body),
            ));
        }

        Ok(response.body)
    }
}

/// Id after an update: the one in the envelope if present, else the old one
fn resulting_id(envelope: &Envelope, requested: &str) -> String {
    envelope
        .assigned_id()
        .unwrap_or_else(|| requested.to_string())
}

/// ClouDNS expects zone names without the trailing root dot
fn zone_name(zone: &str) -> &str {
    zone.strip_suffix('.').unwrap_or(zone)
}

/// Truncate a body for logs and error messages
fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_LIMIT {
        return s.to_string();
    }
    let mut end = LOG_BODY_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}
