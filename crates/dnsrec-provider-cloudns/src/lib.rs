// # ClouDNS DNS Provider
//
// This crate provides the ClouDNS implementation of the dnsrec
// `DnsProvider` contract.
//
// ## Layout
//
// - `codec`: wire types, TTL quantization, envelope and zone decoding
// - `client`: one method per API call (list, add, modify, delete)
// - `provider`: the get / append / set / delete contract on top of the client
// - `transport`: reqwest-backed HTTP transport
//
// ## Behaviour
//
// - One HTTP request at a time, no retries, no caching
// - TTLs are rounded up to the nearest value ClouDNS accepts
// - Deleting a record that does not exist is a no-op
// - Bulk calls stop at the first error; earlier records stay applied
//
// ## Security Requirements
//
// - The auth password NEVER appears in logs or error messages
// - Credentials are scoped to a provider instance
//
// ## API Reference
//
// - ClouDNS HTTP API: https://www.cloudns.net/wiki/article/41/
// - List records: GET `records.json`
// - Add record: POST `add-record.json`
// - Modify record: POST `mod-record.json`
// - Delete record: POST `delete-record.json`

pub mod client;
pub mod codec;
pub mod provider;
pub mod transport;

pub use client::{CloudnsClient, Credentials};
pub use provider::CloudnsProvider;
pub use transport::HttpTransport;

use dnsrec_core::config::{DEFAULT_CLOUDNS_BASE_URL, DEFAULT_TIMEOUT_SECS};
use dnsrec_core::{DnsProvider, DnsProviderFactory, Error, ProviderConfig, Result};
use std::sync::Arc;
use std::time::Duration;

/// Factory for creating ClouDNS providers
pub struct CloudnsFactory;

impl DnsProviderFactory for CloudnsFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Cloudns {
                auth_id,
                sub_auth_id,
                auth_password,
                base_url,
                timeout_secs,
            } => {
                let credentials = Credentials::new(
                    auth_id.as_deref(),
                    sub_auth_id.as_deref(),
                    auth_password.clone(),
                )?;

                let timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
                let transport = HttpTransport::new(timeout)?;

                let base_url = base_url.as_deref().unwrap_or(DEFAULT_CLOUDNS_BASE_URL);
                if base_url != DEFAULT_CLOUDNS_BASE_URL {
                    tracing::info!("[cloudns] Using API base URL {}", base_url);
                }

                let client =
                    CloudnsClient::new(credentials, Arc::new(transport)).with_base_url(base_url);
                Ok(Box::new(CloudnsProvider::new(client)))
            }
            _ => Err(Error::config("Invalid config for ClouDNS provider")),
        }
    }
}

/// Register the ClouDNS provider with a registry
///
/// This function should be called during initialization to make the
/// ClouDNS provider available.
///
/// # Example
///
/// ```rust
/// use dnsrec_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// dnsrec_provider_cloudns::register(&registry);
/// assert!(registry.has_provider("cloudns"));
/// ```
pub fn register(registry: &dnsrec_core::ProviderRegistry) {
    registry.register_provider("cloudns", Box::new(CloudnsFactory));
}
