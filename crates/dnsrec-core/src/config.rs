//! Configuration types for dnsrec
//!
//! Provider configuration is a tagged enum so it can be loaded from JSON or
//! assembled from environment variables by a front end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ClouDNS API base path
pub const DEFAULT_CLOUDNS_BASE_URL: &str = "https://api.cloudns.net/dns/";

/// Default per-request HTTP timeout (in seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// DNS provider configuration
///
/// # Security
///
/// The Debug implementation does NOT expose the auth password.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// ClouDNS provider
    Cloudns {
        /// Main account auth id
        #[serde(default)]
        auth_id: Option<String>,
        /// Sub-account auth id (takes precedence over `auth_id`)
        #[serde(default)]
        sub_auth_id: Option<String>,
        /// API password
        auth_password: String,
        /// API base URL (defaults to [`DEFAULT_CLOUDNS_BASE_URL`])
        #[serde(default)]
        base_url: Option<String>,
        /// HTTP timeout in seconds (defaults to [`DEFAULT_TIMEOUT_SECS`])
        #[serde(default)]
        timeout_secs: Option<u64>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Cloudns {
                auth_id,
                sub_auth_id,
                base_url,
                timeout_secs,
                ..
            } => f
                .debug_struct("Cloudns")
                .field("auth_id", auth_id)
                .field("sub_auth_id", sub_auth_id)
                .field("auth_password", &"<REDACTED>")
                .field("base_url", base_url)
                .field("timeout_secs", timeout_secs)
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .finish_non_exhaustive(),
        }
    }
}

impl ProviderConfig {
    /// Build a ClouDNS configuration with default base URL and timeout
    pub fn cloudns(
        auth_id: Option<String>,
        sub_auth_id: Option<String>,
        auth_password: impl Into<String>,
    ) -> Self {
        ProviderConfig::Cloudns {
            auth_id,
            sub_auth_id,
            auth_password: auth_password.into(),
            base_url: None,
            timeout_secs: None,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cloudns {
                auth_id,
                sub_auth_id,
                auth_password,
                base_url,
                timeout_secs,
            } => {
                if auth_password.is_empty() {
                    return Err(crate::Error::config("ClouDNS auth password cannot be empty"));
                }
                let has_id = |id: &Option<String>| id.as_deref().is_some_and(|s| !s.is_empty());
                if !has_id(auth_id) && !has_id(sub_auth_id) {
                    return Err(crate::Error::config(
                        "ClouDNS requires either an auth id or a sub-account auth id",
                    ));
                }
                if let Some(url) = base_url
                    && !url.starts_with("https://")
                    && !url.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "ClouDNS base URL must use HTTP or HTTPS scheme. Got: {}",
                        url
                    )));
                }
                if *timeout_secs == Some(0) {
                    return Err(crate::Error::config("HTTP timeout must be > 0"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Cloudns { .. } => "cloudns",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}
