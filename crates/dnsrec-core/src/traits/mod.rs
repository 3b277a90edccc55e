//! Core traits for dnsrec
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsProvider`]: The four record operations a calling framework expects
//! - [`Transport`]: Issues one authenticated HTTP round trip for a provider

pub mod dns_provider;
pub mod transport;

pub use dns_provider::{DnsProvider, DnsProviderFactory};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
