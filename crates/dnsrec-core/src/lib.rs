// # dnsrec-core
//
// Core library for the dnsrec DNS record management client.
//
// ## Architecture Overview
//
// This library holds everything that does not depend on a particular DNS
// hosting API:
// - **Record**: The generic record model callers work with
// - **DnsProvider**: The get / append / set / delete contract
// - **Transport**: Seam for the single HTTP round trip behind each operation
// - **CallContext**: Caller-supplied cancellation and deadline
// - **ProviderRegistry**: Plugin-based registry of provider factories
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Vendor wire formats live in provider crates
// 2. **Plugin-Based**: Providers are registered dynamically, no hard-coded if-else
// 3. **Library-First**: Front ends only parse configuration and print results
// 4. **One Round Trip at a Time**: No retries, caching, batching or parallelism
// 5. **Scoped Credentials**: Credentials live in provider instances, never in globals

pub mod config;
pub mod context;
pub mod error;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use context::{CallContext, CancelHandle};
pub use error::{Error, Result};
pub use record::Record;
pub use registry::ProviderRegistry;
pub use traits::{ApiRequest, ApiResponse, DnsProvider, DnsProviderFactory, HttpMethod, Transport};
