// # DNS Provider Trait
//
// Defines the record-management contract that a calling framework expects
// from every provider: get, append, set and delete.
//
// ## Implementations
//
// - ClouDNS: `dnsrec-provider-cloudns` crate
//
// ## Usage
//
// ```rust,ignore
// use dnsrec_core::{CallContext, DnsProvider, Record};
// use std::time::Duration;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//     let ctx = CallContext::background();
//
//     let created = provider
//         .append_records(&ctx, "example.com", &[Record::new(
//             "A",
//             "www",
//             "192.0.2.10",
//             Duration::from_secs(3600),
//         )])
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::context::CallContext;
use crate::record::Record;

/// Trait for DNS provider implementations
///
/// Exactly the four operations of the record-management contract. Every
/// method takes the zone being managed (e.g. `"example.com"`) and a
/// [`CallContext`] that can cancel the work.
///
/// # Sequencing
///
/// Multi-record operations handle one record at a time, in input order, with
/// one provider round trip completing before the next starts. There is no
/// batching and no parallelism.
///
/// # Partial Application
///
/// Bulk operations are **not transactional**. When a record fails, the call
/// returns that first error immediately and records processed before it stay
/// applied at the provider. Callers that need to know the resulting zone
/// state after an error must read it again with
/// [`DnsProvider::get_records`].
///
/// # Thread Safety
///
/// Implementations hold no mutable state besides their credentials and are
/// safe to share between tasks. Concurrent calls on the *same* zone race
/// against each other at the provider; nothing here locks a zone.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every record in the zone
    ///
    /// The order of the returned records is unspecified.
    async fn get_records(&self, ctx: &CallContext, zone: &str) -> crate::Result<Vec<Record>>;

    /// Create each record in the zone
    ///
    /// Input ids are ignored. Returns the created records, in input order,
    /// carrying the provider-assigned ids and the TTL actually stored.
    async fn append_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> crate::Result<Vec<Record>>;

    /// Update records whose id exists in the zone, create the rest
    ///
    /// Returns the resulting records in input order.
    async fn set_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> crate::Result<Vec<Record>>;

    /// Delete records by id
    ///
    /// Deleting a record that does not exist is not an error. Returns the
    /// records that were actually deleted, as they were before deletion.
    async fn delete_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> crate::Result<Vec<Record>>;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider
    ///
    /// # Returns
    ///
    /// A boxed DnsProvider trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> crate::Result<Box<dyn DnsProvider>>;
}
