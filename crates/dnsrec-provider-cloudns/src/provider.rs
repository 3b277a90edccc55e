//! [`DnsProvider`] implementation on top of [`CloudnsClient`]

use async_trait::async_trait;
use dnsrec_core::{CallContext, DnsProvider, Error, Record, Result};
use std::collections::HashSet;

use crate::client::CloudnsClient;

/// ClouDNS DNS provider
///
/// Bulk operations walk the input one record at a time and stop at the first
/// failure. Records handled before the failure stay applied; nothing is
/// rolled back.
#[derive(Debug, Clone)]
pub struct CloudnsProvider {
    client: CloudnsClient,
}

impl CloudnsProvider {
    pub fn new(client: CloudnsClient) -> Self {
        Self { client }
    }
}

/// Log how far a bulk operation got before failing and pass the error on
fn abort(operation: &str, zone: &str, applied: usize, total: usize, err: Error) -> Error {
    if !err.is_cancelled() {
        tracing::warn!(
            "[cloudns] {} on zone {} stopped after {}/{} record(s): {}",
            operation,
            zone,
            applied,
            total,
            err
        );
    }
    err
}

#[async_trait]
impl DnsProvider for CloudnsProvider {
    async fn get_records(&self, ctx: &CallContext, zone: &str) -> Result<Vec<Record>> {
        self.client.get_records(ctx, zone).await
    }

    async fn append_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let result = self
                .client
                .add_record(
                    ctx,
                    zone,
                    &record.record_type,
                    &record.name,
                    &record.value,
                    record.ttl,
                )
                .await;
            match result {
                Ok(record) => created.push(record),
                Err(e) => return Err(abort("append", zone, created.len(), records.len(), e)),
            }
        }
        Ok(created)
    }

    async fn set_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        // One snapshot decides update-vs-create for the whole batch
        let existing: HashSet<String> = self
            .client
            .get_records(ctx, zone)
            .await?
            .into_iter()
            .filter_map(|record| record.id)
            .collect();

        let mut results = Vec::with_capacity(records.len());
        for record in records {
            let result = match record.id.as_deref() {
                Some(id) if existing.contains(id) => {
                    tracing::debug!("[cloudns] Record {} exists, updating", id);
                    self.client
                        .update_record(ctx, zone, id, &record.name, &record.value, record.ttl)
                        .await
                }
                _ => {
                    self.client
                        .add_record(
                            ctx,
                            zone,
                            &record.record_type,
                            &record.name,
                            &record.value,
                            record.ttl,
                        )
                        .await
                }
            };
            match result {
                Ok(record) => results.push(record),
                Err(e) => return Err(abort("set", zone, results.len(), records.len(), e)),
            }
        }
        Ok(results)
    }

    async fn delete_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        if let Some(position) = records.iter().position(|record| record.id.is_none()) {
            return Err(Error::invalid_input(format!(
                "record #{} ({} {}) has no id and cannot be deleted",
                position + 1,
                records[position].record_type,
                records[position].name
            )));
        }

        let mut deleted = Vec::new();
        for (done, record) in records.iter().enumerate() {
            let Some(id) = record.id.as_deref() else {
                continue;
            };
            match self.client.delete_record(ctx, zone, id).await {
                Ok(Some(record)) => deleted.push(record),
                Ok(None) => {}
                Err(e) => return Err(abort("delete", zone, done, records.len(), e)),
            }
        }
        Ok(deleted)
    }
}
