//! Test doubles and common utilities for contract tests
//!
//! This module provides a minimal `DnsProvider` that counts calls and can
//! be slowed down, without talking to any network.

#![allow(dead_code)]

use dnsrec_core::error::Result;
use dnsrec_core::{CallContext, DnsProvider, DnsProviderFactory, ProviderConfig, Record};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock DNS provider that tracks calls
pub struct MockDnsProvider {
    /// Call counter shared across clones
    calls: Arc<AtomicUsize>,
    /// Simulated latency of each round trip
    latency: Duration,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::new()
        }
    }

    /// Create a provider that shares counters with another
    pub fn sharing_counters_with(other: &MockDnsProvider) -> Self {
        Self {
            calls: other.calls.clone(),
            latency: other.latency,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// One simulated round trip, honouring the context
    async fn round_trip(&self, ctx: &CallContext) -> Result<()> {
        ctx.run(async {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            Ok(())
        })
        .await
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn get_records(&self, ctx: &CallContext, _zone: &str) -> Result<Vec<Record>> {
        self.round_trip(ctx).await?;
        Ok(Vec::new())
    }

    async fn append_records(
        &self,
        ctx: &CallContext,
        _zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let mut created = Vec::new();
        for (n, record) in records.iter().enumerate() {
            self.round_trip(ctx).await?;
            created.push(record.clone().with_id(n.to_string()));
        }
        Ok(created)
    }

    async fn set_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        self.append_records(ctx, zone, records).await
    }

    async fn delete_records(
        &self,
        ctx: &CallContext,
        _zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        for _ in records {
            self.round_trip(ctx).await?;
        }
        Ok(records.to_vec())
    }
}

/// Factory handing out providers that share one call counter
pub struct MockFactory {
    pub template: MockDnsProvider,
}

impl DnsProviderFactory for MockFactory {
    fn create(&self, _config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        Ok(Box::new(MockDnsProvider::sharing_counters_with(
            &self.template,
        )))
    }
}

pub fn mock_config() -> ProviderConfig {
    ProviderConfig::Custom {
        factory: "mock".to_string(),
        config: serde_json::json!({}),
    }
}

pub fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|n| Record::new("A", format!("host{}", n), "192.0.2.1", Duration::from_secs(60)))
        .collect()
}
