//! Minimal embedding example for dnsrec-core
//!
//! Registers a custom in-memory provider next to ClouDNS, creates it from a
//! `ProviderConfig::Custom` entry and drives it through the same
//! `DnsProvider` contract a real provider implements.

use async_trait::async_trait;
use dnsrec_core::{
    CallContext, DnsProvider, DnsProviderFactory, Error, ProviderConfig, ProviderRegistry, Record,
    Result,
};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Custom DNS provider keeping one zone map in memory
struct InMemoryProvider {
    zones: Mutex<HashMap<String, Vec<Record>>>,
    next_id: Mutex<u64>,
}

impl InMemoryProvider {
    fn new() -> Self {
        Self {
            zones: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    fn assign_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        let id = next.to_string();
        *next += 1;
        id
    }
}

#[async_trait]
impl DnsProvider for InMemoryProvider {
    async fn get_records(&self, ctx: &CallContext, zone: &str) -> Result<Vec<Record>> {
        ctx.check()?;
        Ok(self
            .zones
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(zone)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let mut created = Vec::new();
        for record in records {
            ctx.check()?;
            let record = record.clone().with_id(self.assign_id());
            self.zones
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(zone.to_string())
                .or_default()
                .push(record.clone());
            created.push(record);
        }
        Ok(created)
    }

    async fn set_records(
        &self,
        ctx: &CallContext,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let mut results = Vec::new();
        for record in records {
            ctx.check()?;
            let existing = {
                let mut zones = self.zones.lock().unwrap_or_else(PoisonError::into_inner);
                let entries = zones.entry(zone.to_string()).or_default();
                match record.id.as_deref() {
                    Some(id) => entries.iter_mut().find(|r| r.has_id(id)).map(|slot| {
                        *slot = record.clone();
                        slot.clone()
                    }),
                    None => None,
                }
            };
            match existing {
                Some(updated) => results.push(updated),
                None => results.extend(
                    self.append_records(ctx, zone, std::slice::from_ref(record))
                        .await?,
                ),
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
        let mut deleted = Vec::new();
        for record in records {
            ctx.check()?;
            let id = record
                .id
                .as_deref()
                .ok_or_else(|| Error::invalid_input("record without id"))?;
            let mut zones = self.zones.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(entries) = zones.get_mut(zone)
                && let Some(position) = entries.iter().position(|r| r.has_id(id))
            {
                deleted.push(entries.remove(position));
            }
        }
        Ok(deleted)
    }
}

struct InMemoryFactory;

impl DnsProviderFactory for InMemoryFactory {
    fn create(&self, _config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        Ok(Box::new(InMemoryProvider::new()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let registry = ProviderRegistry::new();
    dnsrec_provider_cloudns::register(&registry);
    registry.register_provider("inmemory", Box::new(InMemoryFactory));
    tracing::info!("Registered providers: {:?}", registry.list_providers());

    let config = ProviderConfig::Custom {
        factory: "inmemory".to_string(),
        config: serde_json::json!({}),
    };
    let provider = registry.create_provider(&config)?;
    let ctx = CallContext::background();
    let zone = "example.com";

    let created = provider
        .append_records(
            &ctx,
            zone,
            &[Record::new("A", "www", "192.0.2.10", Duration::from_secs(3600))],
        )
        .await?;
    tracing::info!("Created: {:?}", created);

    let mut desired = created.clone();
    desired[0].value = "192.0.2.20".to_string();
    desired.push(Record::new("TXT", "", "v=spf1 -all", Duration::from_secs(300)));
    let set = provider.set_records(&ctx, zone, &desired).await?;
    tracing::info!("After set: {:?}", set);

    let deleted = provider.delete_records(&ctx, zone, &set).await?;
    tracing::info!("Deleted {} record(s)", deleted.len());

    let remaining = provider.get_records(&ctx, zone).await?;
    tracing::info!("Remaining records: {}", remaining.len());

    Ok(())
}
