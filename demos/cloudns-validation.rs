// # ClouDNS Provider Real Environment Validation Tool
//
// Exercises the ClouDNS provider against the real ClouDNS API using a
// throwaway TXT record.
//
// ## Usage
//
// ```bash
// # Read-only mode (default - safe)
// CLOUDNS_AUTH_ID=1234 \
// CLOUDNS_AUTH_PASSWORD=your_password \
// DNSREC_ZONE=test.example.com \
// cargo run -p dnsrec-demos --bin cloudns_validation
//
// # Live mode (creates, updates and deletes a record!)
// DNSREC_MODE=live \
// CLOUDNS_AUTH_ID=1234 \
// CLOUDNS_AUTH_PASSWORD=your_password \
// DNSREC_ZONE=test.example.com \
// cargo run -p dnsrec-demos --bin cloudns_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `CLOUDNS_AUTH_ID` or `CLOUDNS_SUB_AUTH_ID`: ClouDNS API identity
// - `CLOUDNS_AUTH_PASSWORD`: ClouDNS API password
// - `DNSREC_ZONE`: Zone to test (e.g., "example.com")
//
// Optional:
// - `DNSREC_RECORD_NAME`: Host of the test record (default: "dnsrec-validation")
// - `DNSREC_MODE`: "read-only" or "live" (default: read-only)

use dnsrec_core::{CallContext, DnsProvider, ProviderConfig, ProviderRegistry, Record};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("=== ClouDNS Provider Real Environment Validation ===");

    let auth_id = env::var("CLOUDNS_AUTH_ID").ok();
    let sub_auth_id = env::var("CLOUDNS_SUB_AUTH_ID").ok();
    let auth_password = env::var("CLOUDNS_AUTH_PASSWORD").unwrap_or_else(|_| {
        tracing::error!("CLOUDNS_AUTH_PASSWORD environment variable is required");
        std::process::exit(1);
    });
    let zone = env::var("DNSREC_ZONE").unwrap_or_else(|_| {
        tracing::error!("DNSREC_ZONE environment variable is required");
        std::process::exit(1);
    });
    let record_name =
        env::var("DNSREC_RECORD_NAME").unwrap_or_else(|_| "dnsrec-validation".to_string());
    let live = env::var("DNSREC_MODE").is_ok_and(|mode| mode.eq_ignore_ascii_case("live"));

    if live {
        tracing::warn!("Running in LIVE mode - will make actual DNS changes!");
    } else {
        tracing::warn!("Running in READ-ONLY mode - no changes will be made");
    }

    tracing::info!("Configuration:");
    tracing::info!("  Zone: {}", zone);
    tracing::info!("  Record: {}", record_name);

    tracing::info!("--- Step 1: Creating ClouDNS Provider ---");
    let registry = ProviderRegistry::new();
    dnsrec_provider_cloudns::register(&registry);

    let config = ProviderConfig::cloudns(auth_id, sub_auth_id, auth_password);
    let provider = registry.create_provider(&config)?;
    tracing::info!("Provider created (password not shown)");

    let ctx = CallContext::background().with_timeout(Duration::from_secs(120));

    tracing::info!("--- Step 2: Listing Zone ---");
    let records = provider.get_records(&ctx, &zone).await?;
    tracing::info!("✓ {} record(s) in {}", records.len(), zone);

    if !live {
        tracing::info!("=== READ-ONLY COMPLETE ===");
        tracing::info!("To exercise create/update/delete, set DNSREC_MODE=live");
        return Ok(());
    }

    tracing::info!("--- Step 3: Creating Test Record ---");
    let desired = Record::new("TXT", &record_name, "dnsrec validation", Duration::from_secs(100));
    let created = provider
        .append_records(&ctx, &zone, std::slice::from_ref(&desired))
        .await?;
    let created = created.into_iter().next().ok_or("append returned no record")?;
    tracing::info!("✓ Created id {:?} with ttl {:?}", created.id, created.ttl);

    tracing::info!("--- Step 4: Updating Test Record ---");
    let mut changed = created.clone();
    changed.value = "dnsrec validation (updated)".to_string();
    changed.ttl = Duration::from_secs(1200);
    let updated = provider.set_records(&ctx, &zone, &[changed]).await?;
    tracing::info!("✓ Updated record: {:?}", updated);
    if updated.first().and_then(|r| r.id.as_deref()) != created.id.as_deref() {
        tracing::warn!("⚠ Update changed the record id");
    }

    tracing::info!("--- Step 5: Deleting Test Record ---");
    let deleted = provider.delete_records(&ctx, &zone, &updated).await?;
    tracing::info!("✓ Deleted {} record(s)", deleted.len());

    tracing::info!("--- Step 6: Testing Idempotent Delete ---");
    let again = provider.delete_records(&ctx, &zone, &updated).await?;
    if again.is_empty() {
        tracing::info!("✓ Second delete was a no-op");
    } else {
        tracing::warn!("⚠ Second delete removed {} record(s)", again.len());
    }

    tracing::info!("=== LIVE MODE COMPLETE ===");
    Ok(())
}
