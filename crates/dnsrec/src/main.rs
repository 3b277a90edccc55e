// # dnsrec - DNS record command-line client
//
// Thin front end over `dnsrec-core` and the provider crates. It only:
// 1. Reads settings from flags and environment variables
// 2. Initializes logging and the runtime
// 3. Registers providers and creates the configured one
// 4. Runs one operation and prints the resulting records as JSON
//
// ## Configuration
//
// Every setting can be given as a flag or an environment variable:
// - `DNSREC_PROVIDER_TYPE`: Provider type (cloudns)
// - `DNSREC_AUTH_ID`: ClouDNS main account auth id
// - `DNSREC_SUB_AUTH_ID`: ClouDNS sub-account auth id
// - `DNSREC_AUTH_PASSWORD`: ClouDNS API password
// - `DNSREC_BASE_URL`: API base URL (optional)
// - `DNSREC_TIMEOUT_SECS`: Per-request HTTP timeout (optional)
// - `DNSREC_LOG_LEVEL`: Log level (default info)
//
// ## Example
//
// ```bash
// export DNSREC_AUTH_ID=1234
// export DNSREC_AUTH_PASSWORD=your_password
//
// dnsrec list example.com
// dnsrec set example.com --id 1 --type A --name www --value 192.0.2.10 --ttl 1200
// dnsrec delete example.com --file stale-records.json
// ```

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use dnsrec_core::{CallContext, DnsProvider, ProviderRegistry, Record};
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum DnsrecExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration, usage or startup error
    ConfigError = 1,
    /// The operation itself failed
    OperationError = 2,
}

impl From<DnsrecExitCode> for ExitCode {
    fn from(code: DnsrecExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also end up here
            let _ = e.print();
            return if e.use_stderr() {
                DnsrecExitCode::ConfigError.into()
            } else {
                DnsrecExitCode::Success.into()
            };
        }
    };

    let provider_config = match cli.settings.provider_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DnsrecExitCode::ConfigError.into();
        }
    };

    let log_level = match cli.settings.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DnsrecExitCode::ConfigError.into();
    }

    let registry = ProviderRegistry::new();

    #[cfg(feature = "cloudns")]
    dnsrec_provider_cloudns::register(&registry);

    let provider = match registry.create_provider(&provider_config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to create provider: {}", e);
            return DnsrecExitCode::ConfigError.into();
        }
    };

    // Read the record input before touching the network
    let records = match records_for(&cli.command) {
        Ok(records) => records,
        Err(e) => {
            error!("Invalid record input: {:#}", e);
            return DnsrecExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DnsrecExitCode::OperationError.into();
        }
    };

    let result = rt.block_on(run(provider.as_ref(), &cli.command, &records));

    match result.and_then(|records| print_records(&records)) {
        Ok(()) => DnsrecExitCode::Success.into(),
        Err(e) => {
            error!("{} failed: {:#}", cli.command.name(), e);
            DnsrecExitCode::OperationError.into()
        }
    }
}

fn records_for(command: &Command) -> Result<Vec<Record>> {
    match command {
        Command::List { .. } => Ok(Vec::new()),
        Command::Append { input, .. } | Command::Set { input, .. } => input.records(),
        Command::Delete { input, .. } => input.records_to_delete(),
    }
}

/// Run one operation, cancelling it on Ctrl-C
async fn run(
    provider: &dyn DnsProvider,
    command: &Command,
    records: &[Record],
) -> Result<Vec<Record>> {
    let (ctx, cancel) = CallContext::cancellable();

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling the in-flight request");
            cancel.cancel();
        }
    });

    let result = match command {
        Command::List { zone } => {
            info!("Listing records in {}", zone);
            provider.get_records(&ctx, zone).await
        }
        Command::Append { zone, .. } => {
            info!("Appending {} record(s) to {}", records.len(), zone);
            provider.append_records(&ctx, zone, records).await
        }
        Command::Set { zone, .. } => {
            info!("Setting {} record(s) in {}", records.len(), zone);
            provider.set_records(&ctx, zone, records).await
        }
        Command::Delete { zone, .. } => {
            info!("Deleting {} record(s) from {}", records.len(), zone);
            provider.delete_records(&ctx, zone, records).await
        }
    };

    interrupt.abort();
    Ok(result?)
}

fn print_records(records: &[Record]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}
