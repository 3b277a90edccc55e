//! Command-line arguments and their translation into library types

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dnsrec_core::{ProviderConfig, Record};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// TTL used when `--ttl` is not given (in seconds)
const DEFAULT_TTL_SECS: u64 = 3600;

#[derive(Debug, Parser)]
#[command(name = "dnsrec", version, about = "Manage DNS records at a hosted DNS provider")]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Provider and process settings
#[derive(Debug, Args)]
pub struct Settings {
    /// DNS provider type
    #[arg(long, global = true, env = "DNSREC_PROVIDER_TYPE", default_value = "cloudns")]
    pub provider_type: String,

    /// ClouDNS main account auth id
    #[arg(long, global = true, env = "DNSREC_AUTH_ID")]
    pub auth_id: Option<String>,

    /// ClouDNS sub-account auth id, takes precedence over --auth-id
    #[arg(long, global = true, env = "DNSREC_SUB_AUTH_ID")]
    pub sub_auth_id: Option<String>,

    /// ClouDNS API password
    #[arg(long, global = true, env = "DNSREC_AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "DNSREC_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true, env = "DNSREC_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DNSREC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every record in a zone
    List {
        /// Zone name, e.g. example.com
        zone: String,
    },
    /// Create records
    Append {
        zone: String,
        #[command(flatten)]
        input: RecordInput,
    },
    /// Update records that exist (matched by id) and create the rest
    Set {
        zone: String,
        #[command(flatten)]
        input: RecordInput,
    },
    /// Delete records by id
    Delete {
        zone: String,
        #[command(flatten)]
        input: RecordInput,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List { .. } => "list",
            Command::Append { .. } => "append",
            Command::Set { .. } => "set",
            Command::Delete { .. } => "delete",
        }
    }
}

/// Records for a mutating command, from flags or from a JSON file
#[derive(Debug, Args)]
pub struct RecordInput {
    /// JSON file holding an array of records
    #[arg(long, conflicts_with_all = ["id", "record_type", "name", "value", "ttl"])]
    pub file: Option<PathBuf>,

    /// Record id
    #[arg(long)]
    pub id: Option<String>,

    /// Record type, e.g. A, CNAME, TXT
    #[arg(long = "type")]
    pub record_type: Option<String>,

    /// Host name within the zone ("" for the apex)
    #[arg(long)]
    pub name: Option<String>,

    /// Record data
    #[arg(long)]
    pub value: Option<String>,

    /// TTL in seconds, rounded up to a value the provider accepts
    #[arg(long)]
    pub ttl: Option<u64>,
}

impl RecordInput {
    /// Records to create or update
    pub fn records(&self) -> Result<Vec<Record>> {
        if let Some(path) = &self.file {
            return load_file(path);
        }

        let record_type = self.record_type.as_deref().context("--type is required")?;
        let name = self.name.as_deref().context("--name is required")?;
        let value = self.value.as_deref().context("--value is required")?;
        let ttl = Duration::from_secs(self.ttl.unwrap_or(DEFAULT_TTL_SECS));

        let record = Record::new(record_type, name, value, ttl);
        Ok(vec![match &self.id {
            Some(id) => record.with_id(id.as_str()),
            None => record,
        }])
    }

    /// Records to delete, only the id is needed on the command line
    pub fn records_to_delete(&self) -> Result<Vec<Record>> {
        if let Some(path) = &self.file {
            return load_file(path);
        }

        let id = self.id.as_deref().context("--id is required")?;
        let record = Record::new(
            self.record_type.as_deref().unwrap_or_default(),
            self.name.as_deref().unwrap_or_default(),
            self.value.as_deref().unwrap_or_default(),
            Duration::from_secs(self.ttl.unwrap_or_default()),
        );
        Ok(vec![record.with_id(id)])
    }
}

fn load_file(path: &Path) -> Result<Vec<Record>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))?;
    Ok(records)
}

impl Settings {
    /// Validate settings and build the provider configuration
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DNSREC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        match self.provider_type.as_str() {
            "cloudns" => {
                let auth_password = self
                    .auth_password
                    .clone()
                    .filter(|p| !p.is_empty())
                    .context(
                        "DNSREC_AUTH_PASSWORD is required. \
                        Set it via: export DNSREC_AUTH_PASSWORD=your_password",
                    )?;

                let config = ProviderConfig::Cloudns {
                    auth_id: self.auth_id.clone(),
                    sub_auth_id: self.sub_auth_id.clone(),
                    auth_password,
                    base_url: self.base_url.clone(),
                    timeout_secs: self.timeout_secs,
                };
                config.validate()?;
                Ok(config)
            }
            other => anyhow::bail!(
                "DNSREC_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: cloudns",
                other
            ),
        }
    }
}
