//! Test doubles for the ClouDNS contract tests
//!
//! `FakeCloudns` is an in-memory stand-in for the ClouDNS HTTP API behind the
//! `Transport` seam. It keeps zones, hands out record ids, records every
//! request and counts calls per endpoint.

#![allow(dead_code)]

use dnsrec_core::{ApiRequest, ApiResponse, Record, Result, Transport};
use dnsrec_provider_cloudns::codec::TTL_BUCKETS;
use dnsrec_provider_cloudns::{CloudnsClient, CloudnsProvider, Credentials};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const AUTH_ID: &str = "4242";
pub const PASSWORD: &str = "test-password";
pub const ZONE: &str = "example.com";
pub const BASE_URL: &str = "https://fake.cloudns.test/dns/";

#[derive(Debug, Clone)]
struct StoredRecord {
    record_type: String,
    host: String,
    record: String,
    ttl: String,
}

#[derive(Default)]
struct FakeState {
    zones: HashMap<String, BTreeMap<String, StoredRecord>>,
    next_id: u64,
    requests: Vec<ApiRequest>,
    reject_adds: Option<String>,
    forced: VecDeque<ApiResponse>,
    delay: Option<Duration>,
}

/// In-memory ClouDNS API
#[derive(Clone)]
pub struct FakeCloudns {
    state: Arc<Mutex<FakeState>>,
    list_calls: Arc<AtomicUsize>,
    add_calls: Arc<AtomicUsize>,
    mod_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
}

impl FakeCloudns {
    /// A fake API with one empty zone, [`ZONE`]
    pub fn new() -> Self {
        let fake = Self {
            state: Arc::new(Mutex::new(FakeState {
                next_id: 1000,
                ..FakeState::default()
            })),
            list_calls: Arc::new(AtomicUsize::new(0)),
            add_calls: Arc::new(AtomicUsize::new(0)),
            mod_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
        };
        fake.add_zone(ZONE);
        fake
    }

    pub fn add_zone(&self, zone: &str) {
        self.state
            .lock()
            .unwrap()
            .zones
            .entry(zone.to_string())
            .or_default();
    }

    /// Store a record under a fixed id
    pub fn seed(&self, zone: &str, id: &str, record_type: &str, host: &str, value: &str, ttl: u32) {
        self.state
            .lock()
            .unwrap()
            .zones
            .entry(zone.to_string())
            .or_default()
            .insert(
                id.to_string(),
                StoredRecord {
                    record_type: record_type.to_string(),
                    host: host.to_string(),
                    record: value.to_string(),
                    ttl: ttl.to_string(),
                },
            );
    }

    /// Reject every add call with a failure envelope carrying `message`
    pub fn reject_adds(&self, message: &str) {
        self.state.lock().unwrap().reject_adds = Some(message.to_string());
    }

    /// Answer the next call with `response` instead of simulating it
    pub fn push_response(&self, response: ApiResponse) {
        self.state.lock().unwrap().forced.push_back(response);
    }

    /// Delay every response
    pub fn set_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    /// Current zone content, sorted by id
    pub fn records(&self, zone: &str) -> Vec<Record> {
        let state = self.state.lock().unwrap();
        state
            .zones
            .get(zone)
            .map(|records| {
                records
                    .iter()
                    .map(|(id, r)| {
                        Record::new(
                            &r.record_type,
                            &r.host,
                            &r.record,
                            Duration::from_secs(r.ttl.parse().unwrap()),
                        )
                        .with_id(id)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests sent to one endpoint, e.g. `"mod-record.json"`
    pub fn requests_to(&self, endpoint: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.ends_with(endpoint))
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn mod_calls(&self) -> usize {
        self.mod_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// A client authenticated as [`AUTH_ID`] talking to this fake
    pub fn client(&self) -> CloudnsClient {
        let credentials = Credentials::account(AUTH_ID, PASSWORD).unwrap();
        CloudnsClient::new(credentials, Arc::new(self.clone())).with_base_url(BASE_URL)
    }

    pub fn provider(&self) -> CloudnsProvider {
        CloudnsProvider::new(self.client())
    }

    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if let Some(forced) = state.forced.pop_front() {
            return forced;
        }

        let has_id = request.query_value("auth-id").is_some()
            || request.query_value("sub-auth-id").is_some();
        if !has_id || request.query_value("auth-password") != Some(PASSWORD) {
            return failed("Invalid authentication, incorrect auth-id or auth-password.");
        }

        let Some(zone) = request.query_value("domain-name").map(str::to_string) else {
            return failed("Missing domain-name");
        };

        let endpoint = request.url.rsplit('/').next().unwrap_or_default().to_string();
        match endpoint.as_str() {
            "records.json" => {
                self.list_calls.fetch_add(1, Ordering::SeqCst);
                let Some(records) = state.zones.get(&zone) else {
                    return failed("Missing domain-name");
                };
                if records.is_empty() {
                    return ApiResponse::new(200, "[]");
                }
                let body: serde_json::Map<String, serde_json::Value> = records
                    .iter()
                    .map(|(id, r)| {
                        (
                            id.clone(),
                            json!({
                                "id": id,
                                "type": r.record_type,
                                "host": r.host,
                                "record": r.record,
                                "failover": "0",
                                "ttl": r.ttl,
                                "status": 1
                            }),
                        )
                    })
                    .collect();
                ApiResponse::new(200, serde_json::Value::Object(body).to_string())
            }
            "add-record.json" => {
                self.add_calls.fetch_add(1, Ordering::SeqCst);
                if let Some(message) = state.reject_adds.clone() {
                    return failed(&message);
                }
                let Some(stored) = stored_from(request, None) else {
                    return failed("Invalid TTL. Choose from the list of the values we support.");
                };
                if !state.zones.contains_key(&zone) {
                    return failed("Missing domain-name");
                }
                state.next_id += 1;
                let id = state.next_id;
                if let Some(records) = state.zones.get_mut(&zone) {
                    records.insert(id.to_string(), stored);
                }
                ApiResponse::new(
                    200,
                    json!({
                        "status": "Success",
                        "statusDescription": "The record was added successfully.",
                        "data": {"id": id}
                    })
                    .to_string(),
                )
            }
            "mod-record.json" => {
                self.mod_calls.fetch_add(1, Ordering::SeqCst);
                let id = request.query_value("record-id").unwrap_or_default().to_string();
                let Some(existing) = state.zones.get(&zone).and_then(|z| z.get(&id)).cloned()
                else {
                    return failed("Invalid record-id param.");
                };
                let Some(stored) = stored_from(request, Some(existing.record_type)) else {
                    return failed("Invalid TTL. Choose from the list of the values we support.");
                };
                if let Some(records) = state.zones.get_mut(&zone) {
                    records.insert(id, stored);
                }
                success("The record was modified successfully.")
            }
            "delete-record.json" => {
                self.delete_calls.fetch_add(1, Ordering::SeqCst);
                let id = request.query_value("record-id").unwrap_or_default();
                let removed = state
                    .zones
                    .get_mut(&zone)
                    .and_then(|records| records.remove(id));
                match removed {
                    Some(_) => success("The record was deleted successfully."),
                    None => failed("Invalid record-id param."),
                }
            }
            other => ApiResponse::new(404, format!("<html>no such endpoint {}</html>", other)),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeCloudns {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let delay = self.state.lock().unwrap().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.handle(request))
    }
}

fn stored_from(request: &ApiRequest, record_type: Option<String>) -> Option<StoredRecord> {
    let ttl = request.query_value("ttl")?;
    if !TTL_BUCKETS.iter().any(|bucket| bucket.to_string() == ttl) {
        return None;
    }
    Some(StoredRecord {
        record_type: record_type
            .or_else(|| request.query_value("record-type").map(str::to_string))?,
        host: request.query_value("host")?.to_string(),
        record: request.query_value("record")?.to_string(),
        ttl: ttl.to_string(),
    })
}

pub fn failed(message: &str) -> ApiResponse {
    ApiResponse::new(
        200,
        json!({"status": "Failed", "statusDescription": message}).to_string(),
    )
}

pub fn success(message: &str) -> ApiResponse {
    ApiResponse::new(
        200,
        json!({"status": "Success", "statusDescription": message}).to_string(),
    )
}

/// Record with the given TTL in seconds
pub fn record(record_type: &str, host: &str, value: &str, ttl_secs: u64) -> Record {
    Record::new(record_type, host, value, Duration::from_secs(ttl_secs))
}
