// src/fetch.rs
//
// The one remote read: GET the submissions endpoint, retry a short list
// of gateway-ish statuses with fixed backoff, pull `results` out of the
// body and normalize it. Everything downstream works on the table.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::core::net::HttpClient;
use crate::data::RecordTable;
use crate::error::FetchError;
use crate::normalize::normalize_records;
use crate::params::{REQUEST_TIMEOUT, RETRY_BACKOFF, RETRY_STATUSES};

/// Tunables for one fetch. Defaults mirror the production endpoint;
/// tests shrink the backoff to keep runs instant.
#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub timeout: Duration,
    /// Statuses that earn another attempt.
    pub retry_statuses: Vec<u16>,
    /// Sleep before retry N; its length caps the retry count.
    pub backoff: Vec<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            timeout: REQUEST_TIMEOUT,
            retry_statuses: RETRY_STATUSES.to_vec(),
            backoff: RETRY_BACKOFF.to_vec(),
        }
    }
}

/// Cache key for one fetch: where we asked, and a fingerprint of the
/// credential we asked with. The token itself never leaves the config.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub endpoint: String,
    pub credential_fp: u64,
}

impl FetchKey {
    pub fn new(endpoint: &str, token: &str) -> Self {
        let mut h = DefaultHasher::new();
        token.hash(&mut h);
        FetchKey {
            endpoint: endpoint.to_string(),
            credential_fp: h.finish(),
        }
    }
}

/// Fetch and normalize one batch of submissions.
///
/// A reply whose status is in `retry_statuses` is retried after the
/// next backoff step until the schedule runs out; any other non-2xx
/// fails immediately. Transport errors are not retried. A body without
/// a `results` array yields an empty table.
pub fn fetch_records(
    client: &dyn HttpClient,
    url: &str,
    token: &str,
    opts: &FetchOptions,
) -> Result<RecordTable, FetchError> {
    let auth = format!("Token {token}");
    let headers = [("Authorization", auth.as_str())];

    let mut attempt = 0;
    let reply = loop {
        let reply = client.get(url, &headers)?;
        if reply.status / 100 == 2 {
            break reply;
        }
        if opts.retry_statuses.contains(&reply.status) && attempt < opts.backoff.len() {
            log::warn!(
                "got {} from {}, retry {}/{}",
                reply.status,
                url,
                attempt + 1,
                opts.backoff.len()
            );
            thread::sleep(opts.backoff[attempt]);
            attempt += 1;
            continue;
        }
        return Err(FetchError::Status(reply.status));
    };

    let body: Value = serde_json::from_str(&reply.body)?;
    let records = match body.get("results") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    let table = normalize_records(records);
    log::info!("fetched {} submissions from {}", table.len(), url);
    Ok(table)
}
