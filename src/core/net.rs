// src/core/net.rs
//
// Thin HTTP seam. The pipeline only ever needs "GET this URL with these
// headers, give me status and body", so that is the whole trait; the
// ureq-backed client lives behind it and tests swap in scripted doubles.

use std::time::Duration;

use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

use crate::error::FetchError;
use crate::params::USER_AGENT;

/// One finished HTTP exchange, status included. Non-2xx is data here,
/// not an error; retry policy lives with the caller.
#[derive(Clone, Debug)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

pub trait HttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, FetchError>;
}

/// Blocking client over ureq with platform TLS roots.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .tls_config(
                TlsConfig::builder()
                    .provider(TlsProvider::NativeTls)
                    .root_certs(RootCerts::PlatformVerifier)
                    .build(),
            )
            .user_agent(USER_AGENT)
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        UreqClient { agent }
    }
}

impl HttpClient for UreqClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, FetchError> {
        let mut req = self.agent.get(url);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let resp = req.call().map_err(|e| FetchError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let mut body = resp.into_body();
        let body = body
            .read_to_string()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}
