// File: http.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::probe::ProbeResponse;
use log::debug;
use reqwest::cookie::Jar;
use reqwest::header::{HOST, LOCATION};
use reqwest::redirect::Policy;
use reqwest::Url;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            TransportError::Body(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

/// Shared HTTP client for one run.
///
/// All probes go through one reqwest client: redirects are never followed,
/// certificate validation is off (candidate Host values rarely match the
/// target's certificate), sockets bind IPv4-only, and one cookie jar is
/// shared by every request. The semaphore caps in-flight requests; since
/// every probe hits the same physical target it is effectively a global cap.
#[derive(Clone)]
pub struct Http {
    pub config_ptr: ConfigParameter,
    per_host: Arc<Semaphore>,
    jar: Arc<Jar>,
    client: reqwest::Client,
}

impl Http {
    pub fn new(config_ptr: ConfigParameter) -> Self {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .danger_accept_invalid_certs(true)
            .cookie_provider(Arc::clone(&jar))
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .build()
            .expect("Failed to build reqwest client");
        Http {
            config_ptr,
            per_host: Arc::new(Semaphore::new(config_ptr.per_host_limit())),
            jar,
            client,
        }
    }

    /// Registers `key=value` cookie pairs for the target origin. They are
    /// sent on every request of the run; Set-Cookie responses update the
    /// same jar.
    pub fn add_cookies(&self, pairs: &[(String, String)], url: &Url) {
        for (key, value) in pairs {
            self.jar.add_cookie_str(&format!("{}={}", key, value), url);
        }
    }

    /// Issues a single GET, optionally overriding the Host header.
    ///
    /// Redirect statuses (301-303) surface the Location header and skip the
    /// body; any transport problem comes back as a TransportError so one
    /// probe's failure never aborts the batch.
    pub async fn fetch(
        &self,
        url: &str,
        host_override: Option<&str>,
    ) -> Result<ProbeResponse, TransportError> {
        let _permit = self
            .per_host
            .acquire()
            .await
            .expect("connection semaphore closed");

        let host = match host_override {
            Some(host) => host.to_string(),
            None => Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| url.to_string()),
        };
        debug!("GET {} (Host: {})", url, host);

        let mut request = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config_ptr.timeout()));
        if let Some(host) = host_override {
            request = request.header(HOST, host);
        }

        let response = request.send().await?;
        let status = response.status();
        let status_text = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };

        if (301..=303).contains(&status.as_u16()) {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            return Ok(ProbeResponse::from_response(
                host,
                url.to_string(),
                status.as_u16(),
                status_text,
                location,
                Vec::new(),
            ));
        }

        let body = response.bytes().await?;
        Ok(ProbeResponse::from_response(
            host,
            url.to_string(),
            status.as_u16(),
            status_text,
            None,
            body.to_vec(),
        ))
    }
}
