// File: baseline.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::http::Http;
use crate::probe::ProbeResponse;
use log::{info, warn};
use rand::Rng;

const RANDOM_LABEL_LEN: usize = 20;

/// The two reference responses candidates are compared against.
///
/// Either slot may be empty: SNI-strict targets reject the random-host
/// probe before HTTP is reached, and the direct hostname may not resolve
/// at all. An empty slot simply matches nothing, which errs toward
/// flagging more candidates rather than fewer.
#[derive(Debug, Clone)]
pub struct BaselineSet {
    default: Option<ProbeResponse>,
    direct: Option<ProbeResponse>,
}

impl BaselineSet {
    pub fn empty() -> Self {
        BaselineSet {
            default: None,
            direct: None,
        }
    }

    pub fn new(default: Option<ProbeResponse>, direct: Option<ProbeResponse>) -> Self {
        BaselineSet { default, direct }
    }

    /// Fetches both baselines, once per run, before any candidate probe.
    ///
    /// The default baseline probes the target URL under a random unrouted
    /// hostname (what the server does with an unmatched vhost); the direct
    /// baseline contacts the target's own hostname without an override.
    pub async fn resolve(http: &Http, url: &str, real_host: &str) -> Self {
        let label = random_label(RANDOM_LABEL_LEN);
        let default = match http.fetch(url, Some(&label)).await {
            Ok(response) => {
                info!("default baseline ({}): {}", label, response.status_text());
                Some(response)
            }
            Err(error) => {
                warn!("default baseline unavailable: {}", error);
                None
            }
        };

        let direct_url = format!("https://{}", real_host);
        let direct = match http.fetch(&direct_url, None).await {
            Ok(response) => {
                info!("direct baseline ({}): {}", real_host, response.status_text());
                Some(response)
            }
            Err(error) => {
                warn!("direct baseline unavailable: {}", error);
                None
            }
        };

        BaselineSet { default, direct }
    }

    pub fn default_response(&self) -> Option<&ProbeResponse> {
        self.default.as_ref()
    }

    pub fn direct_response(&self) -> Option<&ProbeResponse> {
        self.direct.as_ref()
    }
}

/// A hostname label that no real vhost will match, with overwhelming
/// probability.
pub fn random_label(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect()
}
