// File: scanner.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::baseline::BaselineSet;
use crate::comparator;
use crate::config::ConfigParameter;
use crate::getstate::GetState;
use crate::http::Http;
use crate::probe::ProbeResponse;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use log::info;
use reqwest::Url;
use std::fmt::Write;
use std::sync::Arc;

pub struct Scanner {
    http: Arc<Http>,
    state_ptr: Arc<GetState>,
    config_ptr: ConfigParameter,
}

impl Scanner {
    pub fn new(state_ptr: Arc<GetState>, config_ptr: ConfigParameter) -> Self {
        Scanner {
            http: Arc::new(Http::new(config_ptr)),
            state_ptr,
            config_ptr,
        }
    }

    pub fn http(&self) -> &Http {
        &self.http
    }

    /// Runs a full scan: baselines first, then every candidate host, then
    /// annotation. Output order is unspecified; the reporter sorts.
    pub async fn run(&self, url: &Url, hosts: Vec<String>) -> Vec<ProbeResponse> {
        self.state_ptr.set_total_requests(hosts.len() as u64);

        let real_host = url.host_str().unwrap_or_default();
        let baselines = BaselineSet::resolve(&self.http, url.as_str(), real_host).await;

        let mut records = self.probe_all(url.as_str(), hosts).await;
        for record in &mut records {
            comparator::annotate(record, &baselines);
        }

        let flagged = records.iter().filter(|r| r.interesting()).count();
        info!("{} of {} candidates flagged", flagged, records.len());

        records
    }

    /// Fans out one probe per candidate host. Every host in the input gets
    /// exactly one record, duplicates included; a transport failure becomes
    /// a failed record and never cancels sibling probes. The client's
    /// connection semaphore is the only concurrency ceiling.
    pub async fn probe_all(&self, url: &str, hosts: Vec<String>) -> Vec<ProbeResponse> {
        let pb = if self.config_ptr.quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(hosts.len() as u64)
        };
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
            })
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );

        let mut futures = FuturesUnordered::new();
        for host in hosts {
            let http = Arc::clone(&self.http);
            let state_ptr = Arc::clone(&self.state_ptr);
            let url = url.to_string();
            futures.push(tokio::spawn(async move {
                match http.fetch(&url, Some(&host)).await {
                    Ok(response) => {
                        state_ptr.add_success();
                        response
                    }
                    Err(error) => {
                        state_ptr.add_failure();
                        ProbeResponse::failure(host, url, error.to_string())
                    }
                }
            }));
        }

        let mut results = Vec::new();
        while let Some(task) = futures.next().await {
            if let Ok(record) = task {
                results.push(record);
                pb.inc(1);
            }
        }
        pb.finish();
        results
    }
}
