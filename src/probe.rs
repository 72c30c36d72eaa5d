// File: probe.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

/// Outcome of a single probe: one record per requested Host value.
///
/// A record is either a captured HTTP response or a transport failure;
/// failed records carry no usable status or body and never take part in
/// baseline comparison. `interesting` starts false and is set at most once
/// by the comparator.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    host: String,
    url: String,
    status: u16,
    status_text: String,
    location: Option<String>,
    body: Vec<u8>,
    interesting: bool,
    failed: bool,
    error: Option<String>,
}

impl ProbeResponse {
    pub fn from_response(
        host: String,
        url: String,
        status: u16,
        status_text: String,
        location: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        ProbeResponse {
            host,
            url,
            status,
            status_text,
            location,
            body,
            interesting: false,
            failed: false,
            error: None,
        }
    }

    pub fn failure(host: String, url: String, error: String) -> Self {
        ProbeResponse {
            host,
            url,
            status: 0,
            status_text: String::new(),
            location: None,
            body: Vec::new(),
            interesting: false,
            failed: true,
            error: Some(error),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn interesting(&self) -> bool {
        self.interesting
    }

    pub fn mark_interesting(&mut self) {
        self.interesting = true;
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_redirect(&self) -> bool {
        !self.failed && (301..=303).contains(&self.status)
    }

    // Failed records sort after every real status code.
    pub fn sort_status(&self) -> u16 {
        if self.failed {
            u16::MAX
        } else {
            self.status
        }
    }
}

impl fmt::Display for ProbeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failed {
            let detail = self.error.as_deref().unwrap_or("unknown error");
            return write!(f, "{} :: ERROR ({})", self.host, detail);
        }
        let note = if self.interesting { "[!!] " } else { "" };
        write!(f, "{}{} :: {}", note, self.host, self.status_text)?;
        if let Some(location) = &self.location {
            write!(f, " --> {}", location)?;
        }
        Ok(())
    }
}
