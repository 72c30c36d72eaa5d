// File: report.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::probe::ProbeResponse;
use serde::Serialize;
use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub host: String,
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub location: Option<String>,
    pub interesting: bool,
    pub error: Option<String>,
}

impl From<&ProbeResponse> for ReportEntry {
    fn from(record: &ProbeResponse) -> Self {
        ReportEntry {
            host: record.host().to_string(),
            url: record.url().to_string(),
            status: record.status(),
            status_text: record.status_text().to_string(),
            location: record.location().map(str::to_string),
            interesting: record.interesting(),
            error: record.error().map(str::to_string),
        }
    }
}

pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Status ascending; failed records land after every real status.
pub fn sort_records(records: &mut [ProbeResponse]) {
    records.sort_by_key(|record| record.sort_status());
}

/// The final stdout report: one line per record, sorted, newline-joined.
pub fn render_report(records: &mut [ProbeResponse]) -> String {
    sort_records(records);
    records
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate_report(
        records: &[ProbeResponse],
        output_path: &Path,
        format: ReportFormat,
    ) -> Result<()> {
        match format {
            ReportFormat::Text => Self::generate_text_report(records, output_path),
            ReportFormat::Json => Self::generate_json_report(records, output_path),
        }
    }

    pub fn generate_text_report(records: &[ProbeResponse], output_path: &Path) -> Result<()> {
        let mut file = File::create(output_path)?;
        for record in records {
            writeln!(file, "{}", record)?;
        }
        Ok(())
    }

    pub fn generate_json_report(records: &[ProbeResponse], output_path: &Path) -> Result<()> {
        let entries: Vec<ReportEntry> = records.iter().map(ReportEntry::from).collect();
        let json = serde_json::to_string_pretty(&entries).unwrap();
        let mut file = File::create(output_path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
