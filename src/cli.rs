// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(help = "Target URL or bare hostname (https:// is assumed)")]
    pub target: String,

    #[arg(
        short = 'f',
        long = "hosts",
        required = true,
        help = "File with candidate Host values, one per line"
    )]
    pub hosts: PathBuf,

    #[arg(
        short = 'c',
        long = "cookies",
        help = "Cookies applied to every request, as \"key=value; key2=value2\""
    )]
    pub cookies: Option<String>,

    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = 10,
        help = "HTTP request timeout in seconds"
    )]
    pub timeout: u64,

    #[arg(long = "log-level", default_value = "warn", help = "Log level")]
    pub log_level: String,

    #[arg(short = 'q', long = "quiet", help = "Hide the progress bar")]
    pub quiet: bool,

    #[arg(
        short = 's',
        long = "suppress-stats",
        help = "Suppress the scan summary line"
    )]
    pub suppress_stats: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short = 'o', long = "output", help = "Also write the report to a file")]
    pub output: Option<PathBuf>,

    #[arg(
        long = "format",
        default_value = "text",
        help = "File report format: text or json"
    )]
    pub format: String,
}

/// Bare hostnames get an https:// scheme; anything already http-prefixed is
/// taken as-is.
pub fn normalize_target(target: &str) -> String {
    if target.starts_with("http") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

/// One candidate Host value per line, trailing whitespace stripped, blank
/// lines dropped. Duplicates are preserved; each produces its own probe.
pub fn load_hosts(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read hosts file {}", path.display()))?;
    Ok(content
        .lines()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Parses a ";"-separated cookie string into pairs, splitting each entry on
/// its first "=" so values may themselves contain "=".
pub fn parse_cookie_string(cookies: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for entry in cookies.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once('=') {
            Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
            None => bail!("malformed cookie entry (expected key=value): {}", entry),
        }
    }
    Ok(pairs)
}
