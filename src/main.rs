// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use log::{info, LevelFilter};
use reqwest::Url;
use simple_logger::SimpleLogger;
use std::str::FromStr;
use std::sync::Arc;

use rvhost::cli::{load_hosts, normalize_target, parse_cookie_string, Cli};
use rvhost::config::ConfigParameter;
use rvhost::getstate::GetState;
use rvhost::report::{render_report, ReportFormat, ReportGenerator};
use rvhost::scanner::Scanner;

fn get_human_readable_time(time: u64) -> chrono::NaiveDateTime {
    chrono::DateTime::from_timestamp_millis(time as i64)
        .unwrap_or_default()
        .naive_utc()
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let level = LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Warn);
    SimpleLogger::new().with_level(level).init().ok();

    if let Err(error) = run(cli).await {
        eprintln!("{} {}", "✗".red().bold(), error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let target = normalize_target(&cli.target);
    let url =
        Url::parse(&target).with_context(|| format!("invalid target URL: {}", target))?;
    if url.host_str().is_none() {
        bail!("target URL has no host: {}", target);
    }

    let hosts = load_hosts(&cli.hosts)?;
    if hosts.is_empty() {
        bail!(
            "hosts file {} contains no candidate hosts",
            cli.hosts.display()
        );
    }
    let cookies = match &cli.cookies {
        Some(cookies) => parse_cookie_string(cookies)?,
        None => Vec::new(),
    };
    let format = ReportFormat::from_name(&cli.format)
        .with_context(|| format!("unknown report format: {}", cli.format))?;

    let mut config = ConfigParameter::new();
    config.set_timeout(cli.timeout);
    config.set_quiet(cli.quiet);
    config.set_suppress_stats(cli.suppress_stats);

    let state = Arc::new(GetState::new());
    let scanner = Scanner::new(Arc::clone(&state), config);
    scanner.http().add_cookies(&cookies, &url);

    info!("probing {} with {} candidate hosts", url, hosts.len());
    state.set_start_time(now_millis());
    let mut records = scanner.run(&url, hosts).await;
    state.set_end_time(now_millis());

    println!("{}", render_report(&mut records));

    if let Some(path) = &cli.output {
        ReportGenerator::generate_report(&records, path, format)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    if !config.suppress_stats() {
        println!();
        println!(
            "{} requests. Started at {} / Ended at {}. {} ms. Successful: {}. Failed: {}.",
            state.total_requests(),
            get_human_readable_time(state.start_time()),
            get_human_readable_time(state.end_time()),
            state.end_time() - state.start_time(),
            state.successful_requests(),
            state.failed_requests()
        );
    }

    Ok(())
}
