// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Responds to every GET whose Host header is not matched by a more
/// specific mock; this is what the random-label default baseline sees.
pub async fn mount_catch_all(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .respond_with(template)
        .with_priority(10)
        .mount(server)
        .await;
}

/// Responds only to GETs carrying the given Host header.
pub async fn mount_for_host(server: &MockServer, host: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(header("Host", host))
        .respond_with(template)
        .with_priority(1)
        .mount(server)
        .await;
}

pub fn text_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body)
}

pub fn redirect_response(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).append_header("Location", location)
}
