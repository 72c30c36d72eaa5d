// File: http_integration_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

mod common;

use common::{mount_catch_all, mount_for_host, setup_mock_server, text_response};
use reqwest::Url;
use rvhost::config::ConfigParameter;
use rvhost::http::{Http, TransportError};
use serial_test::serial;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn test_http(timeout: u64) -> Http {
    let mut config = ConfigParameter::new();
    config.set_timeout(timeout);
    Http::new(config)
}

#[tokio::test]
#[serial]
async fn test_basic_fetch() {
    let mock_server = setup_mock_server().await;
    mount_catch_all(&mock_server, text_response(200, "Hello, World!")).await;

    let http = test_http(10);
    let record = http.fetch(&mock_server.uri(), None).await.unwrap();

    assert_eq!(record.status(), 200);
    assert_eq!(record.status_text(), "200 OK");
    assert_eq!(record.body(), b"Hello, World!");
    assert_eq!(record.host(), "127.0.0.1");
    assert!(!record.failed());
    assert!(!record.interesting());
}

#[tokio::test]
#[serial]
async fn test_host_override_is_sent() {
    let mock_server = setup_mock_server().await;
    mount_for_host(&mock_server, "evil.example.com", text_response(200, "vhost")).await;
    mount_catch_all(&mock_server, text_response(404, "default")).await;

    let http = test_http(10);
    let record = http
        .fetch(&mock_server.uri(), Some("evil.example.com"))
        .await
        .unwrap();

    assert_eq!(record.status(), 200);
    assert_eq!(record.body(), b"vhost");
    assert_eq!(record.host(), "evil.example.com");
}

#[tokio::test]
#[serial]
async fn test_redirects_are_not_followed() {
    let mock_server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .append_header("Location", "https://example.com/login")
                .set_body_string("<a>moved</a>"),
        )
        .mount(&mock_server)
        .await;

    let http = test_http(10);
    let record = http.fetch(&mock_server.uri(), None).await.unwrap();

    assert_eq!(record.status(), 301);
    assert_eq!(record.status_text(), "301 Moved Permanently");
    assert_eq!(record.location(), Some("https://example.com/login"));
    assert!(record.is_redirect());
    // Redirect bodies are neither kept nor compared.
    assert!(record.body().is_empty());
}

#[tokio::test]
#[serial]
async fn test_307_keeps_its_body() {
    let mock_server = setup_mock_server().await;
    mount_catch_all(
        &mock_server,
        ResponseTemplate::new(307)
            .append_header("Location", "/elsewhere")
            .set_body_string("temporary"),
    )
    .await;

    let http = test_http(10);
    let record = http.fetch(&mock_server.uri(), None).await.unwrap();

    assert_eq!(record.status(), 307);
    assert!(!record.is_redirect());
    assert_eq!(record.location(), None);
    assert_eq!(record.body(), b"temporary");
}

#[tokio::test]
#[serial]
async fn test_status_text_includes_reason() {
    let mock_server = setup_mock_server().await;
    mount_catch_all(&mock_server, text_response(404, "nope")).await;

    let http = test_http(10);
    let record = http.fetch(&mock_server.uri(), None).await.unwrap();

    assert_eq!(record.status_text(), "404 Not Found");
}

#[tokio::test]
#[serial]
async fn test_timeout_is_a_transport_error() {
    let mock_server = setup_mock_server().await;
    mount_catch_all(
        &mock_server,
        ResponseTemplate::new(200).set_delay(Duration::from_secs(5)),
    )
    .await;

    let http = test_http(1);
    let error = http.fetch(&mock_server.uri(), None).await.unwrap_err();

    assert!(matches!(error, TransportError::Timeout));
}

#[tokio::test]
#[serial]
async fn test_connection_refused_is_a_transport_error() {
    // Bind to grab a free port, then drop it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let http = test_http(2);
    let result = http.fetch(&format!("http://127.0.0.1:{}/", port), None).await;

    assert!(result.is_err());
}

#[tokio::test]
#[serial]
async fn test_cookies_are_applied_to_requests() {
    let mock_server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(header("Cookie", "session=abc123"))
        .respond_with(text_response(200, "with cookie"))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    mount_catch_all(&mock_server, text_response(403, "no cookie")).await;

    let http = test_http(10);
    let url = Url::parse(&mock_server.uri()).unwrap();
    http.add_cookies(&[("session".to_string(), "abc123".to_string())], &url);

    let record = http.fetch(&mock_server.uri(), None).await.unwrap();
    assert_eq!(record.status(), 200);
    assert_eq!(record.body(), b"with cookie");
}

#[tokio::test]
#[serial]
async fn test_set_cookie_updates_the_shared_jar() {
    let mock_server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).append_header("Set-Cookie", "trace=xyz; Path=/"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(header("Cookie", "trace=xyz"))
        .respond_with(text_response(200, "cookie came back"))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    mount_catch_all(&mock_server, text_response(403, "no cookie")).await;

    let http = test_http(10);
    http.fetch(&format!("{}/login", mock_server.uri()), None)
        .await
        .unwrap();
    let record = http
        .fetch(&format!("{}/check", mock_server.uri()), None)
        .await
        .unwrap();

    assert_eq!(record.status(), 200);
}
