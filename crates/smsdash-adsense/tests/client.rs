//! Integration tests for `AdsenseClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smsdash_adsense::{
    AdsenseClient, AdsenseError, AdsenseOptions, RevenueReporter, UNAVAILABLE_NOTE,
};
use smsdash_core::AdsenseCredentials;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT: &str = "accounts/pub-1234";
const REPORT_PATH: &str = "/v2/accounts/pub-1234/reports:generate";

fn test_client(server: &MockServer) -> AdsenseClient {
    AdsenseClient::with_endpoints(
        AdsenseCredentials {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            refresh_token: "refresh-token".to_string(),
        },
        AdsenseOptions {
            timeout_secs: 5,
            page_limit: 10,
        },
        &format!("{}/token", server.uri()),
        &server.uri(),
    )
    .expect("client construction should not fail")
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "access-123",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

async fn mount_accounts(server: &MockServer, accounts: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts))
        .mount(server)
        .await;
}

async fn mount_reports(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .and(query_param("dimensions", "URL_CHANNEL_NAME"))
        .and(query_param("orderBy", "-ESTIMATED_EARNINGS"))
        .and(query_param("limit", "10"))
        .and(query_param("startDate.day", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "headers": [
                { "name": "DOMAIN_NAME", "type": "DIMENSION" },
                { "name": "URL_CHANNEL_NAME", "type": "DIMENSION" },
                { "name": "ESTIMATED_EARNINGS", "type": "METRIC_CURRENCY" },
                { "name": "PAGE_VIEWS", "type": "METRIC_TALLY" },
                { "name": "IMPRESSIONS", "type": "METRIC_TALLY" },
                { "name": "CLICKS", "type": "METRIC_TALLY" }
            ],
            "rows": [
                { "cells": [
                    { "value": "example.com" }, { "value": "example.com/promo" },
                    { "value": "10.00" }, { "value": "100" }, { "value": "300" }, { "value": "5" }
                ] },
                { "cells": [
                    { "value": "example.com" }, { "value": "example.com/about" },
                    { "value": "4.00" }, { "value": "40" }, { "value": "90" }, { "value": "1" }
                ] }
            ]
        })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .and(query_param("dimensions", "DOMAIN_NAME"))
        .and(query_param("metrics", "ESTIMATED_EARNINGS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "headers": [
                { "name": "DOMAIN_NAME", "type": "DIMENSION" },
                { "name": "ESTIMATED_EARNINGS", "type": "METRIC_CURRENCY" }
            ],
            "rows": [
                { "cells": [{ "value": "example.com" }, { "value": "20.00" }] },
                { "cells": [{ "value": "other.org" }, { "value": "5.50" }] }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_report_combines_domain_and_page_breakdowns() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_accounts(
        &server,
        serde_json::json!({ "accounts": [{ "name": ACCOUNT, "displayName": "Main" }] }),
    )
    .await;
    mount_reports(&server).await;

    let report = test_client(&server)
        .fetch_report(date())
        .await
        .expect("report should be fetched");

    assert_eq!(report.date, date());
    assert_eq!(report.revenue, Decimal::new(2550, 2));
    assert_eq!(report.breakdown.len(), 2);
    assert_eq!(report.page_breakdown.len(), 2);
    assert_eq!(report.page_breakdown[0].page_path, "/promo");
    assert_eq!(report.page_breakdown[0].earnings, Decimal::new(10, 0));
    assert_eq!(report.summary.total_page_views, 140);
    assert_eq!(report.summary.total_clicks, 6);
    assert!(report.note.is_none());
}

#[tokio::test]
async fn fetch_report_fails_without_accounts() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_accounts(&server, serde_json::json!({})).await;

    let err = test_client(&server)
        .fetch_report(date())
        .await
        .expect_err("no accounts must fail");

    assert!(matches!(err, AdsenseError::NoAccounts));
}

#[tokio::test]
async fn rejected_refresh_token_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_report(date())
        .await
        .expect_err("bad token must fail");

    assert!(matches!(err, AdsenseError::Auth(_)));
}

#[tokio::test]
async fn report_server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_accounts(&server, serde_json::json!({ "accounts": [{ "name": ACCOUNT }] })).await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_report(date())
        .await
        .expect_err("5xx must fail");

    assert!(matches!(err, AdsenseError::Http(_)));
}

#[tokio::test]
async fn malformed_report_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_accounts(&server, serde_json::json!({ "accounts": [{ "name": ACCOUNT }] })).await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_report(date())
        .await
        .expect_err("html body must fail");

    assert!(matches!(err, AdsenseError::Deserialize { .. }));
}

#[tokio::test]
async fn reporter_passes_through_successful_report() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_accounts(&server, serde_json::json!({ "accounts": [{ "name": ACCOUNT }] })).await;
    mount_reports(&server).await;

    let report = RevenueReporter::with_client(test_client(&server))
        .report_for(date())
        .await;

    assert!(!report.is_degraded());
    assert_eq!(report.revenue, Decimal::new(2550, 2));
}

#[tokio::test]
async fn reporter_degrades_when_upstream_has_no_accounts() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_accounts(&server, serde_json::json!({ "accounts": [] })).await;

    let report = RevenueReporter::with_client(test_client(&server))
        .report_for(date())
        .await;

    assert!(report.is_degraded());
    assert_eq!(report.revenue, Decimal::ZERO);
    assert_eq!(report.note.as_deref(), Some(UNAVAILABLE_NOTE));
}
