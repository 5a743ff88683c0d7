//! Offline tests for smsdash-db pool configuration and row conversions.
//! These tests do not require a live database connection.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use smsdash_core::{AppConfig, DailyMetric, DailyMetricSummary, Environment, SmsMessage};
use smsdash_db::{DailyMetricRow, DailyMetricSummaryRow, PoolConfig, SmsMessageRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        adsense: None,
        report_timeout_secs: 30,
        report_page_limit: 50,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn metric_row_converts_to_domain_type() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 4).expect("date");
    let row = DailyMetricRow {
        id: 3,
        date,
        sms_cost: Decimal::new(40, 0),
        revenue: Decimal::new(100, 0),
        profit: Decimal::new(60, 0),
        margin: Decimal::new(6000, 4),
        created_at: Utc::now(),
    };

    let metric = DailyMetric::from(row);
    assert_eq!(metric.id, 3);
    assert_eq!(metric.date, date);
    assert_eq!(metric.profit, Decimal::new(60, 0));
    assert_eq!(metric.margin, Decimal::new(6, 1));
}

#[test]
fn summary_row_keeps_nullable_aggregates() {
    let row = DailyMetricSummaryRow {
        id: 1,
        date: NaiveDate::from_ymd_opt(2025, 3, 5).expect("date"),
        revenue: Decimal::ZERO,
        sms_cost: Decimal::ZERO,
        profit: Decimal::ZERO,
        margin: Decimal::ZERO,
        created_at: Utc::now(),
        message_count: 0,
        total_messages_sent: None,
        avg_click_rate: None,
    };

    let summary = DailyMetricSummary::from(row);
    assert_eq!(summary.message_count, 0);
    assert!(summary.total_messages_sent.is_none());
    assert!(summary.avg_click_rate.is_none());
}

#[test]
fn message_row_converts_to_domain_type() {
    let row = SmsMessageRow {
        id: 11,
        daily_id: 3,
        content: "Flash sale".to_string(),
        link_url: Some("https://example.com/sale".to_string()),
        click_rate: Some(Decimal::new(32, 3)),
        num_sent: 2_500,
        est_cost: Decimal::new(1875, 2),
        created_at: Utc::now(),
    };

    let message = SmsMessage::from(row);
    assert_eq!(message.daily_id, 3);
    assert_eq!(message.link_url.as_deref(), Some("https://example.com/sale"));
    assert_eq!(message.num_sent, 2_500);
}
