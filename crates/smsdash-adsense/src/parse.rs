//! Report-to-domain conversion.
//!
//! Cells are located by header name rather than position, so reordering the
//! requested dimensions or metrics cannot silently shift values. Numeric cells
//! that fail to parse count as zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use smsdash_core::{DomainEarnings, RevenueReportRow};

use crate::error::AdsenseError;
use crate::types::{ReportResult, ReportRow};

pub(crate) const DOMAIN_NAME: &str = "DOMAIN_NAME";
pub(crate) const URL_CHANNEL_NAME: &str = "URL_CHANNEL_NAME";
pub(crate) const ESTIMATED_EARNINGS: &str = "ESTIMATED_EARNINGS";
pub(crate) const PAGE_VIEWS: &str = "PAGE_VIEWS";
pub(crate) const IMPRESSIONS: &str = "IMPRESSIONS";
pub(crate) const CLICKS: &str = "CLICKS";

const UNKNOWN_DOMAIN: &str = "Unknown";

/// Per-domain earnings from a `DOMAIN_NAME` x `ESTIMATED_EARNINGS` report.
///
/// # Errors
///
/// Returns [`AdsenseError::MissingColumn`] if either column is absent.
pub fn parse_domain_breakdown(report: &ReportResult) -> Result<Vec<DomainEarnings>, AdsenseError> {
    let domain_col = column(report, DOMAIN_NAME)?;
    let earnings_col = column(report, ESTIMATED_EARNINGS)?;

    Ok(report
        .rows
        .iter()
        .map(|row| DomainEarnings {
            domain: text_cell(row, domain_col)
                .filter(|d| !d.is_empty())
                .unwrap_or(UNKNOWN_DOMAIN)
                .to_owned(),
            earnings: decimal_cell(row, earnings_col),
        })
        .collect())
}

/// Page rows from a `DOMAIN_NAME` x `URL_CHANNEL_NAME` report, in report
/// order. Rows without a URL channel are skipped.
///
/// # Errors
///
/// Returns [`AdsenseError::MissingColumn`] if the channel or earnings column
/// is absent. Traffic columns are optional and read as zero when missing.
pub fn parse_page_breakdown(
    report: &ReportResult,
) -> Result<Vec<RevenueReportRow>, AdsenseError> {
    let channel_col = column(report, URL_CHANNEL_NAME)?;
    let earnings_col = column(report, ESTIMATED_EARNINGS)?;
    let domain_col = column(report, DOMAIN_NAME).ok();
    let views_col = column(report, PAGE_VIEWS).ok();
    let impressions_col = column(report, IMPRESSIONS).ok();
    let clicks_col = column(report, CLICKS).ok();

    let rows = report
        .rows
        .iter()
        .filter_map(|row| {
            let channel = text_cell(row, channel_col).filter(|c| !c.is_empty())?;
            let (channel_host, page_path) = split_url_channel(channel);
            let domain = domain_col
                .and_then(|col| text_cell(row, col))
                .filter(|d| !d.is_empty())
                .map_or(channel_host, str::to_owned);

            Some(RevenueReportRow {
                domain,
                page_path,
                earnings: decimal_cell(row, earnings_col),
                page_views: views_col.map_or(0, |col| int_cell(row, col)),
                impressions: impressions_col.map_or(0, |col| int_cell(row, col)),
                clicks: clicks_col.map_or(0, |col| int_cell(row, col)),
            })
        })
        .collect();

    Ok(rows)
}

/// Split a URL channel such as `example.com/blog/post` into host and path.
///
/// A leading scheme is tolerated. A channel with no path maps to `/`.
#[must_use]
pub fn split_url_channel(channel: &str) -> (String, String) {
    let trimmed = channel.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);

    match without_scheme.find('/') {
        Some(idx) => (
            without_scheme[..idx].to_lowercase(),
            without_scheme[idx..].to_owned(),
        ),
        None => (without_scheme.to_lowercase(), "/".to_owned()),
    }
}

fn column(report: &ReportResult, name: &'static str) -> Result<usize, AdsenseError> {
    report
        .headers
        .iter()
        .position(|h| h.name == name)
        .ok_or(AdsenseError::MissingColumn(name))
}

fn text_cell(row: &ReportRow, col: usize) -> Option<&str> {
    row.cells.get(col)?.value.as_deref().map(str::trim)
}

fn decimal_cell(row: &ReportRow, col: usize) -> Decimal {
    text_cell(row, col)
        .and_then(|v| Decimal::from_str(v).ok())
        .unwrap_or(Decimal::ZERO)
}

fn int_cell(row: &ReportRow, col: usize) -> i64 {
    text_cell(row, col)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(value: serde_json::Value) -> ReportResult {
        serde_json::from_value(value).expect("valid report json")
    }

    #[test]
    fn split_url_channel_handles_paths_and_bare_hosts() {
        assert_eq!(
            split_url_channel("Example.com/Blog/Post"),
            ("example.com".to_owned(), "/Blog/Post".to_owned())
        );
        assert_eq!(
            split_url_channel("example.com"),
            ("example.com".to_owned(), "/".to_owned())
        );
        assert_eq!(
            split_url_channel("https://news.example.com/a?x=1"),
            ("news.example.com".to_owned(), "/a?x=1".to_owned())
        );
    }

    #[test]
    fn domain_breakdown_reads_cells_by_header_name() {
        let parsed = parse_domain_breakdown(&report(serde_json::json!({
            "headers": [
                { "name": "ESTIMATED_EARNINGS", "type": "METRIC_CURRENCY" },
                { "name": "DOMAIN_NAME", "type": "DIMENSION" }
            ],
            "rows": [
                { "cells": [{ "value": "12.34" }, { "value": "example.com" }] },
                { "cells": [{ "value": "n/a" }, { "value": "" }] }
            ]
        })))
        .expect("parse");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].domain, "example.com");
        assert_eq!(parsed[0].earnings, Decimal::new(1234, 2));
        assert_eq!(parsed[1].domain, "Unknown");
        assert_eq!(parsed[1].earnings, Decimal::ZERO);
    }

    #[test]
    fn domain_breakdown_requires_earnings_column() {
        let err = parse_domain_breakdown(&report(serde_json::json!({
            "headers": [{ "name": "DOMAIN_NAME" }],
            "rows": []
        })))
        .unwrap_err();
        assert!(matches!(err, AdsenseError::MissingColumn("ESTIMATED_EARNINGS")));
    }

    #[test]
    fn page_breakdown_keeps_report_order_and_splits_channels() {
        let parsed = parse_page_breakdown(&report(serde_json::json!({
            "headers": [
                { "name": "DOMAIN_NAME" },
                { "name": "URL_CHANNEL_NAME" },
                { "name": "ESTIMATED_EARNINGS" },
                { "name": "PAGE_VIEWS" },
                { "name": "IMPRESSIONS" },
                { "name": "CLICKS" }
            ],
            "rows": [
                { "cells": [
                    { "value": "example.com" }, { "value": "example.com/promo" },
                    { "value": "10.00" }, { "value": "100" }, { "value": "250" }, { "value": "5" }
                ] },
                { "cells": [
                    { "value": "" }, { "value": "blog.example.com" },
                    { "value": "2.5" }, { "value": "oops" }, { "value": "8" }, { "value": "0" }
                ] },
                { "cells": [
                    { "value": "example.com" }, { "value": "" },
                    { "value": "1.00" }, { "value": "1" }, { "value": "1" }, { "value": "1" }
                ] }
            ]
        })))
        .expect("parse");

        assert_eq!(parsed.len(), 2, "rows without a channel are skipped");
        assert_eq!(parsed[0].domain, "example.com");
        assert_eq!(parsed[0].page_path, "/promo");
        assert_eq!(parsed[0].earnings, Decimal::new(10, 0));
        assert_eq!(parsed[0].page_views, 100);
        assert_eq!(parsed[0].impressions, 250);
        assert_eq!(parsed[0].clicks, 5);

        assert_eq!(parsed[1].domain, "blog.example.com");
        assert_eq!(parsed[1].page_path, "/");
        assert_eq!(parsed[1].page_views, 0);
    }

    #[test]
    fn page_breakdown_tolerates_missing_traffic_columns() {
        let parsed = parse_page_breakdown(&report(serde_json::json!({
            "headers": [{ "name": "URL_CHANNEL_NAME" }, { "name": "ESTIMATED_EARNINGS" }],
            "rows": [{ "cells": [{ "value": "example.com/a" }, { "value": "3" }] }]
        })))
        .expect("parse");

        assert_eq!(parsed[0].domain, "example.com");
        assert_eq!(parsed[0].page_views, 0);
        assert_eq!(parsed[0].clicks, 0);
    }
}
