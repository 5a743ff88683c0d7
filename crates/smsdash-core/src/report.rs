//! Ad-revenue report shapes exchanged between the reporting client, the
//! server, and the attribution join.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One page's earnings and traffic for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueReportRow {
    pub domain: String,
    pub page_path: String,
    pub earnings: Decimal,
    pub page_views: i64,
    pub impressions: i64,
    pub clicks: i64,
}

/// Earnings rolled up per domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEarnings {
    pub domain: String,
    pub earnings: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_page_views: i64,
    pub total_clicks: i64,
}

/// A day's revenue report.
///
/// `page_breakdown` arrives sorted by descending earnings and is never
/// re-sorted downstream. A report with `note` set is the degraded payload
/// returned when the upstream integration is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub breakdown: Vec<DomainEarnings>,
    pub page_breakdown: Vec<RevenueReportRow>,
    pub summary: ReportSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RevenueReport {
    /// Assemble a report from upstream rows. Total revenue is the sum of the
    /// domain breakdown; traffic totals come from the page rows.
    #[must_use]
    pub fn from_rows(
        date: NaiveDate,
        breakdown: Vec<DomainEarnings>,
        page_breakdown: Vec<RevenueReportRow>,
    ) -> Self {
        let revenue = breakdown.iter().map(|d| d.earnings).sum();
        let summary = ReportSummary {
            total_page_views: page_breakdown.iter().map(|r| r.page_views).sum(),
            total_clicks: page_breakdown.iter().map(|r| r.clicks).sum(),
        };
        Self {
            date,
            revenue,
            breakdown,
            page_breakdown,
            summary,
            note: None,
        }
    }

    /// Zero-revenue stand-in used when the upstream report cannot be fetched.
    #[must_use]
    pub fn degraded(date: NaiveDate, note: impl Into<String>) -> Self {
        Self {
            date,
            revenue: Decimal::ZERO,
            breakdown: Vec::new(),
            page_breakdown: Vec::new(),
            summary: ReportSummary::default(),
            note: Some(note.into()),
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.note.is_some()
    }
}
