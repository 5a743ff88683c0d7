//! Revenue attribution: credit a day's page-level ad revenue to the SMS
//! campaigns whose links drove the traffic.
//!
//! The pipeline is `normalize` (message links to host/path), `matcher` (first
//! link that points at a report row wins the row), and `aggregate` (attributed
//! vs. unattributed totals). Everything here is pure; callers fetch the
//! messages and the report.

mod aggregate;
mod matcher;
mod normalize;

use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::SmsMessage;
use crate::report::{ReportSummary, RevenueReport};

pub use aggregate::{revenue_per_mille, summarize, AttributionSummary};
pub use matcher::{match_pages, MatchedPage};
pub use normalize::{normalize_link, NormalizedLink, SmsLink};

/// The attribution view for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueAnalysis {
    pub date: NaiveDate,
    pub summary: AttributionSummary,
    pub report_summary: ReportSummary,
    pub pages: Vec<MatchedPage>,
    pub sms_links: Vec<SmsLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Run the full join for one day.
///
/// `messages` must already be in crediting order (highest `num_sent` first);
/// the report total, not the row sum, anchors the unattributed figure.
#[must_use]
pub fn analyze(messages: &[SmsMessage], report: &RevenueReport) -> RevenueAnalysis {
    let sms_links = SmsLink::collect(messages);
    let pages = match_pages(&report.page_breakdown, &sms_links);
    let summary = summarize(&pages, report.revenue);

    tracing::debug!(
        date = %report.date,
        links = sms_links.len(),
        pages = pages.len(),
        matched = %summary.matched_revenue,
        "attribution join complete"
    );

    RevenueAnalysis {
        date: report.date,
        summary,
        report_summary: report.summary.clone(),
        pages,
        sms_links,
        note: report.note.clone(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::report::{DomainEarnings, RevenueReportRow};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
    }

    fn message(id: i64, num_sent: i32, link_url: Option<&str>) -> SmsMessage {
        SmsMessage {
            id,
            daily_id: 9,
            content: format!("campaign {id}"),
            link_url: link_url.map(str::to_owned),
            click_rate: None,
            num_sent,
            est_cost: Decimal::new(5, 0),
            created_at: Utc::now(),
        }
    }

    fn row(domain: &str, path: &str, earnings: Decimal, page_views: i64) -> RevenueReportRow {
        RevenueReportRow {
            domain: domain.to_owned(),
            page_path: path.to_owned(),
            earnings,
            page_views,
            impressions: page_views * 2,
            clicks: 5,
        }
    }

    #[test]
    fn single_promo_page_is_credited_to_its_campaign() {
        let report = RevenueReport {
            date: day(),
            revenue: Decimal::new(25, 0),
            breakdown: vec![DomainEarnings {
                domain: "example.com".into(),
                earnings: Decimal::new(25, 0),
            }],
            page_breakdown: vec![row("example.com", "/promo", Decimal::new(10, 0), 100)],
            summary: ReportSummary {
                total_page_views: 100,
                total_clicks: 5,
            },
            note: None,
        };
        let messages = vec![message(1, 500, Some("https://www.example.com/promo"))];

        let analysis = analyze(&messages, &report);

        assert_eq!(analysis.pages.len(), 1);
        let page = &analysis.pages[0];
        assert!(page.is_matched);
        assert_eq!(page.sms_message.as_ref().map(|m| m.id), Some(1));
        assert_eq!(page.revenue_per_mille, Decimal::new(100, 0));
        assert_eq!(analysis.summary.matched_revenue, Decimal::new(10, 0));
        assert_eq!(analysis.summary.unmatched_revenue, Decimal::new(15, 0));
        assert_eq!(analysis.summary.attributed_percent, 40);
    }

    #[test]
    fn degraded_report_yields_zero_buckets() {
        let report = RevenueReport::degraded(day(), "upstream unavailable");
        let messages = vec![message(1, 10, Some("https://example.com/a"))];

        let analysis = analyze(&messages, &report);

        assert!(analysis.pages.is_empty());
        assert_eq!(analysis.sms_links.len(), 1);
        assert_eq!(analysis.summary.matched_revenue, Decimal::ZERO);
        assert_eq!(analysis.summary.unmatched_revenue, Decimal::ZERO);
        assert_eq!(analysis.note.as_deref(), Some("upstream unavailable"));
    }

    #[test]
    fn unparseable_links_never_break_the_join() {
        let rows = vec![row("example.com", "/a", Decimal::new(3, 0), 0)];
        let report = RevenueReport::from_rows(
            day(),
            vec![DomainEarnings {
                domain: "example.com".into(),
                earnings: Decimal::new(3, 0),
            }],
            rows,
        );
        let messages = vec![
            message(1, 900, Some("::::")),
            message(2, 800, None),
            message(3, 700, Some("https://example.com/a")),
        ];

        let analysis = analyze(&messages, &report);

        assert_eq!(analysis.sms_links.len(), 1);
        assert_eq!(
            analysis.pages[0].sms_message.as_ref().map(|m| m.id),
            Some(3)
        );
        assert_eq!(analysis.pages[0].revenue_per_mille, Decimal::ZERO);
    }

    #[test]
    fn sum_invariant_holds_across_mixed_rows() {
        let rows = vec![
            row("example.com", "/a", Decimal::new(1234, 2), 1_000),
            row("example.com", "/b", Decimal::new(56, 2), 40),
            row("news.example.com", "/c", Decimal::new(789, 3), 10),
            row("other.org", "/a", Decimal::new(1, 2), 1),
        ];
        let total: Decimal = rows.iter().map(|r| r.earnings).sum();
        let report = RevenueReport {
            date: day(),
            revenue: total,
            breakdown: Vec::new(),
            page_breakdown: rows,
            summary: ReportSummary::default(),
            note: None,
        };
        let messages = vec![
            message(1, 900, Some("https://example.com/a")),
            message(2, 100, Some("https://news.example.com/c?utm=sms")),
        ];

        let analysis = analyze(&messages, &report);
        let matched: Decimal = analysis
            .pages
            .iter()
            .filter(|p| p.is_matched)
            .map(|p| p.row.earnings)
            .sum();

        assert_eq!(matched, analysis.summary.matched_revenue);
        assert_eq!(
            analysis.summary.matched_revenue + analysis.summary.unmatched_revenue,
            total
        );
        let credited: Vec<Option<i64>> = analysis
            .pages
            .iter()
            .map(|p| p.sms_message.as_ref().map(|m| m.id))
            .collect();
        assert_eq!(credited, vec![Some(1), None, Some(2), None]);
    }
}
