use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::revenue_per_mille;
use super::normalize::SmsLink;
use crate::metrics::SmsMessage;
use crate::report::RevenueReportRow;

/// A report row annotated with the campaign credited for its traffic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPage {
    #[serde(flatten)]
    pub row: RevenueReportRow,
    pub page_url: String,
    pub sms_message: Option<SmsMessage>,
    pub is_matched: bool,
    pub revenue_per_mille: Decimal,
}

/// Whether `link` points at the page described by `row`.
///
/// The link host must contain the row's domain and the link path must equal
/// or contain the row's path. Both comparisons are plain substring checks.
fn is_same_page(link: &SmsLink, row: &RevenueReportRow) -> bool {
    link.host.contains(row.domain.as_str())
        && (link.path == row.page_path || link.path.contains(row.page_path.as_str()))
}

/// Credit each report row to the first link in `links` that points at it.
///
/// Iteration order decides ties: a row that several links would match goes
/// to the earliest one only. Output keeps the row order of `rows`.
#[must_use]
pub fn match_pages(rows: &[RevenueReportRow], links: &[SmsLink]) -> Vec<MatchedPage> {
    rows.iter()
        .map(|row| {
            let matching = links.iter().find(|link| is_same_page(link, row));
            MatchedPage {
                page_url: format!("https://{}{}", row.domain, row.page_path),
                sms_message: matching.map(|link| link.message.clone()),
                is_matched: matching.is_some(),
                revenue_per_mille: revenue_per_mille(row.earnings, row.page_views),
                row: row.clone(),
            }
        })
        .collect()
}
