use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::matcher::MatchedPage;

/// Revenue totals for one day's attribution view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributionSummary {
    pub total_revenue: Decimal,
    pub matched_revenue: Decimal,
    pub unmatched_revenue: Decimal,
    /// Share of `total_revenue` credited to campaigns, as a whole percent.
    pub attributed_percent: i64,
    pub total_pages: usize,
    pub total_page_views: i64,
    pub total_clicks: i64,
}

/// Earnings per thousand page views; zero when there were no views.
#[must_use]
pub fn revenue_per_mille(earnings: Decimal, page_views: i64) -> Decimal {
    if page_views <= 0 {
        return Decimal::ZERO;
    }
    earnings
        .checked_div(Decimal::from(page_views))
        .and_then(|per_view| per_view.checked_mul(Decimal::ONE_THOUSAND))
        .unwrap_or(Decimal::ZERO)
}

/// Split `total_revenue` into attributed and unattributed buckets.
///
/// The unattributed figure is `total_revenue - matched`, so the supplied total
/// wins over the row sum when the two disagree.
#[must_use]
pub fn summarize(pages: &[MatchedPage], total_revenue: Decimal) -> AttributionSummary {
    let matched_revenue: Decimal = pages
        .iter()
        .filter(|p| p.is_matched)
        .map(|p| p.row.earnings)
        .sum();

    AttributionSummary {
        total_revenue,
        matched_revenue,
        unmatched_revenue: total_revenue - matched_revenue,
        attributed_percent: attributed_percent(matched_revenue, total_revenue),
        total_pages: pages.len(),
        total_page_views: pages.iter().map(|p| p.row.page_views).sum(),
        total_clicks: pages.iter().map(|p| p.row.clicks).sum(),
    }
}

fn attributed_percent(matched: Decimal, total: Decimal) -> i64 {
    if total <= Decimal::ZERO {
        return 0;
    }
    matched
        .checked_div(total)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_i64())
        .unwrap_or(0)
}
