//! Read-side aggregates for the dashboard, message detail, and chart views.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{margin, DailyMetricSummary, SmsMessage};

/// Headline totals across a window of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardKpis {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub avg_margin: Decimal,
    pub days: usize,
}

impl DashboardKpis {
    #[must_use]
    pub fn from_summaries(metrics: &[DailyMetricSummary]) -> Self {
        let total_revenue: Decimal = metrics.iter().map(|m| m.revenue).sum();
        let total_cost: Decimal = metrics.iter().map(|m| m.sms_cost).sum();
        let total_profit: Decimal = metrics.iter().map(|m| m.profit).sum();
        Self {
            total_revenue,
            total_cost,
            total_profit,
            avg_margin: margin(total_profit, total_revenue),
            days: metrics.len(),
        }
    }
}

/// Totals over one day's messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageTotals {
    pub total_sent: i64,
    /// `num_sent * click_rate` summed over messages; messages without a
    /// click rate contribute nothing.
    pub estimated_clicks: Decimal,
    pub avg_click_rate: Decimal,
    pub total_message_cost: Decimal,
}

impl MessageTotals {
    #[must_use]
    pub fn from_messages(messages: &[SmsMessage]) -> Self {
        let total_sent: i64 = messages.iter().map(|m| i64::from(m.num_sent)).sum();
        let estimated_clicks: Decimal = messages
            .iter()
            .map(|m| Decimal::from(m.num_sent) * m.click_rate.unwrap_or(Decimal::ZERO))
            .sum();
        let avg_click_rate = if total_sent > 0 {
            estimated_clicks
                .checked_div(Decimal::from(total_sent))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        Self {
            total_sent,
            estimated_clicks,
            avg_click_rate,
            total_message_cost: messages.iter().map(|m| m.est_cost).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub margin_percent: Decimal,
    pub click_rate_percent: Decimal,
    pub messages: i64,
}

/// Cost versus profit split over the charted window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBreakdown {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub breakdown: ChartBreakdown,
}

impl ChartSeries {
    /// Build chart points in ascending date order regardless of input order.
    #[must_use]
    pub fn from_summaries(metrics: &[DailyMetricSummary]) -> Self {
        let mut points: Vec<ChartPoint> = metrics
            .iter()
            .map(|m| ChartPoint {
                date: m.date,
                revenue: m.revenue,
                cost: m.sms_cost,
                profit: m.profit,
                margin_percent: m.margin * Decimal::ONE_HUNDRED,
                click_rate_percent: m.avg_click_rate.unwrap_or(Decimal::ZERO)
                    * Decimal::ONE_HUNDRED,
                messages: m.total_messages_sent.unwrap_or(0),
            })
            .collect();
        points.sort_by_key(|p| p.date);

        let kpis = DashboardKpis::from_summaries(metrics);
        Self {
            points,
            breakdown: ChartBreakdown {
                total_revenue: kpis.total_revenue,
                total_cost: kpis.total_cost,
                total_profit: kpis.total_profit,
            },
        }
    }
}
