//! Stored campaign records: one [`DailyMetric`] per calendar day and the
//! [`SmsMessage`] blasts sent on it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One outbound SMS campaign message sent on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub id: i64,
    pub daily_id: i64,
    pub content: String,
    pub link_url: Option<String>,
    /// Observed or estimated click-through as a fraction in `[0, 1]`.
    pub click_rate: Option<Decimal>,
    pub num_sent: i32,
    pub est_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// One calendar day's revenue/cost record.
///
/// `profit` and `margin` are generated by the store; they are read back, never
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub id: i64,
    pub date: NaiveDate,
    pub sms_cost: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A [`DailyMetric`] joined with aggregates over its messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetricSummary {
    pub id: i64,
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub sms_cost: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub created_at: DateTime<Utc>,
    pub message_count: i64,
    pub total_messages_sent: Option<i64>,
    pub avg_click_rate: Option<Decimal>,
}

/// `profit / revenue`, or zero when there is no revenue.
#[must_use]
pub fn margin(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue > Decimal::ZERO {
        profit.checked_div(revenue).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}
