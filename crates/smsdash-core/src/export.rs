//! CSV export of the daily summary table.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::DailyMetricSummary;
use crate::CoreError;

/// One exported line; field order is the header order.
#[derive(Debug, Clone, Serialize)]
pub struct DailyMetricCsvRow {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub sms_cost: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub total_messages_sent: Option<i64>,
    pub avg_click_rate: Option<Decimal>,
    pub message_count: i64,
}

impl From<&DailyMetricSummary> for DailyMetricCsvRow {
    fn from(m: &DailyMetricSummary) -> Self {
        Self {
            date: m.date,
            revenue: m.revenue,
            sms_cost: m.sms_cost,
            profit: m.profit,
            margin: m.margin,
            total_messages_sent: m.total_messages_sent,
            avg_click_rate: m.avg_click_rate,
            message_count: m.message_count,
        }
    }
}

/// Render summaries as CSV with a header row.
///
/// Fields are quoted only when they contain a comma, quote, or line break;
/// missing values are empty fields. No rows means an empty document, header
/// included.
///
/// # Errors
///
/// Returns [`CoreError::Csv`] if a row fails to serialize.
pub fn daily_metrics_csv(metrics: &[DailyMetricSummary]) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for metric in metrics {
        writer.serialize(DailyMetricCsvRow::from(metric))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| CoreError::CsvEncoding)
}
