//! `daily_metrics` rows and the `daily_metrics_summary` read view.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use smsdash_core::{DailyEntry, DailyMetric, DailyMetricSummary};
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyMetricRow {
    pub id: i64,
    pub date: NaiveDate,
    pub sms_cost: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<DailyMetricRow> for DailyMetric {
    fn from(row: DailyMetricRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            sms_cost: row.sms_cost,
            revenue: row.revenue,
            profit: row.profit,
            margin: row.margin,
            created_at: row.created_at,
        }
    }
}

/// One row of `daily_metrics_summary`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyMetricSummaryRow {
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

impl From<DailyMetricSummaryRow> for DailyMetricSummary {
    fn from(row: DailyMetricSummaryRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            revenue: row.revenue,
            sms_cost: row.sms_cost,
            profit: row.profit,
            margin: row.margin,
            created_at: row.created_at,
            message_count: row.message_count,
            total_messages_sent: row.total_messages_sent,
            avg_click_rate: row.avg_click_rate,
        }
    }
}

/// Input filters for summary listing. Both bounds are inclusive.
///
/// `limit` is `None` to return every matching day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySummaryFilters {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<i64>,
}

/// Result of a successful day insert.
#[derive(Debug, Clone)]
pub struct InsertedDailyMetric {
    pub metric: DailyMetricRow,
    pub message_count: usize,
}

/// Insert a day and all of its messages in one transaction.
///
/// Either every row lands or none does; a failing message insert never leaves
/// an orphaned `daily_metrics` row behind.
///
/// # Errors
///
/// Returns [`DbError::DuplicateDate`] when the date already has a record, or
/// [`DbError::Sqlx`] on any other database failure.
pub async fn insert_daily_entry(
    pool: &PgPool,
    entry: &DailyEntry,
) -> Result<InsertedDailyMetric, DbError> {
    let mut tx = pool.begin().await?;

    let metric = sqlx::query_as::<_, DailyMetricRow>(
        "INSERT INTO daily_metrics (date, sms_cost, revenue) \
         VALUES ($1, $2, $3) \
         RETURNING id, date, sms_cost, revenue, profit, margin, created_at",
    )
    .bind(entry.date)
    .bind(entry.sms_cost)
    .bind(entry.revenue)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        let err = DbError::from(e);
        if err.is_unique_violation() {
            DbError::DuplicateDate(entry.date)
        } else {
            err
        }
    })?;

    for message in &entry.messages {
        sqlx::query(
            "INSERT INTO sms_messages (daily_id, content, link_url, click_rate, num_sent, est_cost) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(metric.id)
        .bind(&message.content)
        .bind(message.link_url.as_deref())
        .bind(message.click_rate)
        .bind(message.num_sent)
        .bind(message.est_cost)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(
        id = metric.id,
        date = %metric.date,
        messages = entry.messages.len(),
        "daily metric inserted"
    );

    Ok(InsertedDailyMetric {
        metric,
        message_count: entry.messages.len(),
    })
}

/// Fetch one day by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database failure.
pub async fn get_daily_metric(pool: &PgPool, id: i64) -> Result<Option<DailyMetricRow>, DbError> {
    let row = sqlx::query_as::<_, DailyMetricRow>(
        "SELECT id, date, sms_cost, revenue, profit, margin, created_at \
         FROM daily_metrics WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Fetch one day by its calendar date.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database failure.
pub async fn get_daily_metric_by_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Option<DailyMetricRow>, DbError> {
    let row = sqlx::query_as::<_, DailyMetricRow>(
        "SELECT id, date, sms_cost, revenue, profit, margin, created_at \
         FROM daily_metrics WHERE date = $1",
    )
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// List summary rows newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database failure.
pub async fn list_daily_summaries(
    pool: &PgPool,
    filters: DailySummaryFilters,
) -> Result<Vec<DailyMetricSummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, DailyMetricSummaryRow>(
        "SELECT id, date, revenue, sms_cost, profit, margin, created_at, \
                message_count, total_messages_sent, avg_click_rate \
         FROM daily_metrics_summary \
         WHERE ($1::DATE IS NULL OR date >= $1) \
           AND ($2::DATE IS NULL OR date <= $2) \
         ORDER BY date DESC \
         LIMIT $3",
    )
    .bind(filters.start)
    .bind(filters.end)
    .bind(filters.limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
