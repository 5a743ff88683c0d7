//! `add` and `list`: write a day from a JSON file, and show the recent window.

use std::path::Path;

use chrono::{TimeDelta, Utc};
use smsdash_core::{DailyEntryForm, DailyMetricSummary, DashboardKpis};
use smsdash_db::DbError;

/// Validate and insert the day described by `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the form fails
/// validation, the date already has a record, or the insert fails.
pub(crate) async fn run_add(pool: &sqlx::PgPool, file: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let form: DailyEntryForm = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid day file: {e}", file.display()))?;
    let entry = form.validate()?;

    let inserted = match smsdash_db::insert_daily_entry(pool, &entry).await {
        Ok(inserted) => inserted,
        Err(DbError::DuplicateDate(date)) => {
            anyhow::bail!("a daily record for {date} already exists")
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "saved {} (id {}) with {} message(s): revenue {}, cost {}, profit {}",
        inserted.metric.date,
        inserted.metric.id,
        inserted.message_count,
        inserted.metric.revenue,
        inserted.metric.sms_cost,
        inserted.metric.profit,
    );
    Ok(())
}

/// Print the trailing `days` window as a table with totals.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(pool: &sqlx::PgPool, days: i64) -> anyhow::Result<()> {
    let days = days.clamp(1, 366);
    let since = Utc::now().date_naive() - TimeDelta::days(days);

    let metrics: Vec<DailyMetricSummary> = smsdash_db::list_daily_summaries(
        pool,
        smsdash_db::DailySummaryFilters {
            start: Some(since),
            end: None,
            limit: None,
        },
    )
    .await?
    .into_iter()
    .map(DailyMetricSummary::from)
    .collect();

    if metrics.is_empty() {
        println!("no days recorded since {since}; run `add --file <day.json>` first");
        return Ok(());
    }

    println!(
        "{:<6}{:<12}{:>12}{:>12}{:>12}{:>9}{:>7}{:>10}",
        "ID", "DATE", "REVENUE", "COST", "PROFIT", "MARGIN", "MSGS", "SENT"
    );
    for m in &metrics {
        println!(
            "{:<6}{:<12}{:>12}{:>12}{:>12}{:>9}{:>7}{:>10}",
            m.id,
            m.date.to_string(),
            m.revenue.to_string(),
            m.sms_cost.to_string(),
            m.profit.to_string(),
            super::fmt_percent(m.margin),
            m.message_count,
            m.total_messages_sent.unwrap_or(0),
        );
    }

    let kpis = DashboardKpis::from_summaries(&metrics);
    println!();
    println!(
        "{} day(s): revenue {}, cost {}, profit {}, margin {}",
        kpis.days,
        kpis.total_revenue,
        kpis.total_cost,
        kpis.total_profit,
        super::fmt_percent(kpis.avg_margin),
    );
    Ok(())
}
