//! `export`: daily summaries as CSV on stdout or into a file.

use std::io::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use smsdash_core::DailyMetricSummary;

/// Write summaries between `start` and `end` (inclusive, both optional) in
/// ascending date order.
///
/// # Errors
///
/// Returns an error if the query, CSV rendering, or the write fails.
pub(crate) async fn run_export(
    pool: &sqlx::PgPool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        anyhow::ensure!(start <= end, "--start {start} is after --end {end}");
    }

    let mut metrics: Vec<DailyMetricSummary> = smsdash_db::list_daily_summaries(
        pool,
        smsdash_db::DailySummaryFilters {
            start,
            end,
            limit: None,
        },
    )
    .await?
    .into_iter()
    .map(DailyMetricSummary::from)
    .collect();
    metrics.reverse();

    let csv = smsdash_core::daily_metrics_csv(&metrics)?;

    match out {
        Some(path) => {
            std::fs::write(path, &csv)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), rows = metrics.len(), "export written");
            eprintln!("wrote {} row(s) to {}", metrics.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(csv.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
