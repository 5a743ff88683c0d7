use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;
use smsdash_core::{daily_metrics_csv, DailyMetricSummary};

use crate::middleware::RequestId;

use super::{map_db_error, parse_date_param, ApiError, AppState};

pub(super) const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub(super) const CSV_DISPOSITION: &str = "attachment; filename=\"daily-metrics.csv\"";

#[derive(Debug, Deserialize)]
pub(super) struct ExportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/v1/export/daily-metrics: CSV download, oldest day first.
pub(super) async fn export_daily_metrics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rid = &req_id.0;
    let start = parse_date_param(rid, "start", query.start.as_deref())?;
    let end = parse_date_param(rid, "end", query.end.as_deref())?;

    let mut metrics: Vec<DailyMetricSummary> = smsdash_db::list_daily_summaries(
        &state.pool,
        smsdash_db::DailySummaryFilters {
            start,
            end,
            limit: None,
        },
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?
    .into_iter()
    .map(DailyMetricSummary::from)
    .collect();
    metrics.reverse();

    let csv = daily_metrics_csv(&metrics).map_err(|e| {
        tracing::error!(error = %e, "csv export failed");
        ApiError::new(rid, "internal_error", "failed to export")
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        csv,
    ))
}
