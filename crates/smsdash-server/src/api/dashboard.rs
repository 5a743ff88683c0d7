use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use smsdash_core::{DailyMetricSummary, DashboardKpis};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

const DEFAULT_DAYS: i64 = 30;
const MAX_DAYS: i64 = 366;

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct DashboardData {
    days: i64,
    since: NaiveDate,
    kpis: DashboardKpis,
    metrics: Vec<DailyMetricSummary>,
}

pub(super) fn normalize_days(days: Option<i64>) -> i64 {
    days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS)
}

/// GET /api/v1/dashboard: the trailing window of days, newest first.
pub(super) async fn dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let days = normalize_days(query.days);
    let since = Utc::now().date_naive() - TimeDelta::days(days);

    let metrics: Vec<DailyMetricSummary> = smsdash_db::list_daily_summaries(
        &state.pool,
        smsdash_db::DailySummaryFilters {
            start: Some(since),
            end: None,
            limit: None,
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?
    .into_iter()
    .map(DailyMetricSummary::from)
    .collect();

    Ok(Json(ApiResponse {
        data: DashboardData {
            days,
            since,
            kpis: DashboardKpis::from_summaries(&metrics),
            metrics,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
