use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use smsdash_core::{ChartSeries, DailyMetricSummary};

use crate::middleware::RequestId;

use super::{map_db_error, parse_date_param, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ChartsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/v1/charts
pub(super) async fn charts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ChartsQuery>,
) -> Result<Json<ApiResponse<ChartSeries>>, ApiError> {
    let rid = &req_id.0;
    let start = parse_date_param(rid, "start", query.start.as_deref())?;
    let end = parse_date_param(rid, "end", query.end.as_deref())?;

    let metrics: Vec<DailyMetricSummary> = smsdash_db::list_daily_summaries(
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

    Ok(Json(ApiResponse {
        data: ChartSeries::from_summaries(&metrics),
        meta: ResponseMeta::new(req_id.0),
    }))
}
