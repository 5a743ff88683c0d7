use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use smsdash_core::{analyze, DailyMetric, RevenueAnalysis, SmsMessage};

use crate::middleware::RequestId;

use super::{map_db_error, require_daily_metric, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct RevenueAnalysisData {
    metric: DailyMetric,
    #[serde(flatten)]
    analysis: RevenueAnalysis,
}

/// GET /api/v1/daily-metrics/{id}/revenue-analysis
///
/// Joins the day's campaign links against the page-level revenue report.
/// An unavailable report still renders, with every bucket at zero.
pub(super) async fn revenue_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RevenueAnalysisData>>, ApiError> {
    let rid = &req_id.0;
    let metric = require_daily_metric(&state, rid, id).await?;

    let messages: Vec<SmsMessage> = smsdash_db::list_messages_by_num_sent(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .into_iter()
        .map(SmsMessage::from)
        .collect();

    let report = state.reporter.report_for(metric.date).await;
    let analysis = analyze(&messages, &report);

    Ok(Json(ApiResponse {
        data: RevenueAnalysisData {
            metric: metric.into(),
            analysis,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
