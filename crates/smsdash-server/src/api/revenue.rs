use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use smsdash_core::RevenueReport;

use crate::middleware::RequestId;

use super::{parse_date_param, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RevenueReportRequest {
    #[serde(default)]
    pub date: Option<String>,
}

/// POST /api/v1/revenue/report
///
/// Never fails on upstream trouble; the reporter hands back a zero-revenue
/// report with a `note` instead.
pub(super) async fn revenue_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<RevenueReportRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RevenueReport>>, ApiError> {
    let rid = &req_id.0;

    let Json(request) =
        body.map_err(|e| ApiError::new(rid, "validation_error", e.body_text()))?;
    let date = parse_date_param(rid, "date", request.date.as_deref())?
        .ok_or_else(|| ApiError::new(rid, "validation_error", "'date' is required"))?;

    let report = state.reporter.report_for(date).await;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
