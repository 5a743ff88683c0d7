//! Day-level records: list, create, and the per-day message detail view.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smsdash_core::{DailyEntryForm, DailyMetric, DailyMetricSummary, MessageTotals, SmsMessage};
use smsdash_db::DbError;

use crate::middleware::RequestId;

use super::{
    map_db_error, normalize_limit, parse_date_param, require_daily_metric, ApiError, ApiResponse,
    AppState, ResponseMeta,
};

const SAVE_FAILED_MESSAGE: &str = "failed to save daily data; please try again";

#[derive(Debug, Deserialize)]
pub(super) struct DailyMetricsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct CreatedDailyMetric {
    id: i64,
    date: NaiveDate,
    message_count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct DailyMetricDetail {
    metric: DailyMetric,
    messages: Vec<SmsMessage>,
    totals: MessageTotals,
}

/// GET /api/v1/daily-metrics
pub(super) async fn list_daily_metrics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DailyMetricsQuery>,
) -> Result<Json<ApiResponse<Vec<DailyMetricSummary>>>, ApiError> {
    let rid = &req_id.0;
    let start = parse_date_param(rid, "start", query.start.as_deref())?;
    let end = parse_date_param(rid, "end", query.end.as_deref())?;

    let rows = smsdash_db::list_daily_summaries(
        &state.pool,
        smsdash_db::DailySummaryFilters {
            start,
            end,
            limit: Some(normalize_limit(query.limit)),
        },
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(DailyMetricSummary::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/daily-metrics
pub(super) async fn create_daily_metric(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<DailyEntryForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedDailyMetric>>), ApiError> {
    let rid = &req_id.0;

    let Json(form) =
        body.map_err(|e| ApiError::new(rid, "validation_error", e.body_text()))?;
    let entry = form
        .validate()
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;

    let inserted = smsdash_db::insert_daily_entry(&state.pool, &entry)
        .await
        .map_err(|e| match e {
            DbError::DuplicateDate(date) => ApiError::new(
                rid,
                "conflict",
                format!("a daily record for {date} already exists"),
            ),
            other => {
                tracing::error!(error = %other, date = %entry.date, "failed to save daily metric");
                ApiError::new(rid, "internal_error", SAVE_FAILED_MESSAGE)
            }
        })?;

    tracing::info!(
        id = inserted.metric.id,
        date = %inserted.metric.date,
        messages = inserted.message_count,
        "daily metric created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: CreatedDailyMetric {
                id: inserted.metric.id,
                date: inserted.metric.date,
                message_count: inserted.message_count,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/daily-metrics/{id}
pub(super) async fn get_daily_metric(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DailyMetricDetail>>, ApiError> {
    let rid = &req_id.0;
    let metric = require_daily_metric(&state, rid, id).await?;

    let messages: Vec<SmsMessage> = smsdash_db::list_messages_chronological(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .into_iter()
        .map(SmsMessage::from)
        .collect();
    let totals = MessageTotals::from_messages(&messages);

    Ok(Json(ApiResponse {
        data: DailyMetricDetail {
            metric: metric.into(),
            messages,
            totals,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
