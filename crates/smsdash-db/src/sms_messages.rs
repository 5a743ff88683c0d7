//! `sms_messages` rows. Messages are written only through
//! [`crate::insert_daily_entry`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smsdash_core::SmsMessage;
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SmsMessageRow {
    pub id: i64,
    pub daily_id: i64,
    pub content: String,
    pub link_url: Option<String>,
    pub click_rate: Option<Decimal>,
    pub num_sent: i32,
    pub est_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<SmsMessageRow> for SmsMessage {
    fn from(row: SmsMessageRow) -> Self {
        Self {
            id: row.id,
            daily_id: row.daily_id,
            content: row.content,
            link_url: row.link_url,
            click_rate: row.click_rate,
            num_sent: row.num_sent,
            est_cost: row.est_cost,
            created_at: row.created_at,
        }
    }
}

/// Messages for a day, largest send first. This is the order attribution
/// credits campaigns in; equal sends fall back to insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database failure.
pub async fn list_messages_by_num_sent(
    pool: &PgPool,
    daily_id: i64,
) -> Result<Vec<SmsMessageRow>, DbError> {
    let rows = sqlx::query_as::<_, SmsMessageRow>(
        "SELECT id, daily_id, content, link_url, click_rate, num_sent, est_cost, created_at \
         FROM sms_messages \
         WHERE daily_id = $1 \
         ORDER BY num_sent DESC, id ASC",
    )
    .bind(daily_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Messages for a day in the order they were recorded.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database failure.
pub async fn list_messages_chronological(
    pool: &PgPool,
    daily_id: i64,
) -> Result<Vec<SmsMessageRow>, DbError> {
    let rows = sqlx::query_as::<_, SmsMessageRow>(
        "SELECT id, daily_id, content, link_url, click_rate, num_sent, est_cost, created_at \
         FROM sms_messages \
         WHERE daily_id = $1 \
         ORDER BY created_at ASC, id ASC",
    )
    .bind(daily_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
