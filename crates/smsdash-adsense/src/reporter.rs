//! Never-failing wrapper around [`AdsenseClient`].
//!
//! Callers that render a day's revenue (the analysis view, the report
//! endpoint) always get a [`RevenueReport`]. Missing credentials or any fetch
//! failure produce the zero-revenue degraded report with a `note`, logged at
//! `warn`.

use chrono::NaiveDate;
use smsdash_core::{AppConfig, RevenueReport};

use crate::client::{AdsenseClient, AdsenseOptions};

pub const NOT_CONFIGURED_NOTE: &str =
    "Ad revenue reporting is not configured. Returning default values.";
pub const UNAVAILABLE_NOTE: &str =
    "Ad revenue report could not be fetched. Returning default values.";

pub struct RevenueReporter {
    client: Option<AdsenseClient>,
}

impl RevenueReporter {
    /// Build from application config. Absent credentials, or a client that
    /// fails to build, leave the reporter in degraded-only mode.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        let Some(credentials) = config.adsense.clone() else {
            tracing::info!("ad revenue credentials not set; revenue reports will be zero");
            return Self::disabled();
        };

        match AdsenseClient::new(credentials, AdsenseOptions::from_app_config(config)) {
            Ok(client) => Self::with_client(client),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build ad revenue client; revenue reports will be zero");
                Self::disabled()
            }
        }
    }

    #[must_use]
    pub fn with_client(client: AdsenseClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { client: None }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// The report for `date`, or the degraded report if it cannot be fetched.
    pub async fn report_for(&self, date: NaiveDate) -> RevenueReport {
        let Some(client) = &self.client else {
            tracing::warn!(%date, "ad revenue reporting not configured; returning zero revenue");
            return RevenueReport::degraded(date, NOT_CONFIGURED_NOTE);
        };

        match client.fetch_report(date).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(%date, error = %e, "ad revenue fetch failed; returning zero revenue");
                RevenueReport::degraded(date, UNAVAILABLE_NOTE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smsdash_core::AdsenseCredentials;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date")
    }

    #[tokio::test]
    async fn disabled_reporter_returns_not_configured_note() {
        let report = RevenueReporter::disabled().report_for(date()).await;
        assert_eq!(report.revenue, Decimal::ZERO);
        assert!(report.page_breakdown.is_empty());
        assert_eq!(report.note.as_deref(), Some(NOT_CONFIGURED_NOTE));
    }

    #[tokio::test]
    async fn unreachable_upstream_degrades() {
        // Port 9 (discard) refuses connections.
        let client = AdsenseClient::with_endpoints(
            AdsenseCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
                refresh_token: "token".into(),
            },
            AdsenseOptions {
                timeout_secs: 2,
                page_limit: 5,
            },
            "http://127.0.0.1:9/token",
            "http://127.0.0.1:9",
        )
        .expect("client");
        let reporter = RevenueReporter::with_client(client);
        assert!(reporter.is_configured());

        let report = reporter.report_for(date()).await;
        assert!(report.is_degraded());
        assert_eq!(report.note.as_deref(), Some(UNAVAILABLE_NOTE));
        assert_eq!(report.date, date());
    }
}
