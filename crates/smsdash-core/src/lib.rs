pub mod app_config;
pub mod attribution;
pub mod config;
pub mod dashboard;
pub mod entry;
pub mod export;
pub mod metrics;
pub mod report;

pub use app_config::{AdsenseCredentials, AppConfig, Environment};
pub use attribution::{
    analyze, match_pages, normalize_link, revenue_per_mille, summarize, AttributionSummary,
    MatchedPage, NormalizedLink, RevenueAnalysis, SmsLink,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::{ChartBreakdown, ChartPoint, ChartSeries, DashboardKpis, MessageTotals};
pub use entry::{DailyEntry, DailyEntryForm, MessageEntry, MessageEntryForm};
pub use export::{daily_metrics_csv, DailyMetricCsvRow};
pub use metrics::{DailyMetric, DailyMetricSummary, SmsMessage};
pub use report::{DomainEarnings, RevenueReport, RevenueReportRow, ReportSummary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output was not valid utf-8")]
    CsvEncoding,
}

impl CoreError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
