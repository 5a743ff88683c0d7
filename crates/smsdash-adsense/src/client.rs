//! HTTP client for the ad-revenue reporting API.
//!
//! Every call starts from a refresh token: the client exchanges it for a
//! short-lived access token, resolves the first ad account, then generates
//! two single-day reports. Access tokens are not cached between calls.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use smsdash_core::{AdsenseCredentials, AppConfig, RevenueReport};

use crate::error::AdsenseError;
use crate::parse::{
    parse_domain_breakdown, parse_page_breakdown, CLICKS, DOMAIN_NAME, ESTIMATED_EARNINGS,
    IMPRESSIONS, PAGE_VIEWS, URL_CHANNEL_NAME,
};
use crate::types::{AccountsResponse, ReportResult, TokenResponse};

const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_API_BASE: &str = "https://adsense.googleapis.com/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Transport and report-size settings.
#[derive(Debug, Clone, Copy)]
pub struct AdsenseOptions {
    pub timeout_secs: u64,
    /// Maximum page rows requested for the page breakdown.
    pub page_limit: u32,
}

impl Default for AdsenseOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl AdsenseOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.report_timeout_secs,
            page_limit: config.report_page_limit,
        }
    }
}

/// Which report to generate for a date.
struct ReportSpec<'a> {
    dimensions: &'a [&'a str],
    metrics: &'a [&'a str],
    order_by: Option<&'a str>,
    limit: Option<u32>,
}

/// Client for the ad-revenue reporting API.
///
/// Use [`AdsenseClient::new`] for production or
/// [`AdsenseClient::with_endpoints`] to point at a mock server in tests.
pub struct AdsenseClient {
    client: Client,
    credentials: AdsenseCredentials,
    token_url: Url,
    api_base: Url,
    page_limit: u32,
}

impl AdsenseClient {
    /// Creates a client pointed at the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`AdsenseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        credentials: AdsenseCredentials,
        options: AdsenseOptions,
    ) -> Result<Self, AdsenseError> {
        Self::with_endpoints(credentials, options, DEFAULT_TOKEN_URL, DEFAULT_API_BASE)
    }

    /// Creates a client with custom token and API endpoints (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdsenseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AdsenseError::InvalidEndpoint`] if either
    /// endpoint is not a valid URL.
    pub fn with_endpoints(
        credentials: AdsenseCredentials,
        options: AdsenseOptions,
        token_url: &str,
        api_base: &str,
    ) -> Result<Self, AdsenseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("smsdash/0.1 (revenue-attribution)")
            .build()?;

        let token_url = parse_endpoint(token_url)?;
        // One trailing slash so relative joins append to the base path
        // instead of replacing its last segment.
        let api_base = parse_endpoint(&format!("{}/", api_base.trim_end_matches('/')))?;

        Ok(Self {
            client,
            credentials,
            token_url,
            api_base,
            page_limit: options.page_limit,
        })
    }

    /// Fetches the revenue report for one calendar day.
    ///
    /// Total revenue is the sum of the domain breakdown. Page rows are
    /// returned in descending-earnings order, capped at the page limit.
    ///
    /// # Errors
    ///
    /// - [`AdsenseError::Auth`] if the refresh token is rejected.
    /// - [`AdsenseError::NoAccounts`] if the credentials own no ad account.
    /// - [`AdsenseError::Http`] on network failure or non-2xx HTTP status.
    /// - [`AdsenseError::Deserialize`] or [`AdsenseError::MissingColumn`] if
    ///   a response does not match the expected shape.
    pub async fn fetch_report(&self, date: NaiveDate) -> Result<RevenueReport, AdsenseError> {
        let token = self.access_token().await?;
        let account = self.first_account(&token).await?;

        let domains_url = self.report_url(
            &account,
            date,
            &ReportSpec {
                dimensions: &[DOMAIN_NAME],
                metrics: &[ESTIMATED_EARNINGS],
                order_by: None,
                limit: None,
            },
        )?;
        let domains: ReportResult = self.get_json(&domains_url, &token).await?;
        let breakdown = parse_domain_breakdown(&domains)?;

        let pages_url = self.report_url(
            &account,
            date,
            &ReportSpec {
                dimensions: &[DOMAIN_NAME, URL_CHANNEL_NAME],
                metrics: &[ESTIMATED_EARNINGS, PAGE_VIEWS, IMPRESSIONS, CLICKS],
                order_by: Some("-ESTIMATED_EARNINGS"),
                limit: Some(self.page_limit),
            },
        )?;
        let pages: ReportResult = self.get_json(&pages_url, &token).await?;
        let page_breakdown = parse_page_breakdown(&pages)?;

        tracing::debug!(
            %date,
            account = %account,
            domains = breakdown.len(),
            pages = page_breakdown.len(),
            "revenue report fetched"
        );

        Ok(RevenueReport::from_rows(date, breakdown, page_breakdown))
    }

    /// Exchanges the refresh token for an access token.
    async fn access_token(&self) -> Result<String, AdsenseError> {
        let response = self
            .client
            .post(self.token_url.clone())
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdsenseError::Auth(format!(
                "token endpoint returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AdsenseError::Deserialize {
                context: "token exchange".to_owned(),
                source: e,
            })?;

        tracing::debug!(expires_in = ?token.expires_in, "access token refreshed");
        Ok(token.access_token)
    }

    /// Returns the resource name of the first account, e.g. `accounts/pub-1`.
    async fn first_account(&self, token: &str) -> Result<String, AdsenseError> {
        let url = self.api_url("v2/accounts")?;
        let accounts: AccountsResponse = self.get_json(&url, token).await?;
        accounts
            .accounts
            .into_iter()
            .next()
            .map(|account| account.name)
            .ok_or(AdsenseError::NoAccounts)
    }

    /// Builds a single-day `reports:generate` URL.
    fn report_url(
        &self,
        account: &str,
        date: NaiveDate,
        spec: &ReportSpec<'_>,
    ) -> Result<Url, AdsenseError> {
        let mut url = self.api_url(&format!("v2/{account}/reports:generate"))?;
        {
            let year = date.year().to_string();
            let month = date.month().to_string();
            let day = date.day().to_string();

            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("dateRange", "CUSTOM");
            for prefix in ["startDate", "endDate"] {
                pairs.append_pair(&format!("{prefix}.year"), &year);
                pairs.append_pair(&format!("{prefix}.month"), &month);
                pairs.append_pair(&format!("{prefix}.day"), &day);
            }
            for dimension in spec.dimensions {
                pairs.append_pair("dimensions", dimension);
            }
            for metric in spec.metrics {
                pairs.append_pair("metrics", metric);
            }
            if let Some(order_by) = spec.order_by {
                pairs.append_pair("orderBy", order_by);
            }
            if let Some(limit) = spec.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    fn api_url(&self, path: &str) -> Result<Url, AdsenseError> {
        self.api_base
            .join(path)
            .map_err(|e| AdsenseError::InvalidEndpoint {
                url: format!("{}{path}", self.api_base),
                reason: e.to_string(),
            })
    }

    /// Sends an authorized GET, asserts a 2xx HTTP status, and parses the
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns [`AdsenseError::Http`] on network failure or a non-2xx status.
    /// Returns [`AdsenseError::Deserialize`] if the body does not match `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url, token: &str) -> Result<T, AdsenseError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AdsenseError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, AdsenseError> {
    Url::parse(raw).map_err(|e| AdsenseError::InvalidEndpoint {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
