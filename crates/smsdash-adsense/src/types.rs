//! Response types for the OAuth token endpoint and the reporting API.
//!
//! Report cells are strings regardless of the metric type; parsing into
//! numbers happens in [`crate::parse`].

use serde::Deserialize;

/// Response from the refresh-token exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `GET /v2/accounts`.
#[derive(Debug, Default, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Resource name, e.g. `accounts/pub-1234567890`.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// `GET /v2/{account}/reports:generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    #[serde(default)]
    pub headers: Vec<ReportHeader>,
    #[serde(default)]
    pub rows: Vec<ReportRow>,
    #[serde(default)]
    pub total_matched_rows: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportHeader {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportRow {
    #[serde(default)]
    pub cells: Vec<ReportCell>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportCell {
    #[serde(default)]
    pub value: Option<String>,
}
