use thiserror::Error;

/// Errors returned by the ad-revenue reporting client.
#[derive(Debug, Error)]
pub enum AdsenseError {
    /// Network or TLS failure, or a non-2xx status from the reporting API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The refresh-token exchange was rejected.
    #[error("token exchange failed: {0}")]
    Auth(String),

    /// The credentials are valid but no ad account is attached to them.
    #[error("no ad accounts found for these credentials")]
    NoAccounts,

    /// A report came back without a column the parser relies on.
    #[error("report is missing the {0} column")]
    MissingColumn(&'static str),

    /// A configured endpoint is not a usable URL.
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
