use crate::app_config::{AdsenseCredentials, AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Loads a `.env` file first when one is present.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parse and validate configuration through an injectable lookup so tests can
/// drive it from a plain map.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("SMSDASH_ENV", "development"))?;

    let bind_addr = or_default("SMSDASH_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SMSDASH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SMSDASH_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("SMSDASH_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SMSDASH_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "SMSDASH_DB_MIN_CONNECTIONS",
            format!("{db_min_connections} exceeds SMSDASH_DB_MAX_CONNECTIONS={db_max_connections}"),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("SMSDASH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let adsense = match (
        non_blank(lookup("GOOGLE_CLIENT_ID").ok()),
        non_blank(lookup("GOOGLE_CLIENT_SECRET").ok()),
        non_blank(lookup("GOOGLE_REFRESH_TOKEN").ok()),
    ) {
        (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(AdsenseCredentials {
            client_id,
            client_secret,
            refresh_token,
        }),
        _ => None,
    };

    let report_timeout_secs = parse_u64("SMSDASH_REPORT_TIMEOUT_SECS", "30")?;
    let report_page_limit = parse_u32("SMSDASH_REPORT_PAGE_LIMIT", "50")?;
    if report_page_limit == 0 {
        return Err(invalid(
            "SMSDASH_REPORT_PAGE_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        adsense,
        report_timeout_secs,
        report_page_limit,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SMSDASH_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
