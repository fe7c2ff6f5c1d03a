use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the only failure mode is a value that
/// does not parse. Kept separate from the process environment so tests can
/// drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("MEETFINDER_LOG_LEVEL", "info");

    let postcodes_base_url = or_default("MEETFINDER_POSTCODES_BASE_URL", "https://api.postcodes.io");
    if !(postcodes_base_url.starts_with("http://") || postcodes_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "MEETFINDER_POSTCODES_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{postcodes_base_url}'"),
        });
    }

    let request_timeout_secs = parse_u64("MEETFINDER_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MEETFINDER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let user_agent = or_default(
        "MEETFINDER_USER_AGENT",
        "meetfinder/0.1 (competition-search)",
    );
    let inter_request_delay_ms = parse_u64("MEETFINDER_INTER_REQUEST_DELAY_MS", "100")?;
    let data_dir = PathBuf::from(or_default("MEETFINDER_DATA_DIR", "downloads"));

    let home_postcode = lookup("MEETFINDER_HOME_POSTCODE")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    Ok(AppConfig {
        log_level,
        postcodes_base_url,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        data_dir,
        home_postcode,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
