//! Process-environment overlay (§6). Environment variables always win over
//! whatever the config file says, and are re-read on every load rather than
//! cached, so a long-running process picks up an updated `LOG_LEVEL`
//! without a restart of the loader itself.

use std::path::PathBuf;

use crate::model::Environment;

const DB_ADDRESS: &str = "DB_ADDRESS";
const CLICKHOUSE_USERNAME: &str = "CLICKHOUSE_USERNAME";
const CLICKHOUSE_PASSWORD: &str = "CLICKHOUSE_PASSWORD";
const LOG_LEVEL: &str = "LOG_LEVEL";
const CONFIG_DIR: &str = "CONFIG_DIR";
const SYSLOG_ADDRESS: &str = "SYSLOG_ADDRESS";
const LOGGING_ENABLED: &str = "LOGGING_ENABLED";

/// Overlay process environment variables onto a base [`Environment`],
/// warning (not failing) on values that don't parse.
#[must_use]
pub fn apply(mut env: Environment) -> Environment {
    if let Ok(v) = std::env::var(DB_ADDRESS) {
        env.db_address = v;
    }
    if let Ok(v) = std::env::var(CLICKHOUSE_USERNAME) {
        env.clickhouse_username = v;
    }
    if let Ok(v) = std::env::var(CLICKHOUSE_PASSWORD) {
        env.clickhouse_password = v;
    }
    if let Ok(v) = std::env::var(LOG_LEVEL) {
        match v.parse::<u8>() {
            Ok(level) if level <= 6 => env.log_level = level,
            _ => tracing::warn!(value = %v, "LOG_LEVEL must be an integer in 0..=6, ignoring"),
        }
    }
    if let Ok(v) = std::env::var(CONFIG_DIR) {
        let dir = PathBuf::from(v);
        env.http_extensions_csv_path = dir.join("http_extensions_list.csv");
        env.threat_intel_dir = dir.join("threat_intel_feeds");
    }
    if let Ok(v) = std::env::var(SYSLOG_ADDRESS) {
        env.syslog_address = Some(v);
    }
    if let Ok(v) = std::env::var(LOGGING_ENABLED) {
        match parse_bool(&v) {
            Some(enabled) => env.logging_enabled = enabled,
            None => tracing::warn!(value = %v, "LOGGING_ENABLED must be true/false/1/0, ignoring"),
        }
    }
    env
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_known_forms() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn db_address_override_applies() {
        // SAFETY: tests in this module run single-threaded per process in
        // this crate's test harness; no other test reads DB_ADDRESS.
        unsafe {
            std::env::set_var(DB_ADDRESS, "10.0.0.5:9000");
        }
        let env = apply(Environment::default());
        assert_eq!(env.db_address, "10.0.0.5:9000");
        unsafe {
            std::env::remove_var(DB_ADDRESS);
        }
    }

    #[test]
    fn out_of_range_log_level_is_ignored() {
        unsafe {
            std::env::set_var(LOG_LEVEL, "99");
        }
        let env = apply(Environment::default());
        assert_eq!(env.log_level, Environment::default().log_level);
        unsafe {
            std::env::remove_var(LOG_LEVEL);
        }
    }
}
