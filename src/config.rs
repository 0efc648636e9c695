use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "AidPoint";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
const DEFAULT_CHAT_DELAY_MS: u64 = 1000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "aidpoint_lib=info,aidpoint=info,tower_http=info"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime configuration, overridable through `AIDPOINT_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Delay before the chat assistant answers.
    pub chat_reply_delay: Duration,
    /// Sessions untouched for this long are evicted from the store.
    pub session_idle_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            chat_reply_delay: Duration::from_millis(DEFAULT_CHAT_DELAY_MS),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    /// Unset variables fall back to defaults; malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("AIDPOINT_BIND") {
            config.bind_addr = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "AIDPOINT_BIND",
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup("AIDPOINT_CHAT_DELAY_MS") {
            let ms: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "AIDPOINT_CHAT_DELAY_MS",
                value: value.clone(),
            })?;
            config.chat_reply_delay = Duration::from_millis(ms);
        }

        if let Some(value) = lookup("AIDPOINT_SESSION_IDLE_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "AIDPOINT_SESSION_IDLE_SECS",
                value: value.clone(),
            })?;
            config.session_idle_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.chat_reply_delay, Duration::from_secs(1));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(1800));
    }

    #[test]
    fn env_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("AIDPOINT_BIND", "0.0.0.0:9000"),
            ("AIDPOINT_CHAT_DELAY_MS", "250"),
            ("AIDPOINT_SESSION_IDLE_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.chat_reply_delay, Duration::from_millis(250));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn malformed_value_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("AIDPOINT_CHAT_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("AIDPOINT_CHAT_DELAY_MS"));
    }

    #[test]
    fn app_name_is_aidpoint() {
        assert_eq!(APP_NAME, "AidPoint");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
