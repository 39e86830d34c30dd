//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a default, so an empty
//! environment yields a working configuration.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The resolved listen address could not be parsed.
    #[error("invalid listen address {value:?}: {source}")]
    InvalidListenAddr {
        /// Offending value.
        value: String,
        /// Parse failure.
        #[source]
        source: AddrParseError,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Settings applied to every upgraded connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Closes a session that receives nothing for this long; `None`
    /// waits forever.
    pub idle_timeout: Option<Duration>,

    /// Largest inbound message accepted, in bytes; `None` keeps the
    /// WebSocket layer's own limit.
    pub max_message_size: Option<usize>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout: Some(Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS)),
            max_message_size: None,
        }
    }
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_ROOT: &str = "assets";
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Directory served for unmatched `GET`/`HEAD` requests.
    pub static_root: PathBuf,

    /// Per-connection WebSocket settings.
    pub session: SessionSettings,

    /// Log output format.
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidListenAddr`] if `LISTEN_ADDR` (or the
    /// `HOST`/`PORT` pair) does not form a valid socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `LISTEN_ADDR` wins over `HOST` and `PORT` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidListenAddr`] if the listen address is
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = resolve_listen_addr(&lookup)?;

        let static_root = lookup("STATIC_ROOT")
            .filter(|root| !root.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATIC_ROOT), PathBuf::from);

        let idle_secs = parse_var(&lookup, "SESSION_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS);
        let session = SessionSettings {
            idle_timeout: (idle_secs > 0).then(|| Duration::from_secs(idle_secs)),
            max_message_size: lookup("WS_MAX_MESSAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            static_root,
            session,
            log_format,
        })
    }
}

fn resolve_listen_addr<F>(lookup: &F) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup("LISTEN_ADDR") {
        Some(addr) => addr,
        None => {
            let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = parse_var(lookup, "PORT", DEFAULT_PORT);
            if host.contains(':') {
                format!("[{host}]:{port}")
            } else {
                format!("{host}:{port}")
            }
        }
    };
    value
        .parse()
        .map_err(|source| ConfigError::InvalidListenAddr { value, source })
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_to_empty_environment() {
        let Ok(config) = load(&[]) else {
            panic!("defaults should load");
        };
        assert_eq!(config.listen_addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.static_root, PathBuf::from("assets"));
        assert_eq!(config.session, SessionSettings::default());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn host_and_port_combine() {
        let Ok(config) = load(&[("HOST", "127.0.0.1"), ("PORT", "8080")]) else {
            panic!("host/port should load");
        };
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let Ok(config) = load(&[("HOST", "::1"), ("PORT", "9000")]) else {
            panic!("ipv6 host should load");
        };
        assert!(config.listen_addr.is_ipv6());
        assert_eq!(config.listen_addr.port(), 9000);
    }

    #[test]
    fn listen_addr_overrides_host_and_port() {
        let Ok(config) = load(&[("LISTEN_ADDR", "127.0.0.1:4000"), ("PORT", "8080")]) else {
            panic!("listen addr should load");
        };
        assert_eq!(config.listen_addr.port(), 4000);
    }

    #[test]
    fn malformed_listen_addr_is_an_error() {
        let result = load(&[("LISTEN_ADDR", "not-an-address")]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidListenAddr { ref value, .. }) if value == "not-an-address"
        ));
    }

    #[test]
    fn zero_idle_timeout_disables_it() {
        let Ok(config) = load(&[("SESSION_IDLE_TIMEOUT_SECS", "0")]) else {
            panic!("config should load");
        };
        assert_eq!(config.session.idle_timeout, None);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let Ok(config) = load(&[("WS_MAX_MESSAGE_SIZE", "lots"), ("PORT", "-1")]) else {
            panic!("config should load");
        };
        assert_eq!(config.session.max_message_size, None);
        assert_eq!(config.listen_addr.port(), 3000);
    }

    #[test]
    fn message_size_is_uncapped_unless_configured() {
        let Ok(config) = load(&[]) else {
            panic!("config should load");
        };
        assert_eq!(config.session.max_message_size, None);

        let Ok(config) = load(&[("WS_MAX_MESSAGE_SIZE", "1048576")]) else {
            panic!("config should load");
        };
        assert_eq!(config.session.max_message_size, Some(1_048_576));
    }

    #[test]
    fn json_log_format_is_case_insensitive() {
        let Ok(config) = load(&[("LOG_FORMAT", "JSON"), ("STATIC_ROOT", "public")]) else {
            panic!("config should load");
        };
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.static_root, PathBuf::from("public"));
    }
}
