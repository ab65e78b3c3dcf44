//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines the
//! constants that shape the health response, logging defaults, and default
//! paths. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

// =============================================================================
// Health Endpoint
// =============================================================================

/// Route served by the liveness probe
pub const HEALTH_PATH: &str = "/health";

/// Fixed body returned by the liveness probe
pub const HEALTH_BODY: &str = "Server running";

/// Liveness answers must never be served from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Response header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default listen host (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default window for draining connections on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Configuration file picked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither CLI, RUST_LOG, nor config provide one
pub const DEFAULT_LOG_FILTER: &str = formatcp!(
    "{}=info,tower_http=info",
    env!("CARGO_CRATE_NAME")
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds to wait for in-flight connections after a shutdown signal
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
    #[serde(default)]
    pub tls: TlsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
            tls: TlsConfig::default(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }

    /// Replace host and/or port with command-line values when given.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// Resolve `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        // Bracket bare IPv6 literals so "::1" and port combine cleanly
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        format!("{}:{}", host, self.port).parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid http.host or http.port ({}:{}): {}",
                self.host, self.port, e
            ))
        })
    }
}

/// TLS mode for the listening socket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain HTTP, typically behind a terminating proxy or inside a cluster
    #[default]
    None,
    /// Operator-provided PEM certificate and key
    Manual,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub mode: TlsMode,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// EnvFilter directive, used when neither CLI nor RUST_LOG set one
    pub filter: Option<String>,
}

/// Pick the tracing filter: CLI, then `RUST_LOG`, then `logging.filter`, then
/// `DEFAULT_LOG_FILTER`.
pub fn resolve_log_filter(
    cli: Option<String>,
    env: Option<String>,
    logging: &LoggingConfig,
) -> String {
    cli.or(env)
        .or_else(|| logging.filter.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or fall back to `DEFAULT_CONFIG_PATH` if it
    /// exists, or to built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tls = &self.http.tls;
        if tls.mode == TlsMode::Manual && (tls.cert_path.is_none() || tls.key_path.is_none()) {
            return Err(ConfigError::Validation(
                "http.tls.mode = \"manual\" requires both cert_path and key_path".to_string(),
            ));
        }

        if self.http.shutdown_timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "http.shutdown_timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(
            config.http.shutdown_timeout_seconds,
            DEFAULT_SHUTDOWN_TIMEOUT_SECS
        );
        assert_eq!(config.http.tls.mode, TlsMode::None);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/", "config/default.toml");
        let config = AppConfig::load(path).unwrap();

        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.http.tls.mode, TlsMode::None);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_full_file() {
        let file = write_config(
            r#"
            [http]
            host = "127.0.0.1"
            port = 9000
            shutdown_timeout_seconds = 5

            [http.tls]
            mode = "manual"
            cert_path = "/etc/email-service/cert.pem"
            key_path = "/etc/email-service/key.pem"

            [logging]
            format = "json"
            filter = "email_service=debug"
            "#,
        );
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.shutdown_timeout_seconds, 5);
        assert_eq!(config.http.tls.mode, TlsMode::Manual);
        assert_eq!(
            config.http.tls.cert_path.as_deref(),
            Some("/etc/email-service/cert.pem")
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter.as_deref(), Some("email_service=debug"));
    }

    #[test]
    fn test_manual_tls_requires_paths() {
        let file = write_config(
            r#"
            [http.tls]
            mode = "manual"
            cert_path = "/etc/email-service/cert.pem"
            "#,
        );
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_zero_shutdown_timeout_rejected() {
        let file = write_config("[http]\nshutdown_timeout_seconds = 0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_tls_mode_is_parse_error() {
        let file = write_config("[http.tls]\nmode = \"acme\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = write_config("[http\nport = ");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = AppConfig::load_or_default(missing.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_socket_addr() {
        let http = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            ..Default::default()
        };
        assert_eq!(http.socket_addr().unwrap().to_string(), "127.0.0.1:8081");

        let v6 = HttpServerConfig {
            host: "::1".to_string(),
            ..Default::default()
        };
        assert_eq!(v6.socket_addr().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let http = HttpServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            http.socket_addr(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut http = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Default::default()
        };

        http.apply_overrides(None, Some(9090));
        assert_eq!(http.host, "127.0.0.1");
        assert_eq!(http.port, 9090);

        http.apply_overrides(Some("::1".to_string()), None);
        assert_eq!(http.host, "::1");
        assert_eq!(http.port, 9090);
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let mut http = HttpServerConfig::default();
        http.apply_overrides(None, None);
        assert_eq!(http.host, DEFAULT_HTTP_HOST);
        assert_eq!(http.port, DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_log_filter_priority() {
        let logging = LoggingConfig {
            filter: Some("from_config=warn".to_string()),
            ..Default::default()
        };
        let cli = || Some("from_cli=trace".to_string());
        let env = || Some("from_env=debug".to_string());

        assert_eq!(resolve_log_filter(cli(), env(), &logging), "from_cli=trace");
        assert_eq!(resolve_log_filter(None, env(), &logging), "from_env=debug");
        assert_eq!(resolve_log_filter(None, None, &logging), "from_config=warn");
        assert_eq!(
            resolve_log_filter(None, None, &LoggingConfig::default()),
            DEFAULT_LOG_FILTER
        );
    }

    #[test]
    fn test_default_log_filter_names_crate() {
        assert!(DEFAULT_LOG_FILTER.starts_with("email_service="));
    }
}
