//! Configuration management for the weather proxy
//!
//! Settings come from built-in defaults, an optional TOML file, environment
//! variables prefixed with `WEATHER_PROXY__`, and finally the plain `PORT`
//! variable, in increasing order of precedence.

use crate::WeatherProxyError;
use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "WEATHER_PROXY_CONFIG";

/// Environment variable selecting the listening port
pub const PORT_ENV: &str = "PORT";

const DEFAULT_CONFIG_FILE: &str = "weather-proxy.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherProxyConfig {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream weather API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the NWS API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `User-Agent` header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    "weather-app/1.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherProxyConfig {
    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let port = env::var(PORT_ENV).ok();
        Self::load_from_path(path, port)
    }

    /// Load configuration from the given file, with an optional port override
    ///
    /// An empty port override counts as unset.
    pub fn load_from_path(config_path: Option<PathBuf>, port: Option<String>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let port = port.filter(|port| !port.trim().is_empty());

        let mut builder = Config::builder();

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder
            .add_source(
                Environment::with_prefix("WEATHER_PROXY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port)
            .with_context(|| format!("Invalid {PORT_ENV} override"))?;

        let settings = builder.build().with_context(|| {
            format!("Failed to build configuration from {}", config_file.display())
        })?;

        let mut config: WeatherProxyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Fill empty values and normalize the base URL
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.upstream.base_url.is_empty() {
            self.upstream.base_url = default_base_url();
        }
        if self.upstream.user_agent.is_empty() {
            self.upstream.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        let trimmed = self.upstream.base_url.trim_end_matches('/').len();
        self.upstream.base_url.truncate(trimmed);
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(WeatherProxyError::config("Server port must be non-zero").into());
        }

        let base = url::Url::parse(&self.upstream.base_url).map_err(|e| {
            WeatherProxyError::config(format!(
                "Upstream base URL '{}' is invalid: {e}",
                self.upstream.base_url
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(WeatherProxyError::config(format!(
                "Upstream base URL must use http or https, got '{}'",
                base.scheme()
            ))
            .into());
        }

        if self.upstream.user_agent.trim().is_empty() {
            return Err(WeatherProxyError::config("Upstream user agent cannot be blank").into());
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(WeatherProxyError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ))
            .into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(WeatherProxyError::config(format!(
                "Invalid log format '{}'. Must be 'pretty' or 'json'",
                self.logging.format
            ))
            .into());
        }

        Ok(())
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let file_name = format!("weather-proxy-{}-{name}.toml", std::process::id());
        let path = env::temp_dir().join(file_name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = WeatherProxyConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url, "https://api.weather.gov");
        assert_eq!(config.upstream.user_agent, "weather-app/1.0");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_override() {
        let missing = env::temp_dir().join("weather-proxy-does-not-exist.toml");
        let config = WeatherProxyConfig::load_from_path(Some(missing), Some("8081".to_string()))
            .unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
    }

    #[test]
    fn test_empty_port_override_is_ignored() {
        let missing = env::temp_dir().join("weather-proxy-does-not-exist.toml");
        let config = WeatherProxyConfig::load_from_path(Some(missing), Some(String::new()))
            .unwrap();
        assert_eq!(config.server.port, 3000);

        let path = write_temp_config("empty-port", "[server]\nport = 4000\n");
        let config = WeatherProxyConfig::load_from_path(Some(path.clone()), Some(" ".to_string()))
            .unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_invalid_port_override() {
        let missing = env::temp_dir().join("weather-proxy-does-not-exist.toml");
        let result =
            WeatherProxyConfig::load_from_path(Some(missing), Some("not-a-port".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_values_and_trailing_slash() {
        let path = write_temp_config(
            "file",
            r#"
[server]
port = 4000

[upstream]
base_url = "http://localhost:9999/"

[logging]
format = "json"
"#,
        );

        let config = WeatherProxyConfig::load_from_path(Some(path.clone()), None).unwrap();
        fs::remove_file(path).ok();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.upstream.base_url, "http://localhost:9999");
        assert_eq!(config.upstream.user_agent, "weather-app/1.0");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_port_override_beats_file() {
        let path = write_temp_config("override", "[server]\nport = 4000\n");
        let config =
            WeatherProxyConfig::load_from_path(Some(path.clone()), Some("5000".to_string()))
                .unwrap();
        fs::remove_file(path).ok();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = WeatherProxyConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = WeatherProxyConfig::default();
        config.upstream.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = WeatherProxyConfig::default();
        config.upstream.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = WeatherProxyConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = WeatherProxyConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = WeatherProxyConfig::default();
        config.upstream.user_agent = String::new();
        config.logging.level = String::new();
        config.apply_defaults();
        assert_eq!(config.upstream.user_agent, "weather-app/1.0");
        assert_eq!(config.logging.level, "info");
    }
}
