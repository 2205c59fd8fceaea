//! Error types for the weather proxy

use thiserror::Error;

/// Main error type for the weather proxy
#[derive(Error, Debug)]
pub enum WeatherProxyError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream client construction errors
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// HTTP server errors
    #[error("Server error: {message}")]
    Server { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherProxyError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new server error
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherProxyError::config("port must be non-zero");
        assert!(matches!(config_err, WeatherProxyError::Config { .. }));

        let upstream_err = WeatherProxyError::upstream("invalid header");
        assert!(matches!(upstream_err, WeatherProxyError::Upstream { .. }));

        let server_err = WeatherProxyError::server("bind failed");
        assert!(matches!(server_err, WeatherProxyError::Server { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = WeatherProxyError::config("bad port");
        assert_eq!(err.to_string(), "Configuration error: bad port");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: WeatherProxyError = io_err.into();
        assert!(matches!(err, WeatherProxyError::Io { .. }));
    }
}
