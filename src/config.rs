//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Outbound email configuration
    pub email: EmailConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite file path or `sqlite:` URL
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

/// How notification emails leave the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// The handler awaits the send before responding
    Inline,
    /// The handler enqueues the email and a worker task sends it
    Background,
}

impl DeliveryMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inline" | "sync" => Some(Self::Inline),
            "background" | "queued" => Some(Self::Background),
            _ => None,
        }
    }
}

/// Outbound email configuration
#[derive(Clone)]
pub struct EmailConfig {
    /// Sender address placed in the `From` header
    pub sender: String,
    /// Site owner address that receives every notification
    pub recipient: String,
    /// Base URL of the HTTP email API; `None` selects the console transport
    pub api_base_url: Option<String>,
    /// Server token for the HTTP email API
    pub api_token: String,
    /// Per-request timeout for the HTTP email API
    pub timeout: Duration,
    /// Inline or background delivery
    pub delivery: DeliveryMode,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &"[redacted]")
            .field("timeout", &self.timeout)
            .field("delivery", &self.delivery)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            server: ServerConfig {
                port: non_empty("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            },
            database: DatabaseConfig {
                url: non_empty("DATABASE_URL")
                    .unwrap_or_else(|| "data/contact_form.db".to_string()),
                max_connections: non_empty("DATABASE_MAX_CONNECTIONS")
                    .and_then(|n| n.parse().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(5),
            },
            email: EmailConfig {
                sender: non_empty("EMAIL_FROM")
                    .unwrap_or_else(|| "noreply@localhost".to_string()),
                recipient: non_empty("EMAIL_TO").unwrap_or_else(|| "admin@localhost".to_string()),
                api_base_url: non_empty("EMAIL_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string()),
                api_token: lookup("EMAIL_API_TOKEN").unwrap_or_default(),
                timeout: Duration::from_secs(
                    non_empty("EMAIL_TIMEOUT_SECS")
                        .and_then(|t| t.parse().ok())
                        .unwrap_or(10),
                ),
                delivery: non_empty("EMAIL_DELIVERY")
                    .and_then(|mode| DeliveryMode::parse(&mode))
                    .unwrap_or(DeliveryMode::Inline),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "data/contact_form.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.email.recipient, "admin@localhost");
        assert!(config.email.api_base_url.is_none());
        assert_eq!(config.email.timeout, Duration::from_secs(10));
        assert_eq!(config.email.delivery, DeliveryMode::Inline);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("HOST", "127.0.0.1"),
            ("EMAIL_API_URL", "https://api.mail.test/"),
            ("EMAIL_DELIVERY", "Background"),
            ("EMAIL_TIMEOUT_SECS", "3"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]);
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
        assert_eq!(
            config.email.api_base_url.as_deref(),
            Some("https://api.mail.test")
        );
        assert_eq!(config.email.delivery, DeliveryMode::Background);
        assert_eq!(config.email.timeout, Duration::from_secs(3));
        // zero connections falls back to the default pool size
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("EMAIL_DELIVERY", "carrier-pigeon")]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.email.delivery, DeliveryMode::Inline);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = config_from(&[("EMAIL_API_TOKEN", "super-secret")]);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("EMAIL_TO", "owner@example.com");
        let config = Config::from_env();
        env::remove_var("EMAIL_TO");
        assert_eq!(config.email.recipient, "owner@example.com");
    }
}
