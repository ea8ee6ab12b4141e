//! Configuration management

use crate::error::{ErrorContext, TollgateError, TollgateResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, normally read from `tollgate.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TollgateConfig {
    pub security: SecurityConfig,
    pub server: ServerConfig,
    pub bootstrap: BootstrapConfig,
    pub logging: LoggingConfig,
}

/// Token lifetime and credential hashing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Sliding inactivity window after which a token expires
    pub authentication_timeout_secs: u64,
    /// PBKDF2 rounds used for new and verified credential hashes
    pub hash_iterations: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            authentication_timeout_secs: 30 * 60,
            hash_iterations: 10_000,
        }
    }
}

/// Upper bound for `authentication_timeout_secs`, one year
pub const MAX_AUTHENTICATION_TIMEOUT_SECS: u64 = 365 * 24 * 60 * 60;

impl SecurityConfig {
    /// Values above [`MAX_AUTHENTICATION_TIMEOUT_SECS`] are clamped to it
    pub fn authentication_timeout(&self) -> chrono::Duration {
        let secs = self
            .authentication_timeout_secs
            .min(MAX_AUTHENTICATION_TIMEOUT_SECS);
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::days(365))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Name of the cookie that carries the session id
    pub session_cookie: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_cookie: "tollgate_session".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Account created at startup so a fresh deployment can be administered
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@tollgate.local".to_string(),
            admin_password: "admin".to_string(),
        }
    }
}

impl TollgateConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TollgateResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TollgateError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: TollgateConfig = toml::from_str(&content).map_err(|e| TollgateError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Write configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TollgateResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| TollgateError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| TollgateError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> TollgateResult<()> {
        if self.security.authentication_timeout_secs == 0 {
            return Err(crate::validation_error!(
                "Authentication timeout must be greater than 0",
                "security.authentication_timeout_secs",
                "config"
            ));
        }

        if self.security.authentication_timeout_secs > MAX_AUTHENTICATION_TIMEOUT_SECS {
            return Err(crate::validation_error!(
                format!(
                    "Authentication timeout must be at most {} seconds",
                    MAX_AUTHENTICATION_TIMEOUT_SECS
                ),
                "security.authentication_timeout_secs",
                "config"
            ));
        }

        if self.security.hash_iterations == 0 {
            return Err(crate::validation_error!(
                "Hash iterations must be greater than 0",
                "security.hash_iterations",
                "config"
            ));
        }

        if self.server.session_cookie.is_empty() {
            return Err(crate::validation_error!(
                "Session cookie name must not be empty",
                "server.session_cookie",
                "config"
            ));
        }

        if self.bootstrap.admin_email.is_empty() {
            return Err(crate::validation_error!(
                "Administrator email must not be empty",
                "bootstrap.admin_email",
                "config"
            ));
        }

        Ok(())
    }
}
