//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present
//! and valid or the application exits with a clear error message.

use std::env;

use thiserror::Error;

/// Application environment mode.
///
/// Controls enforcement behavior: development allows permissive defaults
/// with WARN-level logging, production refuses them at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Parse from the `APP_ENV` environment variable value.
    /// Defaults to `Development` if unset or unrecognized.
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => {
                tracing::warn!(
                    value = other,
                    "Unrecognized APP_ENV value, defaulting to Development"
                );
                Self::Development
            }
        }
    }

    /// Returns true if this is production mode.
    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application environment (development or production).
    pub app_env: AppEnvironment,

    /// PostgreSQL connection string.
    pub database_url: String,

    /// Tracing filter directive (e.g., "info,upline=debug").
    pub rust_log: String,

    /// Allowed CORS origins (comma-separated URLs or "*" for development).
    pub cors_origins: Vec<String>,

    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,

    /// Readiness probe database ping timeout in seconds.
    pub health_db_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// are invalid.
    ///
    /// # Required Variables
    ///
    /// - `DATABASE_URL` - PostgreSQL connection string
    ///
    /// # Optional Variables
    ///
    /// - `APP_ENV` - "development" (default) or "production"
    /// - `RUST_LOG` - Log level filter (default: "info")
    /// - `CORS_ORIGINS` - Comma-separated allowed origins (default: "*")
    /// - `HOST` - Bind address (default: "0.0.0.0")
    /// - `PORT` - Listen port (default: 8080)
    /// - `HEALTH_DB_TIMEOUT_SECS` - Readiness ping timeout (default: 2)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let app_env = AppEnvironment::from_env_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        validate_cors_origins(&cors_origins, &app_env)?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        let health_db_timeout_secs = env::var("HEALTH_DB_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(2)
            .max(1);

        Ok(Config {
            app_env,
            database_url,
            rust_log,
            cors_origins,
            host,
            port,
            health_db_timeout_secs,
        })
    }

    /// Get the server bind address as a socket address string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate security-sensitive settings for the current environment.
    ///
    /// In **production** mode: returns `Err(errors)` listing the problems.
    /// In **development** mode: returns `Ok(warnings)` listing them.
    pub fn validate_security_config(&self) -> Result<Vec<String>, Vec<String>> {
        let mut issues = Vec::new();

        if self.cors_origins.iter().any(|o| o == "*") {
            issues.push(
                "CORS_ORIGINS contains wildcard '*' which is not allowed in production".to_string(),
            );
        }

        if issues.is_empty() {
            return Ok(Vec::new());
        }

        if self.app_env.is_production() {
            Err(issues)
        } else {
            Ok(issues)
        }
    }
}

/// Validate CORS origin URL formats at startup.
///
/// In production mode, invalid URLs cause a startup error; in development
/// they produce a warning. The wildcard "*" origin is allowed through here
/// and rejected separately by `validate_security_config`.
fn validate_cors_origins(origins: &[String], app_env: &AppEnvironment) -> Result<(), ConfigError> {
    for origin in origins {
        if origin == "*" {
            continue;
        }

        let is_valid = origin.starts_with("http://") || origin.starts_with("https://");
        if !is_valid {
            let msg = format!(
                "CORS origin '{origin}' is not a valid URL (must start with http:// or https://)"
            );
            if app_env.is_production() {
                return Err(ConfigError::InvalidValue {
                    var: "CORS_ORIGINS".to_string(),
                    message: msg,
                });
            }
            tracing::warn!(origin = %origin, "{}", msg);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            app_env: AppEnvironment::Development,
            database_url: "postgres://localhost/upline".to_string(),
            rust_log: "info".to_string(),
            cors_origins: vec!["*".to_string()],
            host: "127.0.0.1".to_string(),
            port: 3000,
            health_db_timeout_secs: 2,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingVar("DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: DATABASE_URL"
        );
    }

    #[test]
    fn test_bind_addr() {
        let config = test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_app_environment_parse() {
        assert_eq!(
            AppEnvironment::from_env_str("production"),
            AppEnvironment::Production
        );
        assert_eq!(
            AppEnvironment::from_env_str("prod"),
            AppEnvironment::Production
        );
        assert_eq!(
            AppEnvironment::from_env_str("dev"),
            AppEnvironment::Development
        );
        assert_eq!(
            AppEnvironment::from_env_str("staging"),
            AppEnvironment::Development
        );
    }

    #[test]
    fn test_production_rejects_cors_wildcard() {
        let mut config = test_config();
        config.app_env = AppEnvironment::Production;

        let result = config.validate_security_config();
        assert!(result.is_err());
        let errors = result.unwrap_err();
        assert!(errors.iter().any(|e| e.contains("CORS_ORIGINS")));
    }

    #[test]
    fn test_development_warns_on_cors_wildcard() {
        let config = test_config();
        let result = config.validate_security_config();
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_explicit_origins_pass_in_production() {
        let mut config = test_config();
        config.app_env = AppEnvironment::Production;
        config.cors_origins = vec!["https://portal.example.gov".to_string()];

        let result = config.validate_security_config();
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_cors_origin_format_validation() {
        let origins = vec!["not-a-url".to_string()];
        assert!(validate_cors_origins(&origins, &AppEnvironment::Production).is_err());
        assert!(validate_cors_origins(&origins, &AppEnvironment::Development).is_ok());

        let valid = vec!["https://portal.example.gov".to_string()];
        assert!(validate_cors_origins(&valid, &AppEnvironment::Production).is_ok());
    }
}
