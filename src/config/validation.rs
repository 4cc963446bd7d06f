//! Validation rules for loaded settings.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// The pool only speaks Postgres.
const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Rules:
    /// - URL non-empty with a postgres scheme
    /// - `1 <= min_connections <= max_connections`
    /// - connection timeout above zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if self.rotation.max_size == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_size",
                "Maximum file size must be greater than 0 bytes.",
            ));
        }

        if self.rotation.max_files == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_files",
                "Maximum number of rotated files must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/catalog".to_string();
        settings
    }

    fn failing_field(settings: &Settings) -> String {
        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_server_rules() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        assert_eq!(failing_field(&settings), "server.port");

        let mut settings = valid_settings();
        settings.server.request_timeout = 0;
        assert_eq!(failing_field(&settings), "server.request_timeout");

        let mut settings = valid_settings();
        settings.server.keep_alive_timeout = 0;
        assert_eq!(failing_field(&settings), "server.keep_alive_timeout");

        let mut settings = valid_settings();
        settings.server.port = 65535;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_database_url_rules() {
        let mut settings = valid_settings();
        settings.database.url = "  ".to_string();
        assert_eq!(failing_field(&settings), "database.url");

        settings.database.url = "mysql://localhost/catalog".to_string();
        assert_eq!(failing_field(&settings), "database.url");

        settings.database.url = "postgresql://user:pass@db:5432/catalog".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_database_pool_rules() {
        let mut settings = valid_settings();
        settings.database.min_connections = 0;
        assert_eq!(failing_field(&settings), "database.min_connections");

        let mut settings = valid_settings();
        settings.database.max_connections = 2;
        settings.database.min_connections = 3;
        assert_eq!(failing_field(&settings), "database.min_connections");

        let mut settings = valid_settings();
        settings.database.max_connections = 0;
        assert_eq!(failing_field(&settings), "database.max_connections");

        let mut settings = valid_settings();
        settings.database.connection_timeout = 0;
        assert_eq!(failing_field(&settings), "database.connection_timeout");
    }

    #[test]
    fn test_logger_rules() {
        let mut settings = valid_settings();
        settings.logger.level = "chatty".to_string();
        assert_eq!(failing_field(&settings), "logger.level");

        let mut settings = valid_settings();
        settings.logger.level = "WARN".to_string();
        assert!(settings.validate().is_ok());

        let mut settings = valid_settings();
        settings.logger.file.format = "xml".to_string();
        assert_eq!(failing_field(&settings), "logger.file.format");

        let mut settings = valid_settings();
        settings.logger.file.enabled = true;
        settings.logger.file.path = String::new();
        assert_eq!(failing_field(&settings), "logger.file.path");

        let mut settings = valid_settings();
        settings.logger.file.rotation.max_files = 0;
        assert_eq!(failing_field(&settings), "logger.file.rotation.max_files");

        let mut settings = valid_settings();
        settings.logger.console.enabled = false;
        assert_eq!(failing_field(&settings), "logger");
    }
}
