//! API configuration

use std::time::Duration;

use serde::Deserialize;

use domain_lostfound::PasswordPolicy;
use infra_db::DatabaseConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Pool size
    pub db_max_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Shared password for the student role
    pub student_password: String,
    /// Shared password for the faculty role
    pub faculty_password: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let passwords = PasswordPolicy::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/lostfound".to_string(),
            db_max_connections: 10,
            db_acquire_timeout_secs: 30,
            log_level: "info".to_string(),
            student_password: passwords.student,
            faculty_password: passwords.faculty,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset variables keep their defaults; `DATABASE_URL` is honoured when
    /// `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Environment::with_prefix("API"));

        if std::env::var("API_DATABASE_URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                builder = builder.set_override("database_url", url)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for the store
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.db_max_connections)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }

    /// Per-role login passwords
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            student: self.student_password.clone(),
            faculty: self.faculty_password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.password_policy(), PasswordPolicy::default());
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.jwt_expiration_secs, 3600);
        assert_eq!(config.faculty_password, "Faculty@123");
    }

    #[test]
    fn test_database_config_follows_api_settings() {
        let config = ApiConfig {
            database_url: "postgres://db/lostfound".to_string(),
            db_max_connections: 1,
            db_acquire_timeout_secs: 5,
            ..ApiConfig::default()
        };
        let db = config.database_config();

        assert_eq!(db.url, "postgres://db/lostfound");
        assert_eq!(db.max_connections, 1);
        assert_eq!(db.min_connections, 1);
        assert_eq!(db.connect_timeout, Duration::from_secs(5));
    }
}
