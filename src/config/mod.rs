use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub connection_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl DatabaseConfig {
    /// In-memory store, mostly useful for tests
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            connection_timeout_seconds: 30,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string());

        let connection_timeout_seconds = std::env::var("DATABASE_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_CONNECTION_TIMEOUT value".to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                connection_timeout_seconds,
            },
            server: ServerConfig { host, port },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(Error::Config("DATABASE_URL must not be empty".to_string()));
        }

        if !self.database.url.starts_with("sqlite:") {
            return Err(Error::Config(
                "DATABASE_URL must be a sqlite: URL".to_string(),
            ));
        }

        if self.database.connection_timeout_seconds == 0 {
            return Err(Error::Config(
                "Connection timeout must be non-zero".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings {
            database: DatabaseConfig::in_memory(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
        };

        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());

        settings.server.port = 3000;
        settings.database.url = "mysql://localhost/recipes".to_string();
        assert!(settings.validate().is_err());

        settings.database = DatabaseConfig::in_memory();
        settings.database.connection_timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }
}
