//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::{CatalogError, Result};
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl ConnectionConfig {
    /// Build a `user:password@host:port/database?charset=...` DSN for the
    /// transport layer.
    pub fn connection_string(&self) -> String {
        let mut dsn = format!(
            "{}:{}@{}:{}/{}?charset={}",
            self.user, self.password, self.host, self.port, self.database, self.charset
        );
        if let Some(role) = &self.role {
            dsn.push_str("&role=");
            dsn.push_str(role);
        }
        dsn
    }

    /// The DSN with the password masked, safe for logs and terminal output.
    pub fn redacted_connection_string(&self) -> String {
        let masked = ConnectionConfig {
            password: "****".to_string(),
            ..self.clone()
        };
        masked.connection_string()
    }

    /// Bytes per character of the configured charset.
    pub fn bytes_per_char(&self) -> Result<u8> {
        charset_width(&self.charset).ok_or_else(|| {
            CatalogError::Config(format!("unknown character set '{}'", self.charset))
        })
    }
}
