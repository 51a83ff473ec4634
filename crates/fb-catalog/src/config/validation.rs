//! Configuration validation.

use super::{charset_width, Config};
use crate::error::{CatalogError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let conn = &config.connection;

    if conn.host.is_empty() {
        return Err(CatalogError::Config("connection.host is required".into()));
    }
    if conn.port == 0 {
        return Err(CatalogError::Config(
            "connection.port must be non-zero".into(),
        ));
    }
    if conn.database.is_empty() {
        return Err(CatalogError::Config(
            "connection.database is required".into(),
        ));
    }
    if conn.user.is_empty() {
        return Err(CatalogError::Config("connection.user is required".into()));
    }
    if charset_width(&conn.charset).is_none() {
        return Err(CatalogError::Config(format!(
            "connection.charset '{}' is not a known character set",
            conn.charset
        )));
    }
    if let Some(role) = &conn.role {
        if role.trim().is_empty() {
            return Err(CatalogError::Config(
                "connection.role must not be blank when set".into(),
            ));
        }
    }

    Ok(())
}
