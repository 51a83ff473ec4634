//! Error types for catalog introspection.

use thiserror::Error;

/// Main error type for catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The connection capability itself failed (network, auth, transport).
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// A catalog query was rejected, or a row did not have the expected shape.
    #[error("Catalog query failed ({context}): {message}")]
    Query { context: String, message: String },

    /// The catalog returned data that violates a record invariant.
    #[error("Catalog data inconsistency: {0}")]
    DataConsistency(String),

    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a Connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        CatalogError::Connection {
            message: message.into(),
        }
    }

    /// Create a Query error with context about which statement failed.
    pub fn query(context: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Query {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            CatalogError::Config(_) | CatalogError::Yaml(_) => 1,
            CatalogError::Connection { .. } => 2,
            CatalogError::Query { .. } | CatalogError::Json(_) => 3,
            CatalogError::DataConsistency(_) => 4,
            CatalogError::Io(_) => 7,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
