//! Configuration type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection settings, consumed by the transport layer.
    pub connection: ConnectionConfig,
}

/// Connection settings for the database whose catalog is inspected.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 3050).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database path or alias on the server.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Connection character set (default: "UTF8"). Determines how byte
    /// lengths in the catalog translate into character counts.
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Optional SQL role to connect with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("charset", &self.charset)
            .field("role", &self.role)
            .finish()
    }
}

/// Bytes per character for the character sets the catalog is commonly
/// read through. `None` for sets this crate does not know.
pub fn charset_width(charset: &str) -> Option<u8> {
    let width = match charset.to_uppercase().as_str() {
        "UTF8" | "UTF-8" => 4,
        "UNICODE_FSS" => 3,
        "SJIS_0208" | "EUCJ_0208" | "KSC_5601" | "BIG_5" | "GB_2312" | "GBK" | "CP943C" => 2,
        "NONE" | "OCTETS" | "ASCII" | "ISO8859_1" | "ISO8859_2" | "ISO8859_15" | "KOI8R"
        | "KOI8U" | "DOS437" | "DOS850" | "DOS866" | "WIN1250" | "WIN1251" | "WIN1252"
        | "WIN1253" | "WIN1254" | "WIN1257" => 1,
        _ => return None,
    };
    Some(width)
}

// Default value functions for serde
fn default_port() -> u16 {
    3050
}

fn default_charset() -> String {
    "UTF8".to_string()
}
