//! Identifier handling for catalog names.
//!
//! The system tables store identifiers in fixed-width CHAR columns, so every
//! name read back carries trailing padding. Names going the other way are
//! bound as parameters wherever the engine allows it; the few statements that
//! need an identifier spliced into the SQL text (sequence stepping) go
//! through [`sequence_reference`], which validates and quotes.

use crate::error::{CatalogError, Result};

/// Maximum identifier length in bytes: 63 UTF-8 characters of up to four
/// bytes each, the engine limit from version 4 onwards.
const MAX_IDENTIFIER_LENGTH: usize = 252;

/// Prefix reserved for engine-generated objects.
pub const SYSTEM_PREFIX: &str = "RDB$";

/// Trim the trailing padding of a fixed-width catalog identifier.
pub fn trim_padding(name: &str) -> &str {
    name.trim_end()
}

/// Check if a name belongs to an engine-generated object.
pub fn is_system_name(name: &str) -> bool {
    name.starts_with(SYSTEM_PREFIX)
}

/// Validate an identifier for security issues.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes (injection vector)
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `CatalogError::Config` for invalid identifiers with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CatalogError::Config(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(CatalogError::Config(format!(
            "SECURITY: Identifier contains null byte (possible injection attempt): {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(CatalogError::Config(format!(
            "SECURITY: Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Quote an identifier with double quotes, doubling embedded quotes.
///
/// Quoted identifiers are case-sensitive.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_ident("Orders")?, "\"Orders\"");
/// assert_eq!(quote_ident("a\"b")?, "\"a\"\"b\"");
/// ```
pub fn quote_ident(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Check if a name is a regular (unquoted) identifier as the catalog stores
/// it: upper-case letter first, then upper-case letters, digits, `_` or `$`.
pub fn is_regular_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '$')
}

/// Render a name for splicing into SQL text.
///
/// Regular identifiers are emitted bare so they resolve exactly as the
/// catalog stored them; anything else is quoted.
pub fn sequence_reference(name: &str) -> Result<String> {
    validate_identifier(name)?;
    if is_regular_identifier(name) {
        Ok(name.to_string())
    } else {
        quote_ident(name)
    }
}
