//! Decoding of catalog type codes into SQL type names.
//!
//! `RDB$FIELDS.RDB$FIELD_TYPE` is written in one of two numbering schemes:
//! the SQL-facing codes the client API reports (`SQL_TEXT = 452`, ...) and
//! the engine's internal BLR codes (`blr_text = 14`, ...). Both are mapped
//! onto [`TypeCode`] first, then the subtype decides how generic numeric
//! storage is presented:
//!
//! | subtype | meaning                         |
//! |---------|---------------------------------|
//! | 0       | plain integer / float storage   |
//! | 1       | storage hosts a `NUMERIC(p,s)`  |
//! | 2       | storage hosts a `DECIMAL(p,s)`  |

/// SQL-facing type codes.
pub mod sql {
    pub const TEXT: i16 = 452;
    pub const VARYING: i16 = 448;
    pub const SHORT: i16 = 500;
    pub const LONG: i16 = 496;
    pub const FLOAT: i16 = 482;
    pub const DOUBLE: i16 = 480;
    pub const D_FLOAT: i16 = 530;
    pub const TIMESTAMP: i16 = 510;
    pub const BLOB: i16 = 520;
    pub const ARRAY: i16 = 540;
    pub const QUAD: i16 = 550;
    pub const TYPE_TIME: i16 = 560;
    pub const TYPE_DATE: i16 = 570;
    pub const INT64: i16 = 580;
    pub const NULL: i16 = 32766;
}

/// Internal BLR type codes.
pub mod blr {
    pub const TEXT: i16 = 14;
    pub const TEXT2: i16 = 15;
    pub const SHORT: i16 = 7;
    pub const LONG: i16 = 8;
    pub const QUAD: i16 = 9;
    pub const FLOAT: i16 = 10;
    pub const DOUBLE: i16 = 27;
    pub const D_FLOAT: i16 = 11;
    pub const TIMESTAMP: i16 = 35;
    pub const VARYING: i16 = 37;
    pub const VARYING2: i16 = 38;
    pub const BLOB: i16 = 261;
    pub const CSTRING: i16 = 40;
    pub const CSTRING2: i16 = 41;
    pub const BLOB_ID: i16 = 45;
    pub const SQL_DATE: i16 = 12;
    pub const SQL_TIME: i16 = 13;
    pub const INT64: i16 = 16;
    pub const BLOB2: i16 = 17;
}

/// Subtype marking numeric storage as hosting a `NUMERIC` value.
pub const SUBTYPE_NUMERIC: i16 = 1;

/// Subtype marking numeric storage as hosting a `DECIMAL` value.
pub const SUBTYPE_DECIMAL: i16 = 2;

/// Storage class of a column, independent of numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Char,
    Varchar,
    Short,
    Long,
    Int64,
    Float,
    Double,
    DFloat,
    Quad,
    Timestamp,
    Date,
    Time,
    Blob,
    Array,
}

impl TypeCode {
    /// Normalize a raw base type code from either numbering scheme.
    pub fn from_code(code: i16) -> Option<Self> {
        let tc = match code {
            sql::TEXT | blr::TEXT => TypeCode::Char,
            sql::VARYING | blr::VARYING => TypeCode::Varchar,
            sql::SHORT | blr::SHORT => TypeCode::Short,
            sql::LONG | blr::LONG => TypeCode::Long,
            sql::INT64 | blr::INT64 => TypeCode::Int64,
            sql::FLOAT | blr::FLOAT => TypeCode::Float,
            sql::DOUBLE | blr::DOUBLE => TypeCode::Double,
            sql::D_FLOAT | blr::D_FLOAT => TypeCode::DFloat,
            sql::QUAD | blr::QUAD => TypeCode::Quad,
            sql::TIMESTAMP | blr::TIMESTAMP => TypeCode::Timestamp,
            sql::TYPE_DATE | blr::SQL_DATE => TypeCode::Date,
            sql::TYPE_TIME | blr::SQL_TIME => TypeCode::Time,
            sql::BLOB | blr::BLOB => TypeCode::Blob,
            sql::ARRAY => TypeCode::Array,
            _ => return None,
        };
        Some(tc)
    }

    /// SQL type name for this storage class and subtype, if the pair is known.
    ///
    /// Only the generic numeric storage classes look at the subtype.
    pub fn sql_name(self, sub_type: i16) -> Option<&'static str> {
        let plain = match self {
            TypeCode::Char => return Some("CHAR"),
            TypeCode::Varchar => return Some("VARCHAR"),
            TypeCode::Float => return Some("FLOAT"),
            TypeCode::DFloat => return Some("DOUBLE PRECISION"),
            TypeCode::Quad => return Some("DECIMAL"),
            TypeCode::Timestamp => return Some("TIMESTAMP"),
            TypeCode::Date => return Some("DATE"),
            TypeCode::Time => return Some("TIME"),
            TypeCode::Blob => return Some("BLOB"),
            TypeCode::Array => return Some("ARRAY"),
            TypeCode::Short => "SMALLINT",
            TypeCode::Long => "INTEGER",
            TypeCode::Int64 => "BIGINT",
            TypeCode::Double => "DOUBLE PRECISION",
        };
        match sub_type {
            0 => Some(plain),
            SUBTYPE_NUMERIC => Some("NUMERIC"),
            SUBTYPE_DECIMAL => Some("DECIMAL"),
            _ => None,
        }
    }
}

/// Decode a `(base type, subtype)` pair into a SQL type name.
///
/// Total: unknown combinations decode to `"UNKNOWN <base>, <sub>"` so a
/// catalog carrying newer type codes still yields a full column list.
pub fn decode(code: i16, sub_type: i16) -> String {
    TypeCode::from_code(code)
        .and_then(|tc| tc.sql_name(sub_type))
        .map(str::to_string)
        .unwrap_or_else(|| format!("UNKNOWN {}, {}", code, sub_type))
}
