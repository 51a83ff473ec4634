//! In-memory catalog connection for unit tests.
//!
//! Serves the handful of `RDB$` tables the resolvers read, recognizing each
//! statement by its exact text. Identifiers are returned space-padded to the
//! catalog's fixed CHAR width, as a real server does.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::{CatalogConnection, CatalogRow, CatalogValue, RowCursor};
use crate::error::{CatalogError, Result};
use crate::resolver::columns::COLUMNS_SQL;
use crate::resolver::indexes::{INDEX_HEADERS_SQL, INDEX_SEGMENTS_SQL, TABLE_INDEX_HEADERS_SQL};
use crate::resolver::names::{
    PROCEDURE_NAMES_SQL, ROLE_NAMES_SQL, SEQUENCE_NAMES_SQL, TABLE_NAMES_SQL, TRIGGER_NAMES_SQL,
    VIEW_NAMES_SQL,
};
use crate::resolver::primary_key::PRIMARY_KEY_SQL;
use crate::typemap::blr;

const NAME_WIDTH: usize = 31;

fn padded(name: &str) -> CatalogValue {
    CatalogValue::Text(format!("{:<width$}", name, width = NAME_WIDTH))
}

fn opt_int(v: Option<i64>) -> CatalogValue {
    v.map_or(CatalogValue::Null, CatalogValue::Int)
}

fn opt_small(v: Option<i16>) -> CatalogValue {
    v.map_or(CatalogValue::Null, CatalogValue::from)
}

/// A row of `RDB$FIELDS`.
#[derive(Debug, Clone)]
pub(crate) struct FakeDomain {
    pub name: String,
    pub type_code: i16,
    pub sub_type: Option<i16>,
    pub length: i16,
    pub precision: Option<i16>,
    pub scale: Option<i16>,
    pub default: Option<String>,
    pub null_flag: Option<i64>,
}

impl FakeDomain {
    pub fn new(name: &str, type_code: i16, sub_type: Option<i16>, length: i16) -> Self {
        Self {
            name: name.to_string(),
            type_code,
            sub_type,
            length,
            precision: None,
            scale: Some(0),
            default: None,
            null_flag: None,
        }
    }

    pub fn numeric(mut self, precision: i16, scale: i16) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn precision(mut self, precision: i16) -> Self {
        self.precision = Some(precision);
        self
    }
}

#[derive(Debug, Clone)]
struct FakeField {
    relation: String,
    name: String,
    source: String,
    position: usize,
    default: Option<String>,
    null_flag: Option<i64>,
}

#[derive(Debug, Clone)]
struct FakeRelation {
    name: String,
    system_flag: Option<i64>,
    is_view: bool,
    flags: Option<i64>,
}

#[derive(Debug, Clone)]
struct FakeIndex {
    name: String,
    relation: String,
    unique: Option<i64>,
    index_type: Option<i64>,
    segments: Vec<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    open_cursors: usize,
    max_open_cursors: usize,
    queries: usize,
    executed: Vec<String>,
    fail_pattern: Option<String>,
    fail_fetch_after: Option<usize>,
    sequence_values: HashMap<String, i64>,
}

/// Fake [`CatalogConnection`] over in-memory system tables.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    domains: Vec<FakeDomain>,
    fields: Vec<FakeField>,
    relations: Vec<FakeRelation>,
    indices: Vec<FakeIndex>,
    primary_keys: Vec<(String, String)>,
    procedures: Vec<String>,
    roles: Vec<(String, i64)>,
    triggers: Vec<(String, i64)>,
    sequences: Vec<(String, Option<i64>)>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_domain(&mut self, domain: FakeDomain) {
        self.domains.push(domain);
    }

    pub fn add_domain(
        &mut self,
        name: &str,
        type_code: i16,
        sub_type: Option<i16>,
        length: i16,
        default: Option<&str>,
        null_flag: Option<i64>,
    ) {
        let mut domain = FakeDomain::new(name, type_code, sub_type, length);
        domain.default = default.map(str::to_string);
        domain.null_flag = null_flag;
        self.insert_domain(domain);
    }

    pub fn add_column(
        &mut self,
        relation: &str,
        name: &str,
        source: &str,
        default: Option<&str>,
        null_flag: Option<i64>,
    ) {
        let position = self.fields.iter().filter(|f| f.relation == relation).count();
        self.fields.push(FakeField {
            relation: relation.to_string(),
            name: name.to_string(),
            source: source.to_string(),
            position,
            default: default.map(str::to_string),
            null_flag,
        });
    }

    /// Add a column backed by its own anonymous `RDB$<n>` domain.
    pub fn add_inline_column(
        &mut self,
        relation: &str,
        name: &str,
        domain: FakeDomain,
        default: Option<&str>,
        null_flag: Option<i64>,
    ) {
        let source = format!("RDB${}", self.domains.len() + 1);
        self.insert_domain(FakeDomain {
            name: source.clone(),
            ..domain
        });
        self.add_column(relation, name, &source, default, null_flag);
    }

    pub fn add_relation(&mut self, name: &str, system_flag: Option<i64>) {
        self.relations.push(FakeRelation {
            name: name.to_string(),
            system_flag,
            is_view: false,
            flags: Some(1),
        });
    }

    /// Add a user view. `current` views carry `RDB$FLAGS = 1`.
    pub fn add_view(&mut self, name: &str, current: bool) {
        self.relations.push(FakeRelation {
            name: name.to_string(),
            system_flag: Some(0),
            is_view: true,
            flags: Some(if current { 1 } else { 0 }),
        });
    }

    pub fn add_index(
        &mut self,
        name: &str,
        relation: &str,
        unique: Option<i64>,
        index_type: Option<i64>,
        segments: &[&str],
    ) {
        self.indices.push(FakeIndex {
            name: name.to_string(),
            relation: relation.to_string(),
            unique,
            index_type,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        });
    }

    pub fn add_primary_key_constraint(&mut self, relation: &str, index_name: &str) {
        self.primary_keys
            .push((relation.to_string(), index_name.to_string()));
    }

    pub fn add_procedure(&mut self, name: &str) {
        self.procedures.push(name.to_string());
    }

    pub fn add_role(&mut self, name: &str, system_flag: i64) {
        self.roles.push((name.to_string(), system_flag));
    }

    pub fn add_trigger(&mut self, name: &str, system_flag: i64) {
        self.triggers.push((name.to_string(), system_flag));
    }

    pub fn add_sequence(&mut self, name: &str, system_flag: Option<i64>) {
        self.sequences.push((name.to_string(), system_flag));
    }

    /// Fail every statement whose text contains `pattern`.
    pub fn fail_queries_matching(&self, pattern: &str) {
        self.state.lock().unwrap().fail_pattern = Some(pattern.to_string());
    }

    /// Cursors opened from now on fail after yielding `rows` rows.
    pub fn fail_fetch_after(&self, rows: usize) {
        self.state.lock().unwrap().fail_fetch_after = Some(rows);
    }

    pub fn open_cursors(&self) -> usize {
        self.state.lock().unwrap().open_cursors
    }

    pub fn max_concurrent_cursors(&self) -> usize {
        self.state.lock().unwrap().max_open_cursors
    }

    pub fn queries_issued(&self) -> usize {
        self.state.lock().unwrap().queries
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    fn check_failure(&self, sql: &str) -> Result<()> {
        let state = self.state.lock().unwrap();
        match &state.fail_pattern {
            Some(p) if sql.contains(p.as_str()) => Err(CatalogError::query(
                "fake",
                format!("statement rejected: {}", p),
            )),
            _ => Ok(()),
        }
    }

    fn rows_for(&self, sql: &str, params: &[CatalogValue]) -> Result<Vec<CatalogRow>> {
        if sql == COLUMNS_SQL {
            Ok(self.column_rows(text_param(params)?))
        } else if sql == INDEX_HEADERS_SQL {
            Ok(self.index_header_rows(None))
        } else if sql == TABLE_INDEX_HEADERS_SQL {
            Ok(self.index_header_rows(Some(text_param(params)?)))
        } else if sql == INDEX_SEGMENTS_SQL {
            Ok(self.segment_rows(text_param(params)?))
        } else if sql == PRIMARY_KEY_SQL {
            Ok(self.primary_key_rows(text_param(params)?))
        } else if sql == TABLE_NAMES_SQL {
            Ok(name_rows(self.relations.iter().filter(|r| {
                r.system_flag != Some(1) && !r.is_view
            }).map(|r| r.name.as_str())))
        } else if sql == VIEW_NAMES_SQL {
            Ok(name_rows(self.relations.iter().filter(|r| {
                r.system_flag != Some(1) && r.is_view && r.flags == Some(1)
            }).map(|r| r.name.as_str())))
        } else if sql == PROCEDURE_NAMES_SQL {
            Ok(name_rows(self.procedures.iter().map(String::as_str)))
        } else if sql == ROLE_NAMES_SQL {
            Ok(name_rows(
                self.roles.iter().filter(|r| r.1 == 0).map(|r| r.0.as_str()),
            ))
        } else if sql == TRIGGER_NAMES_SQL {
            Ok(name_rows(
                self.triggers.iter().filter(|t| t.1 == 0).map(|t| t.0.as_str()),
            ))
        } else if sql == SEQUENCE_NAMES_SQL {
            Ok(name_rows(
                self.sequences
                    .iter()
                    .filter(|s| s.1 != Some(1))
                    .map(|s| s.0.as_str()),
            ))
        } else {
            Err(CatalogError::query("fake", "unrecognized statement"))
        }
    }

    fn column_rows(&self, table: &str) -> Vec<CatalogRow> {
        let mut fields: Vec<&FakeField> =
            self.fields.iter().filter(|f| f.relation == table).collect();
        fields.sort_by_key(|f| f.position);

        fields
            .into_iter()
            .filter_map(|field| {
                let domain = self.domains.iter().find(|d| d.name == field.source)?;
                // column-level default comes back decoded, domain default as a raw blob
                let default = match (&field.default, &domain.default) {
                    (Some(d), _) => CatalogValue::Text(d.clone()),
                    (None, Some(d)) => CatalogValue::Bytes(d.clone().into_bytes()),
                    (None, None) => CatalogValue::Null,
                };
                Some(CatalogRow::new(vec![
                    padded(&field.name),
                    padded(&field.source),
                    CatalogValue::from(domain.type_code),
                    opt_small(domain.sub_type),
                    CatalogValue::from(domain.length),
                    opt_small(domain.precision),
                    opt_small(domain.scale),
                    default,
                    opt_int(field.null_flag.or(domain.null_flag)),
                ]))
            })
            .collect()
    }

    fn index_header_rows(&self, table: Option<&str>) -> Vec<CatalogRow> {
        self.indices
            .iter()
            .filter(|ix| {
                self.relations
                    .iter()
                    .any(|r| r.name == ix.relation && r.system_flag != Some(1))
            })
            .filter(|ix| table.map_or(true, |t| ix.relation == t))
            .map(|ix| {
                CatalogRow::new(vec![
                    padded(&ix.relation),
                    padded(&ix.name),
                    opt_int(ix.unique),
                    opt_int(ix.index_type),
                ])
            })
            .collect()
    }

    fn segment_rows(&self, index_name: &str) -> Vec<CatalogRow> {
        self.indices
            .iter()
            .filter(|ix| ix.name == index_name)
            .flat_map(|ix| ix.segments.iter())
            .map(|s| CatalogRow::new(vec![padded(s)]))
            .collect()
    }

    fn primary_key_rows(&self, table: &str) -> Vec<CatalogRow> {
        self.indices
            .iter()
            .filter(|ix| ix.relation == table)
            .filter(|ix| {
                self.primary_keys
                    .iter()
                    .any(|(rel, idx)| rel == table && *idx == ix.name)
            })
            .flat_map(|ix| ix.segments.iter())
            .map(|s| CatalogRow::new(vec![padded(s)]))
            .collect()
    }

    fn next_sequence_value(&self, sql: &str) -> Result<CatalogValue> {
        let name = sql
            .strip_prefix("SELECT NEXT VALUE FOR ")
            .and_then(|rest| rest.strip_suffix(" FROM RDB$DATABASE"))
            .ok_or_else(|| CatalogError::query("fake", "unrecognized statement"))?;
        let name = match name.strip_prefix('"').and_then(|n| n.strip_suffix('"')) {
            Some(quoted) => quoted.replace("\"\"", "\""),
            None => name.to_string(),
        };

        if !self.sequences.iter().any(|s| s.0 == name) {
            return Err(CatalogError::query(
                "fake",
                format!("Generator {} is not defined", name),
            ));
        }
        let mut state = self.state.lock().unwrap();
        let value = state.sequence_values.entry(name).or_insert(0);
        *value += 1;
        Ok(CatalogValue::Int(*value))
    }
}

fn text_param(params: &[CatalogValue]) -> Result<&str> {
    match params.first() {
        Some(CatalogValue::Text(s)) => Ok(s.as_str()),
        _ => Err(CatalogError::query("fake", "expected one text parameter")),
    }
}

fn name_rows<'a>(names: impl Iterator<Item = &'a str>) -> Vec<CatalogRow> {
    let mut names: Vec<&str> = names.collect();
    names.sort_unstable();
    names
        .into_iter()
        .map(|n| CatalogRow::new(vec![padded(n)]))
        .collect()
}

#[async_trait]
impl CatalogConnection for FakeCatalog {
    async fn query(&self, sql: &str, params: &[CatalogValue]) -> Result<Box<dyn RowCursor>> {
        self.state.lock().unwrap().queries += 1;
        self.check_failure(sql)?;
        let rows = self.rows_for(sql, params)?;

        let mut state = self.state.lock().unwrap();
        state.open_cursors += 1;
        state.max_open_cursors = state.max_open_cursors.max(state.open_cursors);
        Ok(Box::new(FakeCursor {
            rows: rows.into_iter(),
            served: 0,
            fail_after: state.fail_fetch_after,
            closed: false,
            state: self.state.clone(),
        }))
    }

    async fn query_scalar(&self, sql: &str, _params: &[CatalogValue]) -> Result<CatalogValue> {
        self.state.lock().unwrap().queries += 1;
        self.check_failure(sql)?;
        self.next_sequence_value(sql)
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        self.check_failure(sql)?;
        self.state.lock().unwrap().executed.push(sql.to_string());
        Ok(0)
    }
}

struct FakeCursor {
    rows: std::vec::IntoIter<CatalogRow>,
    served: usize,
    fail_after: Option<usize>,
    closed: bool,
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl RowCursor for FakeCursor {
    async fn next_row(&mut self) -> Result<Option<CatalogRow>> {
        if self.fail_after == Some(self.served) {
            return Err(CatalogError::connection("connection reset while fetching"));
        }
        self.served += 1;
        Ok(self.rows.next())
    }

    async fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.state.lock().unwrap().open_cursors -= 1;
        }
        Ok(())
    }
}

/// The `TEST` table from the sample schema, as a UTF8 database stores it:
///
/// ```sql
/// CREATE DOMAIN ALPHA VARCHAR(26);
/// CREATE DOMAIN ALPHABET CHAR(26);
/// CREATE DOMAIN BOOLEAN INTEGER;
/// CREATE TABLE TEST (
///     ID BIGINT PRIMARY KEY NOT NULL, FLAG BOOLEAN, BINARY BLOB, I INTEGER,
///     I32 INTEGER DEFAULT 0, I64 BIGINT, F32 FLOAT,
///     F64 DOUBLE PRECISION DEFAULT    0.0, C CHAR, CS ALPHABET, V VARCHAR(1),
///     VS ALPHA, M BLOB SUB_TYPE TEXT, DT DATE, TM TIME, TS TIMESTAMP,
///     N92 NUMERIC(9,2), D92 DECIMAL(9,2));
/// ```
pub(crate) fn sample_catalog() -> FakeCatalog {
    let mut fake = FakeCatalog::new();
    fake.insert_domain(FakeDomain::new("ALPHA", blr::VARYING, Some(0), 104));
    fake.insert_domain(FakeDomain::new("ALPHABET", blr::TEXT, Some(0), 104));
    fake.insert_domain(FakeDomain::new("BOOLEAN", blr::LONG, Some(0), 4).precision(0));
    fake.add_relation("TEST", None);

    let int = |code, len| FakeDomain::new("", code, Some(0), len).precision(0);
    let plain = |code, sub, len| FakeDomain::new("", code, sub, len);

    fake.add_inline_column("TEST", "ID", int(blr::INT64, 8), None, Some(1));
    fake.add_column("TEST", "FLAG", "BOOLEAN", None, None);
    fake.add_inline_column("TEST", "BINARY", plain(blr::BLOB, Some(0), 8), None, None);
    fake.add_inline_column("TEST", "I", int(blr::LONG, 4), None, None);
    fake.add_inline_column("TEST", "I32", int(blr::LONG, 4), Some("DEFAULT 0"), None);
    fake.add_inline_column("TEST", "I64", int(blr::INT64, 8), None, None);
    fake.add_inline_column("TEST", "F32", plain(blr::FLOAT, None, 4), None, None);
    fake.add_inline_column(
        "TEST",
        "F64",
        plain(blr::DOUBLE, None, 8),
        Some("DEFAULT    0.0"),
        None,
    );
    fake.add_inline_column("TEST", "C", plain(blr::TEXT, Some(0), 4), None, None);
    fake.add_column("TEST", "CS", "ALPHABET", None, None);
    fake.add_inline_column("TEST", "V", plain(blr::VARYING, Some(0), 4), None, None);
    fake.add_column("TEST", "VS", "ALPHA", None, None);
    fake.add_inline_column("TEST", "M", plain(blr::BLOB, Some(1), 8), None, None);
    fake.add_inline_column("TEST", "DT", plain(blr::SQL_DATE, None, 4), None, None);
    fake.add_inline_column("TEST", "TM", plain(blr::SQL_TIME, None, 4), None, None);
    fake.add_inline_column("TEST", "TS", plain(blr::TIMESTAMP, None, 8), None, None);
    fake.add_inline_column(
        "TEST",
        "N92",
        FakeDomain::new("", blr::LONG, Some(1), 4).numeric(9, -2),
        None,
        None,
    );
    fake.add_inline_column(
        "TEST",
        "D92",
        FakeDomain::new("", blr::LONG, Some(2), 4).numeric(9, -2),
        None,
        None,
    );

    fake.add_index("RDB$PRIMARY1", "TEST", Some(1), None, &["ID"]);
    fake.add_primary_key_constraint("TEST", "RDB$PRIMARY1");
    fake
}
