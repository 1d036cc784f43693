//! Field resolution for a single metadata record.
//!
//! A record is one parsed JSON object. Resolution pulls the canonical binding values
//! out of it through a [`FieldMap`], substituting defaults (and counting a warning)
//! for optional fields that are missing.

use crate::fieldmap::{BindingKey, FieldMap, SCHEMA_DOWNLOAD_URL, SCHEMA_URL};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_ACCESS: &str = "None";
pub const MISSING_REFERENCE: &str = "Null";

pub type Record = Map<String, Value>;

/// Why a record could not be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    InvalidIdentifier,
    MissingField(String),
    MalformedReferences(String),
    BindFailed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::InvalidIdentifier => write!(f, "identifier rejected by NOID"),
            FailureReason::MissingField(field) => write!(f, "missing required field '{}'", field),
            FailureReason::MalformedReferences(detail) => {
                write!(f, "malformed references: {}", detail)
            }
            FailureReason::BindFailed(detail) => write!(f, "bind failed: {}", detail),
        }
    }
}

/// A record that could not be resolved, with the defaults substituted before it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveFailure {
    pub reason: FailureReason,
    pub warnings: Vec<String>,
}

impl ResolveFailure {
    fn new(reason: FailureReason, warnings: Vec<String>) -> Self {
        Self { reason, warnings }
    }
}

/// Every value that gets bound for one record, plus the defaults it needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    /// Identifier as it appeared in the source, scheme prefix included.
    pub source_identifier: String,
    pub ogm_aardvark_id: String,
    pub title: String,
    pub access: String,
    pub download: String,
    pub where_: String,
    pub warnings: Vec<String>,
}

impl ResolvedRecord {
    /// Element/value pairs in bind order.
    pub fn bindings(&self) -> Vec<(&'static str, &str)> {
        BindingKey::ALL
            .iter()
            .map(|&key| (key.element(), self.value(key)))
            .collect()
    }

    pub fn value(&self, key: BindingKey) -> &str {
        match key {
            BindingKey::Identifier => &self.source_identifier,
            BindingKey::OgmAardvarkId => &self.ogm_aardvark_id,
            BindingKey::Title => &self.title,
            BindingKey::Access => &self.access,
            BindingKey::Download => &self.download,
            BindingKey::Where => &self.where_,
        }
    }
}

/// Text form of a JSON value. Arrays contribute their first element; null is absent.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(value_text),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// The raw identifier named by the field map, if the record has one.
pub fn source_identifier(record: &Record, fields: &FieldMap) -> Option<String> {
    record
        .get(fields.field(BindingKey::Identifier))
        .and_then(value_text)
        .filter(|id| !id.trim().is_empty())
}

/// Resolve every binding value, or the reason the record has to be skipped.
pub fn resolve(
    record: &Record,
    fields: &FieldMap,
    source_identifier: &str,
) -> Result<ResolvedRecord, ResolveFailure> {
    let mut warnings = Vec::new();

    let title = text_or_default(record, fields, BindingKey::Title, DEFAULT_TITLE, &mut warnings);
    let access = text_or_default(record, fields, BindingKey::Access, DEFAULT_ACCESS, &mut warnings);

    let ogm_field = fields.field(BindingKey::OgmAardvarkId);
    let ogm_aardvark_id = match record.get(ogm_field).and_then(value_text) {
        Some(id) => id,
        None => {
            return Err(ResolveFailure::new(
                FailureReason::MissingField(ogm_field.to_string()),
                warnings,
            ))
        }
    };

    let download = match reference_or_default(
        record,
        fields,
        BindingKey::Download,
        SCHEMA_DOWNLOAD_URL,
        &mut warnings,
    ) {
        Ok(url) => url,
        Err(reason) => return Err(ResolveFailure::new(reason, warnings)),
    };
    let where_ = match reference_or_default(record, fields, BindingKey::Where, SCHEMA_URL, &mut warnings) {
        Ok(url) => url,
        Err(reason) => return Err(ResolveFailure::new(reason, warnings)),
    };

    Ok(ResolvedRecord {
        source_identifier: source_identifier.to_string(),
        ogm_aardvark_id,
        title,
        access,
        download,
        where_,
        warnings,
    })
}

fn text_or_default(
    record: &Record,
    fields: &FieldMap,
    key: BindingKey,
    default: &str,
    warnings: &mut Vec<String>,
) -> String {
    let field = fields.field(key);
    match record.get(field).and_then(value_text) {
        Some(text) => text,
        None => {
            warnings.push(format!(
                "missing '{}', {} defaults to '{}'",
                field,
                key.element(),
                default
            ));
            default.to_string()
        }
    }
}

fn reference_or_default(
    record: &Record,
    fields: &FieldMap,
    key: BindingKey,
    schema_key: &str,
    warnings: &mut Vec<String>,
) -> Result<String, FailureReason> {
    let field = fields.field(key);
    let references = match record.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_references(value)?),
    };

    let found = references
        .as_ref()
        .and_then(|refs| refs.get(schema_key))
        .and_then(value_text);

    Ok(match found {
        Some(url) => url,
        None => {
            warnings.push(format!(
                "no '{}' in '{}', {} defaults to '{}'",
                schema_key,
                field,
                key.element(),
                MISSING_REFERENCE
            ));
            MISSING_REFERENCE.to_string()
        }
    })
}

/// References are a JSON object encoded as a string; an already decoded object is
/// accepted as-is.
fn parse_references(value: &Value) -> Result<Record, FailureReason> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(FailureReason::MalformedReferences(format!(
                "expected an object, found {}",
                other
            ))),
            Err(e) => Err(FailureReason::MalformedReferences(e.to_string())),
        },
        other => Err(FailureReason::MalformedReferences(format!(
            "expected a JSON string, found {}",
            other
        ))),
    }
}
