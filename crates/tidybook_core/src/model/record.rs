//! Shared record contract.
//!
//! # Responsibility
//! - Describe what the store needs from a record: identity, validation and
//!   the fields that must survive replacement.
//!
//! # Invariants
//! - `RecordId` is never nil for a record that passed `validate()`.
//! - `carry_over` is the only place that decides which fields are immutable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to every record at creation.
pub type RecordId = Uuid;

/// Entity kind held by one store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Contact,
    Task,
}

impl RecordKind {
    /// Lowercase name used in log events and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Task => "task",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error raised before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Record id is the nil UUID.
    NilId,
    /// A required text field is empty or whitespace only.
    MissingField {
        kind: RecordKind,
        field: &'static str,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
            Self::MissingField { kind, field } => {
                write!(f, "{kind} field `{field}` is required")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Contract between a domain record and the generic store.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Entity kind stored by collections of this record.
    const KIND: RecordKind;

    fn id(&self) -> RecordId;

    /// Replaces the record id. Used by load-time backfill only.
    fn set_id(&mut self, id: RecordId);

    /// Checks write-time invariants.
    fn validate(&self) -> Result<(), RecordValidationError>;

    /// Copies fields that must never change across updates from `previous`.
    fn carry_over(&mut self, previous: &Self);
}

pub(crate) fn require_text(
    kind: RecordKind,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::MissingField { kind, field });
    }
    Ok(())
}

pub(crate) fn require_id(id: RecordId) -> Result<(), RecordValidationError> {
    if id.is_nil() {
        return Err(RecordValidationError::NilId);
    }
    Ok(())
}

/// Decodes a text field; `null` and non-string values become empty.
pub(crate) fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

/// Decodes an id; anything that is not a UUID string becomes nil so load
/// backfill replaces it.
pub(crate) fn id_or_nil<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| Uuid::parse_str(text.trim()).ok())
        .unwrap_or_else(Uuid::nil))
}
