//! Task record and its attribute enums.
//!
//! # Responsibility
//! - Define the to-do record and its priority/category vocabularies.
//! - Own the on-disk timestamp format for `created_at`.
//!
//! # Invariants
//! - `description` is required on write.
//! - `created_at` is set once by `Task::new` and carried over by every update.
//! - `due_date` is free text; calendar correctness is not checked.
//! - Attribute values that cannot be decoded fall back to their defaults.

use crate::model::record::{
    id_or_nil, require_id, require_text, string_or_default, Record, RecordId, RecordKind,
    RecordValidationError,
};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Wire format of `created_at`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Wire format of default due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a vocabulary value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

impl Display for ParseFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} value `{}`", self.field, self.value)
    }
}

impl Error for ParseFieldError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Personal,
    Work,
    Study,
    Health,
    Finance,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Personal,
        Self::Work,
        Self::Study,
        Self::Health,
        Self::Finance,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Health => "Health",
            Self::Finance => "Finance",
            Self::Other => "Other",
        }
    }
}

/// Completion state derived from `Task::completed`. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Completed,
    Pending,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 2] = [Self::Completed, Self::Pending];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
        }
    }
}

macro_rules! vocabulary_text {
    ($ty:ty, $field:literal) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseFieldError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| ParseFieldError {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }
    };
}

vocabulary_text!(Priority, "priority");
vocabulary_text!(Category, "category");
vocabulary_text!(TaskStatus, "status");

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Nil when decoded from a file written before ids existed.
    #[serde(default, deserialize_with = "id_or_nil")]
    pub id: RecordId,
    /// Serialized as `task` to stay compatible with existing files.
    #[serde(rename = "task", default, deserialize_with = "string_or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "vocabulary_or_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "vocabulary_or_default")]
    pub category: Category,
    /// ISO date text as entered, for example `2026-10-19`.
    #[serde(default, deserialize_with = "string_or_default")]
    pub due_date: String,
    #[serde(default, deserialize_with = "bool_or_default")]
    pub completed: bool,
    /// Local wall-clock time, second precision.
    #[serde(default, with = "created_at_format")]
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Creates a pending task with default attributes, stamped with now.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            priority: Priority::default(),
            category: Category::default(),
            due_date: String::new(),
            completed: false,
            created_at: now_second_precision(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_id(self.id)?;
        require_text(Self::KIND, "task", &self.description)?;
        Ok(())
    }

    fn carry_over(&mut self, previous: &Self) {
        self.id = previous.id;
        self.created_at = previous.created_at;
    }
}

/// Today's local date in `DUE_DATE_FORMAT`.
pub fn today() -> String {
    Local::now().format(DUE_DATE_FORMAT).to_string()
}

// The wire format has no sub-second part; truncating keeps write/read lossless.
fn now_second_precision() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn vocabulary_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| text.parse().ok())
        .unwrap_or_default())
}

fn bool_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

mod created_at_format {
    use super::CREATED_AT_FORMAT;
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(CREATED_AT_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().and_then(parse).unwrap_or_default())
    }

    fn parse(text: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text.trim(), CREATED_AT_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(text.trim())
                    .ok()
                    .map(|parsed| parsed.naive_local())
            })
    }
}
