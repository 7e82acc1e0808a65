//! Attribute filters and combined task queries.
//!
//! # Invariants
//! - A filter spec is a conjunction; `FieldFilter::All` ignores its field.
//! - Filtering is stable: output order is input order.

use crate::model::task::{Category, Priority, Task, TaskStatus};
use crate::query::search::{fold_query, Searchable};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ALL_SENTINEL: &str = "All";

/// One field predicate: either a wildcard or an exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFilter<T> {
    All,
    Only(T),
}

impl<T> Default for FieldFilter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> FieldFilter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Parses `All` or a value name, case-insensitively.
impl<T: FromStr> FromStr for FieldFilter<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

impl<T: Display> Display for FieldFilter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SENTINEL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Predicate spec applied by [`filter`].
pub trait RecordFilter<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Attribute filter for task views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub priority: FieldFilter<Priority>,
    pub category: FieldFilter<Category>,
    /// Matched against the status derived from `Task::completed`.
    pub status: FieldFilter<TaskStatus>,
}

impl TaskFilter {
    pub fn is_all(&self) -> bool {
        self.priority.is_all() && self.category.is_all() && self.status.is_all()
    }
}

impl RecordFilter<Task> for TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        self.priority.accepts(&task.priority)
            && self.category.accepts(&task.category)
            && self.status.accepts(&task.status())
    }
}

/// Returns records accepted by `spec`, in collection order.
pub fn filter<R, F>(collection: &[R], spec: &F) -> Vec<R>
where
    R: Clone,
    F: RecordFilter<R> + ?Sized,
{
    collection
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

/// Free-text search combined with an attribute filter; both must pass.
///
/// `TaskQuery::default()` is the cleared state that shows every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub text: String,
    pub filter: TaskFilter,
}

impl TaskQuery {
    pub fn new(text: impl Into<String>, filter: TaskFilter) -> Self {
        Self {
            text: text.into(),
            filter,
        }
    }

    pub fn is_cleared(&self) -> bool {
        fold_query(&self.text).is_none() && self.filter.is_all()
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let folded = fold_query(&self.text);
        tasks
            .iter()
            .filter(|task| {
                folded
                    .as_deref()
                    .map_or(true, |text| task.matches_text(text))
                    && self.filter.matches(task)
            })
            .cloned()
            .collect()
    }
}
