//! Task use-case service.
//!
//! # Responsibility
//! - Provide add/edit/complete/delete entry points for the to-do list.
//! - Serve filtered views and their statistics.
//!
//! # Invariants
//! - New tasks default to Medium priority, Personal category, today's due
//!   date and pending status.
//! - Edits replace every editable field; `created_at` is never touched.
//! - Batch completion writes the collection once.

use crate::config::StoreConfig;
use crate::model::record::RecordId;
use crate::model::task::{today, Category, Priority, Task};
use crate::query::filter::TaskQuery;
use crate::query::stats::{aggregate, TaskStats};
use crate::service::OpenError;
use crate::storage::{CollectionStorage, JsonFileStorage};
use crate::store::record_store::{RecordStore, StoreResult};
use log::info;

/// Add-task form input. Unset attributes take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    /// Defaults to today when `None`.
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Edit-task form input; replaces all editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub due_date: String,
    pub completed: bool,
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            priority: task.priority,
            category: task.category,
            due_date: task.due_date.clone(),
            completed: task.completed,
        }
    }
}

/// Use-case facade over a task store.
pub struct TaskService<S: CollectionStorage<Task>> {
    store: RecordStore<Task, S>,
}

impl TaskService<JsonFileStorage<Task>> {
    /// Opens the tasks file named by `config`, creating it when absent.
    pub fn open(config: &StoreConfig) -> Result<Self, OpenError> {
        config.validate()?;
        let storage = JsonFileStorage::new(config.tasks_path());
        let store = RecordStore::open(storage, config.corrupt_policy)?;
        Ok(Self::new(store))
    }
}

impl<S: CollectionStorage<Task>> TaskService<S> {
    pub fn new(store: RecordStore<Task, S>) -> Self {
        Self { store }
    }

    /// Creates a pending task and returns it.
    pub fn add_task(&mut self, input: NewTask) -> StoreResult<Task> {
        let task = Task::new(input.description.trim())
            .with_priority(input.priority.unwrap_or_default())
            .with_category(input.category.unwrap_or_default())
            .with_due_date(input.due_date.unwrap_or_else(today));
        self.store.create(task)
    }

    /// Replaces the editable fields of the task identified by `id`.
    pub fn edit_task(&mut self, id: RecordId, draft: TaskDraft) -> StoreResult<()> {
        let replacement = Task::new(draft.description.trim())
            .with_priority(draft.priority)
            .with_category(draft.category)
            .with_due_date(draft.due_date)
            .with_completed(draft.completed);
        self.store.update_by_id(id, replacement)
    }

    /// Marks every listed task completed. Returns how many tasks matched.
    pub fn mark_completed<I>(&mut self, ids: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = RecordId>,
    {
        let marked = self.store.modify(ids, |task| task.completed = true)?;
        info!(
            "event=task_mark_completed module=service status=ok marked={}",
            marked
        );
        Ok(marked)
    }

    pub fn delete_tasks<I>(&mut self, ids: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.store.delete_by_ids(ids)
    }

    pub fn get_task(&self, id: RecordId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.snapshot()
    }

    /// Tasks passing both the text search and the attribute filter.
    pub fn query(&self, query: &TaskQuery) -> Vec<Task> {
        query.apply(self.store.snapshot())
    }

    /// Statistics over the view selected by `query`.
    pub fn stats(&self, query: &TaskQuery) -> TaskStats {
        aggregate(&self.query(query))
    }

    pub fn overall_stats(&self) -> TaskStats {
        aggregate(self.store.snapshot())
    }

    pub fn store(&self) -> &RecordStore<Task, S> {
        &self.store
    }

    /// Positional access for callers that still address rows by index.
    pub fn store_mut(&mut self) -> &mut RecordStore<Task, S> {
        &mut self.store
    }
}
