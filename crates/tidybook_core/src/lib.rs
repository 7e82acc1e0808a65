//! Core record stores for the tidybook contact book and to-do list.
//! This crate owns persistence, validation and query semantics; rendering
//! and input handling live in the host application.

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{ConfigError, CorruptFilePolicy, StoreConfig};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::contact::Contact;
pub use model::record::{Record, RecordId, RecordKind, RecordValidationError};
pub use model::task::{Category, ParseFieldError, Priority, Task, TaskStatus};
pub use query::filter::{filter, FieldFilter, RecordFilter, TaskFilter, TaskQuery};
pub use query::search::{search, Searchable};
pub use query::stats::{aggregate, TaskStats};
pub use service::contact_service::{ContactDraft, ContactService};
pub use service::task_service::{NewTask, TaskDraft, TaskService};
pub use service::OpenError;
pub use storage::{CollectionStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::record_store::{RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
