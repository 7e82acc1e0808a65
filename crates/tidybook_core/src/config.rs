//! Store configuration.
//!
//! # Responsibility
//! - Bind each entity kind to an explicit file inside one data directory.
//! - Carry the load policy for unreadable collection files.
//!
//! # Invariants
//! - File names are single path components inside `data_dir`.
//! - The core reads no environment variables or config files of its own.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";
pub const DEFAULT_TASKS_FILE: &str = "todos.json";

/// What `load` does with durable content that cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptFilePolicy {
    /// Start empty and leave the bytes to be overwritten by the next write.
    #[default]
    Discard,
    /// Copy the bytes to a recovery file first, then start empty.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDataDir,
    InvalidFileName(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataDir => write!(f, "data_dir cannot be empty"),
            Self::InvalidFileName(name) => write!(
                f,
                "invalid collection file name `{name}`; expected a single non-empty path component"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Locations and policies for the contact and task stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub contacts_file: String,
    pub tasks_file: String,
    pub corrupt_policy: CorruptFilePolicy,
}

impl StoreConfig {
    /// Creates a config using default file names and `Discard` policy.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            contacts_file: DEFAULT_CONTACTS_FILE.to_string(),
            tasks_file: DEFAULT_TASKS_FILE.to_string(),
            corrupt_policy: CorruptFilePolicy::default(),
        }
    }

    pub fn with_contacts_file(mut self, name: impl Into<String>) -> Self {
        self.contacts_file = name.into();
        self
    }

    pub fn with_tasks_file(mut self, name: impl Into<String>) -> Self {
        self.tasks_file = name.into();
        self
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptFilePolicy) -> Self {
        self.corrupt_policy = policy;
        self
    }

    /// Checks that every configured location is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        validate_file_name(&self.contacts_file)?;
        validate_file_name(&self.tasks_file)?;
        Ok(())
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.data_dir.join(&self.contacts_file)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }
}

fn validate_file_name(name: &str) -> Result<(), ConfigError> {
    let single_component = Path::new(name)
        .file_name()
        .is_some_and(|component| component == name);
    if name.trim().is_empty() || !single_component {
        return Err(ConfigError::InvalidFileName(name.to_string()));
    }
    Ok(())
}
