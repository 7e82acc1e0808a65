//! Whole-collection persistence boundary.
//!
//! # Responsibility
//! - Translate a full record collection to and from durable bytes.
//! - Bootstrap an empty collection when the durable target is absent.
//!
//! # Invariants
//! - Storage never mutates the in-memory collection; it only mirrors it.
//! - Every write replaces the whole collection (no append log, no diffing).
//! - Decode failures are reported as `StorageError::Decode`, distinct from
//!   I/O failures, so callers can apply their own recovery policy.

use crate::model::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod codec;
pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// File-system operation failed.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Durable content is not a decodable collection.
    Decode {
        location: String,
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Returns whether this error means "content present but unreadable".
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(f, "failed to {operation} `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Decode { location, source } => {
                write!(f, "failed to decode collection at `{location}`: {source}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Durable mirror of one record collection.
pub trait CollectionStorage<R: Record> {
    /// Human-readable location used in log events and errors.
    fn location(&self) -> String;

    /// Creates the durable target holding an empty collection when absent.
    fn ensure_exists(&self) -> StorageResult<()>;

    /// Reads and decodes the full collection.
    fn read_all(&self) -> StorageResult<Vec<R>>;

    /// Serializes and overwrites the durable target with `records`.
    fn write_all(&self, records: &[R]) -> StorageResult<()>;

    /// Copies unreadable durable content aside before it gets overwritten.
    ///
    /// Returns the recovery location when the backend has one.
    fn preserve_unreadable(&self) -> StorageResult<Option<PathBuf>>;
}
