//! Use-case services for the presentation layer.
//!
//! # Responsibility
//! - Turn form input into validated records and store calls.
//! - Keep presentation code decoupled from storage and query details.
//!
//! # Invariants
//! - Services never bypass `RecordStore` validation or commit semantics.
//! - Records are addressed by stable id; positions stay inside the store.

use crate::config::ConfigError;
use crate::store::record_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_service;
pub mod task_service;

/// Error returned when a file-backed service cannot be opened.
#[derive(Debug)]
pub enum OpenError {
    Config(ConfigError),
    Store(StoreError),
}

impl Display for OpenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid store config: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ConfigError> for OpenError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for OpenError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
