//! In-memory storage backend.
//!
//! Holds the encoded collection text instead of a file, so the same codec and
//! decode-failure paths run as with `JsonFileStorage`. Write failures can be
//! injected to exercise the store's commit semantics.

use super::codec::{decode_collection, encode_collection};
use super::{CollectionStorage, StorageError, StorageResult};
use crate::model::record::Record;
use std::cell::{Cell, RefCell};
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

const MEMORY_LOCATION: &str = "memory";

/// Single-threaded in-memory storage for one record collection.
#[derive(Debug)]
pub struct MemoryStorage<R> {
    content: RefCell<Option<String>>,
    recovered: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    write_count: Cell<usize>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MemoryStorage<R> {
    /// Creates storage with no durable target yet.
    pub fn new() -> Self {
        Self {
            content: RefCell::new(None),
            recovered: RefCell::new(None),
            fail_writes: Cell::new(false),
            write_count: Cell::new(0),
            _record: PhantomData,
        }
    }

    /// Creates storage pre-populated with raw text, valid or not.
    pub fn with_content(text: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.content.replace(Some(text.into()));
        storage
    }

    /// Current raw text, `None` when nothing was ever written.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Text captured by the last `preserve_unreadable` call.
    pub fn recovered_content(&self) -> Option<String> {
        self.recovered.borrow().clone()
    }

    /// Makes every following write, recovery copies included, fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes, including bootstrap.
    pub fn write_count(&self) -> usize {
        self.write_count.get()
    }

    fn store_text(&self, text: String) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::io(
                MEMORY_LOCATION,
                "write",
                io::Error::new(io::ErrorKind::Other, "write failure injected"),
            ));
        }
        self.content.replace(Some(text));
        self.write_count.set(self.write_count.get() + 1);
        Ok(())
    }
}

impl<R: Record> Default for MemoryStorage<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> CollectionStorage<R> for MemoryStorage<R> {
    fn location(&self) -> String {
        MEMORY_LOCATION.to_string()
    }

    fn ensure_exists(&self) -> StorageResult<()> {
        if self.content.borrow().is_some() {
            return Ok(());
        }
        self.store_text(encode_collection::<R>(&[])?)
    }

    fn read_all(&self) -> StorageResult<Vec<R>> {
        match self.content.borrow().as_deref() {
            Some(text) => decode_collection(text.as_bytes(), MEMORY_LOCATION),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&self, records: &[R]) -> StorageResult<()> {
        self.store_text(encode_collection(records)?)
    }

    fn preserve_unreadable(&self) -> StorageResult<Option<PathBuf>> {
        if self.fail_writes.get() {
            return Err(StorageError::io(
                MEMORY_LOCATION,
                "copy",
                io::Error::new(io::ErrorKind::Other, "write failure injected"),
            ));
        }
        self.recovered.replace(self.content.borrow().clone());
        Ok(None)
    }
}
