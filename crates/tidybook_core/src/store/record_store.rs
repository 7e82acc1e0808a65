//! Generic record store over a `CollectionStorage` backend.
//!
//! # Responsibility
//! - Load the collection once at startup and keep it in insertion order.
//! - Stage every mutation on a copy, persist it, then swap it in.
//!
//! # Invariants
//! - Batch deletes remove positions from highest to lowest.
//! - `carry_over` runs before validation on every replacement, so `id` and
//!   task `created_at` survive updates.
//! - Undecodable durable content loads as an empty collection.

use crate::config::CorruptFilePolicy;
use crate::model::record::{Record, RecordId, RecordValidationError};
use crate::storage::{CollectionStorage, StorageError};
use log::{debug, error, info, warn};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error returned by load and mutation operations.
#[derive(Debug)]
pub enum StoreError {
    /// A required field is empty or the id is nil.
    Validation(RecordValidationError),
    /// Position does not exist in the current collection.
    OutOfRange { position: usize, len: usize },
    NotFound(RecordId),
    /// Candidate id already belongs to a stored record.
    DuplicateId(RecordId),
    /// Durable read or write failed.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::OutOfRange { position, len } => write!(
                f,
                "position {position} is out of range for a collection of {len} records"
            ),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::DuplicateId(id) => write!(f, "record id already exists: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::OutOfRange { .. } | Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Ordered collection of one record kind, mirrored to `S`.
pub struct RecordStore<R: Record, S: CollectionStorage<R>> {
    storage: S,
    records: Vec<R>,
    corrupt_policy: CorruptFilePolicy,
    recovered_from: Option<PathBuf>,
}

impl<R: Record, S: CollectionStorage<R>> RecordStore<R, S> {
    /// Creates an empty, unloaded store. Call [`RecordStore::load`] before use.
    pub fn new(storage: S, corrupt_policy: CorruptFilePolicy) -> Self {
        Self {
            storage,
            records: Vec::new(),
            corrupt_policy,
            recovered_from: None,
        }
    }

    /// Creates a store and loads its collection.
    pub fn open(storage: S, corrupt_policy: CorruptFilePolicy) -> StoreResult<Self> {
        let mut store = Self::new(storage, corrupt_policy);
        store.load()?;
        Ok(store)
    }

    /// Reads the full collection from storage, replacing the in-memory one.
    ///
    /// # Side effects
    /// - Creates the durable target with an empty collection when absent.
    /// - Rewrites the collection once when ids had to be backfilled.
    /// - Under `CorruptFilePolicy::Preserve`, copies undecodable content aside.
    ///   A failed copy is logged and loading continues with an empty collection.
    ///
    /// # Errors
    /// - Returns `StoreError::Storage` for read and backfill-write failures.
    ///   Decode failures are not errors: they load as an empty collection.
    pub fn load(&mut self) -> StoreResult<&[R]> {
        let started_at = Instant::now();
        self.recovered_from = None;
        self.storage.ensure_exists()?;

        let mut records = match self.storage.read_all() {
            Ok(records) => records,
            Err(err) if err.is_decode() => {
                warn!(
                    "event=store_load module=store status=degraded kind={} location={} policy={:?} error={}",
                    R::KIND,
                    self.storage.location(),
                    self.corrupt_policy,
                    err
                );
                if self.corrupt_policy == CorruptFilePolicy::Preserve {
                    self.recovered_from = self.preserve_unreadable();
                }
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error kind={} location={} error={}",
                    R::KIND,
                    self.storage.location(),
                    err
                );
                return Err(err.into());
            }
        };

        let backfilled = backfill_ids(&mut records);
        if backfilled > 0 {
            self.storage.write_all(&records)?;
            info!(
                "event=store_backfill module=store status=ok kind={} backfilled={}",
                R::KIND,
                backfilled
            );
        }

        self.records = records;
        info!(
            "event=store_load module=store status=ok kind={} count={} duration_ms={}",
            R::KIND,
            self.records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(self.records.as_slice())
    }

    /// Validates and appends `candidate`, then persists the collection.
    ///
    /// Returns the stored record.
    pub fn create(&mut self, candidate: R) -> StoreResult<R> {
        candidate.validate()?;
        if self.position_of(candidate.id()).is_some() {
            return Err(StoreError::DuplicateId(candidate.id()));
        }

        let mut next = self.records.clone();
        next.push(candidate.clone());
        self.commit(next, "create", 1)?;
        Ok(candidate)
    }

    /// Replaces the record at `position` in the current collection.
    ///
    /// The stored record's immutable fields are kept.
    pub fn update(&mut self, position: usize, replacement: R) -> StoreResult<()> {
        let Some(previous) = self.records.get(position) else {
            return Err(self.out_of_range(position));
        };

        let mut replacement = replacement;
        replacement.carry_over(previous);
        replacement.validate()?;

        let mut next = self.records.clone();
        next[position] = replacement;
        self.commit(next, "update", 1)
    }

    /// Replaces the record identified by `id`.
    pub fn update_by_id(&mut self, id: RecordId, replacement: R) -> StoreResult<()> {
        let position = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        self.update(position, replacement)
    }

    /// Removes every record at `positions` and persists once.
    ///
    /// Out-of-range and repeated positions are skipped. Returns the number of
    /// records removed; nothing is written when that number is zero.
    pub fn delete<I>(&mut self, positions: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let requested = positions.into_iter().collect::<BTreeSet<_>>();
        let len = self.records.len();
        let in_range = requested
            .iter()
            .copied()
            .filter(|position| *position < len)
            .collect::<Vec<_>>();

        let skipped = requested.len() - in_range.len();
        if skipped > 0 {
            debug!(
                "event=store_delete module=store status=skipped kind={} skipped={} len={}",
                R::KIND,
                skipped,
                len
            );
        }
        if in_range.is_empty() {
            return Ok(0);
        }

        let mut next = self.records.clone();
        for position in in_range.iter().rev() {
            next.remove(*position);
        }
        self.commit(next, "delete", in_range.len())?;
        Ok(in_range.len())
    }

    /// Removes every record whose id is listed. Unknown ids are skipped.
    pub fn delete_by_ids<I>(&mut self, ids: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = RecordId>,
    {
        let positions = ids
            .into_iter()
            .filter_map(|id| self.position_of(id))
            .collect::<Vec<_>>();
        self.delete(positions)
    }

    /// Applies `edit` to every listed record and persists once.
    ///
    /// Each edited record keeps its immutable fields and must still validate;
    /// the first invalid edit aborts the whole batch. Unknown ids are skipped.
    pub fn modify<I, F>(&mut self, ids: I, mut edit: F) -> StoreResult<usize>
    where
        I: IntoIterator<Item = RecordId>,
        F: FnMut(&mut R),
    {
        let wanted = ids.into_iter().collect::<HashSet<_>>();
        let mut next = self.records.clone();
        let mut changed = 0;

        for record in next.iter_mut().filter(|record| wanted.contains(&record.id())) {
            let previous = record.clone();
            edit(record);
            record.carry_over(&previous);
            record.validate()?;
            changed += 1;
        }

        if changed == 0 {
            return Ok(0);
        }
        self.commit(next, "modify", changed)?;
        Ok(changed)
    }

    /// Current collection in insertion order.
    ///
    /// Positions are only meaningful until the next mutating call.
    pub fn snapshot(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Recovery copy made by the last load, if any.
    pub fn recovered_from(&self) -> Option<&Path> {
        self.recovered_from.as_deref()
    }

    fn preserve_unreadable(&self) -> Option<PathBuf> {
        match self.storage.preserve_unreadable() {
            Ok(path) => path,
            Err(err) => {
                warn!(
                    "event=store_preserve module=store status=error kind={} location={} error={}",
                    R::KIND,
                    self.storage.location(),
                    err
                );
                None
            }
        }
    }

    fn out_of_range(&self, position: usize) -> StoreError {
        warn!(
            "event=store_update module=store status=rejected kind={} position={} len={}",
            R::KIND,
            position,
            self.records.len()
        );
        StoreError::OutOfRange {
            position,
            len: self.records.len(),
        }
    }

    fn commit(
        &mut self,
        next: Vec<R>,
        operation: &'static str,
        affected: usize,
    ) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.storage.write_all(&next) {
            Ok(()) => {
                self.records = next;
                info!(
                    "event=store_write module=store status=ok kind={} operation={} affected={} count={} duration_ms={}",
                    R::KIND,
                    operation,
                    affected,
                    self.records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error kind={} operation={} duration_ms={} error={}",
                    R::KIND,
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Assigns fresh ids to records that have none or repeat an earlier one.
fn backfill_ids<R: Record>(records: &mut [R]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    let mut backfilled = 0;
    for record in records.iter_mut() {
        if record.id().is_nil() || !seen.insert(record.id()) {
            let fresh = Uuid::new_v4();
            record.set_id(fresh);
            seen.insert(fresh);
            backfilled += 1;
        }
    }
    backfilled
}
