//! JSON file storage backend.
//!
//! # Responsibility
//! - Keep one collection per file as a pretty-printed JSON array.
//! - Replace the file atomically on every write.
//!
//! # Invariants
//! - Writes go to a sibling temporary file that is synced and renamed over
//!   the target, so readers never observe a half-written collection.
//! - An absent file reads as an empty collection.

use super::codec::{decode_collection, encode_collection};
use super::{CollectionStorage, StorageError, StorageResult};
use crate::model::record::Record;
use chrono::Local;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECOVERY_SUFFIX_FORMAT: &str = "%Y%m%d%H%M%S";

/// File-backed storage for one record collection.
#[derive(Debug)]
pub struct JsonFileStorage<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileStorage<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn recovery_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| R::KIND.as_str().to_string());
        let stamp = Local::now().format(RECOVERY_SUFFIX_FORMAT);
        let mut unique = Uuid::new_v4().simple().to_string();
        unique.truncate(8);
        self.path
            .with_file_name(format!("{file_name}.corrupt-{stamp}-{unique}"))
    }
}

impl<R: Record> CollectionStorage<R> for JsonFileStorage<R> {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn ensure_exists(&self) -> StorageResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| StorageError::io(parent, "create directory", err))?;
            }
        }

        atomic_write(&self.path, encode_collection::<R>(&[])?.as_bytes())?;
        info!(
            "event=storage_init module=storage status=ok kind={} path={}",
            R::KIND,
            self.path.display()
        );
        Ok(())
    }

    fn read_all(&self) -> StorageResult<Vec<R>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::io(&self.path, "read", err)),
        };
        decode_collection(&bytes, &self.location())
    }

    fn write_all(&self, records: &[R]) -> StorageResult<()> {
        let text = encode_collection(records)?;
        atomic_write(&self.path, text.as_bytes())
    }

    fn preserve_unreadable(&self) -> StorageResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = self.recovery_path();
        fs::copy(&self.path, &target).map_err(|err| StorageError::io(&target, "copy", err))?;
        warn!(
            "event=storage_preserve module=storage status=ok kind={} path={} recovery_path={}",
            R::KIND,
            self.path.display(),
            target.display()
        );
        Ok(Some(target))
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

    let written = write_synced(&tmp, data).and_then(|()| {
        fs::rename(&tmp, path).map_err(|err| StorageError::io(path, "replace", err))
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_synced(path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file = File::create(path).map_err(|err| StorageError::io(path, "create", err))?;
    file.write_all(data)
        .map_err(|err| StorageError::io(path, "write", err))?;
    file.sync_all()
        .map_err(|err| StorageError::io(path, "sync", err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::JsonFileStorage;
    use crate::model::contact::Contact;
    use crate::model::task::{Priority, Task};
    use crate::storage::CollectionStorage;
    use std::fs;

    #[test]
    fn written_collection_reads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::<Task>::new(dir.path().join("todos.json"));
        let tasks = vec![
            Task::new("b").with_priority(Priority::High),
            Task::new("a").with_due_date("2026-12-31").with_completed(true),
        ];

        storage.write_all(&tasks).unwrap();

        assert_eq!(storage.read_all().unwrap(), tasks);
    }

    #[test]
    fn ensure_exists_creates_parent_directories_and_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.json");
        let storage = JsonFileStorage::<Contact>::new(&path);

        storage.ensure_exists().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn ensure_exists_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(&path, "not json").unwrap();
        let storage = JsonFileStorage::<Contact>::new(&path);

        storage.ensure_exists().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn write_leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::<Contact>::new(dir.path().join("contacts.json"));

        storage.write_all(&[Contact::new("Ada", "555")]).unwrap();
        storage.write_all(&[]).unwrap();

        let names = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["contacts.json".to_string()]);
    }

    #[test]
    fn repeated_preserve_keeps_every_recovery_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let storage = JsonFileStorage::<Contact>::new(&path);

        fs::write(&path, "first bad").unwrap();
        let first = storage.preserve_unreadable().unwrap().unwrap();
        fs::write(&path, "second bad").unwrap();
        let second = storage.preserve_unreadable().unwrap().unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read_to_string(&first).unwrap(), "first bad");
        assert_eq!(fs::read_to_string(&second).unwrap(), "second bad");
    }

    #[test]
    fn absent_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::<Contact>::new(dir.path().join("missing.json"));

        assert!(storage.read_all().unwrap().is_empty());
        assert_eq!(storage.preserve_unreadable().unwrap(), None);
    }
}
