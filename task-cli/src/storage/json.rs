use super::{Error, InMemoryStorage, Storage, TaskStore};
use crate::task::{NewTask, Task};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Task storage backed by a single JSON file.
///
/// The in-memory cache is refreshed from disk before every mutation and the
/// whole file is rewritten afterwards.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    cache: InMemoryStorage,
    loaded: bool,
    bootstrapped: bool,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: InMemoryStorage::new(),
            loaded: false,
            bootstrapped: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file into the cache, creating it once if it does not exist.
    fn read_file(&mut self) -> Result<(), Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                self.cache.replace(TaskStore::new_from_json(&contents)?);
                self.loaded = true;
                debug!(path = %self.path.display(), "Loaded task store");
                Ok(())
            }
            // Bootstrap only: a file that vanishes again after creation is an error.
            Err(err) if err.kind() == ErrorKind::NotFound && !self.bootstrapped => {
                self.bootstrapped = true;
                self.bootstrap()?;
                self.read_file()
            }
            Err(err) => Err(err.into()),
        }
    }

    fn bootstrap(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        info!(path = %self.path.display(), "Creating empty task store");
        self.write_store(&TaskStore::default())
    }

    fn write_store(&self, store: &TaskStore) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        store.save_as_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_file(&self) -> Result<(), Error> {
        self.write_store(self.cache.store())?;
        debug!(path = %self.path.display(), "Saved task store");
        Ok(())
    }

    fn ensure_loaded(&mut self) -> Result<(), Error> {
        if !self.loaded {
            self.read_file()?;
        }
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn load(&mut self) -> Result<BTreeMap<u32, Task>, Error> {
        self.ensure_loaded()?;
        self.cache.load()
    }

    fn get_by_index(&mut self, id: u32) -> Result<Task, Error> {
        self.ensure_loaded()?;
        self.cache.get_by_index(id)
    }

    #[tracing::instrument(skip(self, task), fields(path = %self.path.display()))]
    fn add(&mut self, task: NewTask) -> Result<(u32, Task), Error> {
        self.read_file()?;
        let added = self.cache.add(task)?;
        self.write_file()?;
        Ok(added)
    }

    #[tracing::instrument(skip(self, task), fields(path = %self.path.display()))]
    fn update_by_index(&mut self, id: u32, task: Task) -> Result<(), Error> {
        self.read_file()?;
        self.cache.update_by_index(id, task)?;
        self.write_file()
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn delete_by_index(&mut self, id: u32) -> Result<(), Error> {
        self.read_file()?;
        self.cache.delete_by_index(id)?;
        self.write_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Status, timestamp_now};
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn new_task(description: &str) -> NewTask {
        NewTask::planned(description.to_string(), timestamp_now())
    }

    #[test]
    fn load_creates_missing_file_and_directories() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let file = dir.child("data/nested/tasks.json");
        let mut storage = JsonFileStorage::new(file.path());

        // Act
        let tasks = storage.load().unwrap();

        // Assert
        assert!(tasks.is_empty());
        file.assert(predicates::path::exists());
        let store = TaskStore::new_from_json(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(store, TaskStore::default());
    }

    #[test]
    fn mutations_are_written_to_disk() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        let mut storage = JsonFileStorage::new(file.path());

        storage.add(new_task("Buy milk")).unwrap();
        storage.add(new_task("Walk dog")).unwrap();
        storage.delete_by_index(1).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(json["counter"], 2);
        assert!(json["tasks"].get("1").is_none());
        assert_eq!(json["tasks"]["2"]["description"], "Walk dog");
        assert_eq!(json["tasks"]["2"]["status"], "todo");
    }

    #[test]
    fn reloading_reproduces_the_same_tasks() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        let mut writer = JsonFileStorage::new(file.path());
        let (id, mut task) = writer.add(new_task("Persist me")).unwrap();
        task.status = Status::InProgress;
        writer.update_by_index(id, task).unwrap();
        writer.add(new_task("And me")).unwrap();
        let written = writer.load().unwrap();

        let mut reader = JsonFileStorage::new(file.path());

        assert_eq!(reader.load().unwrap(), written);
    }

    #[test]
    fn mutations_pick_up_changes_made_by_other_instances() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        let mut first = JsonFileStorage::new(file.path());
        let mut second = JsonFileStorage::new(file.path());
        first.load().unwrap();
        second.load().unwrap();

        first.add(new_task("From first")).unwrap();
        let (id, _) = second.add(new_task("From second")).unwrap();

        assert_eq!(id, 2);
        assert_eq!(second.load().unwrap().len(), 2);
    }

    #[test]
    fn missing_ids_fail_without_touching_the_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        let mut storage = JsonFileStorage::new(file.path());
        let (_, task) = storage.add(new_task("Only task")).unwrap();
        let before = fs::read_to_string(file.path()).unwrap();

        assert!(matches!(storage.get_by_index(5), Err(Error::TaskNotFound(5))));
        assert!(matches!(
            storage.update_by_index(5, task),
            Err(Error::TaskNotFound(5))
        ));
        assert!(matches!(storage.delete_by_index(5), Err(Error::TaskNotFound(5))));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), before);
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        file.write_str("{ not json").unwrap();
        let mut storage = JsonFileStorage::new(file.path());

        assert!(matches!(storage.load(), Err(Error::Corrupted(_))));
    }

    #[test]
    fn directory_in_place_of_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        file.create_dir_all().unwrap();
        let mut storage = JsonFileStorage::new(file.path());

        assert!(matches!(storage.load(), Err(Error::Io(_))));
    }

    #[test]
    fn file_missing_after_bootstrap_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        let mut storage = JsonFileStorage::new(file.path());
        storage.bootstrapped = true;

        let result = storage.load();

        match result {
            Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::NotFound),
            other => panic!("Expected a not found I/O error, got {:?}", other),
        }
        file.assert(predicates::path::missing());
    }

    #[test]
    fn exhausted_ids_leave_the_file_untouched() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tasks.json");
        file.write_str(r#"{"counter": 4294967295, "tasks": {}}"#).unwrap();
        let mut storage = JsonFileStorage::new(file.path());

        assert!(matches!(storage.add(new_task("Overflow")), Err(Error::IdsExhausted)));
        assert_eq!(
            fs::read_to_string(file.path()).unwrap(),
            r#"{"counter": 4294967295, "tasks": {}}"#
        );
    }
}
