use super::{Error, Storage};
use crate::task::{NewTask, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Serialized shape of the task store.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskStore {
    /// Last id handed out.
    pub counter: u32,
    pub tasks: BTreeMap<u32, Task>,
}

impl TaskStore {
    pub fn new_from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut store: TaskStore = serde_json::from_str(json)?;
        let highest_id = store.tasks.keys().next_back().copied().unwrap_or(0);
        if store.counter < highest_id {
            warn!(
                counter = store.counter,
                highest_id, "Store counter is behind its tasks, moving it forward"
            );
            store.counter = highest_id;
        }
        Ok(store)
    }

    pub fn save_as_json(&self, writer: impl std::io::Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, &self)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    store: TaskStore,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub(crate) fn replace(&mut self, store: TaskStore) {
        self.store = store;
    }
}

impl Storage for InMemoryStorage {
    fn load(&mut self) -> Result<BTreeMap<u32, Task>, Error> {
        Ok(self.store.tasks.clone())
    }

    fn get_by_index(&mut self, id: u32) -> Result<Task, Error> {
        self.store
            .tasks
            .get(&id)
            .cloned()
            .ok_or(Error::TaskNotFound(id))
    }

    fn add(&mut self, task: NewTask) -> Result<(u32, Task), Error> {
        let id = self.store.counter.checked_add(1).ok_or(Error::IdsExhausted)?;
        self.store.counter = id;
        let task = task.with_id(id);
        self.store.tasks.insert(id, task.clone());
        Ok((id, task))
    }

    fn update_by_index(&mut self, id: u32, task: Task) -> Result<(), Error> {
        let stored = self
            .store
            .tasks
            .get_mut(&id)
            .ok_or(Error::TaskNotFound(id))?;
        *stored = Task { id, ..task };
        Ok(())
    }

    fn delete_by_index(&mut self, id: u32) -> Result<(), Error> {
        self.store
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::TaskNotFound(id))
    }
}
