//! Persistence boundary for tasks.
//!
//! Two backends implement [`Storage`]:
//! - [`InMemoryStorage`] keeps a [`TaskStore`] in memory only
//! - [`JsonFileStorage`] mirrors the same store to a JSON file, rewriting
//!   the whole file after every mutation
//!
//! The file backend assumes a single writer. Two processes mutating the
//! same file concurrently race and the last writer wins.

use crate::task::{NewTask, Task};
use mockall::automock;
use std::collections::BTreeMap;
use thiserror::Error;

mod json;
mod memory;

pub use json::JsonFileStorage;
pub use memory::{InMemoryStorage, TaskStore};

#[derive(Error, Debug)]
pub enum Error {
    /// No task is stored under the requested id
    #[error("Task \"{0}\" not found.")]
    TaskNotFound(u32),
    /// The id counter reached its maximum, so no new id can be allocated
    #[error("No task ids left to allocate")]
    IdsExhausted,
    #[error("Cannot access task store file")]
    Io(#[from] std::io::Error),
    #[error("Task store file is corrupted")]
    Corrupted(#[from] serde_json::Error),
}

/// Storage contract shared by every task backend.
///
/// Ids are allocated by the store from a counter that only moves forward,
/// so an id is never handed out twice, even after its task was deleted.
#[automock]
pub trait Storage {
    /// Returns a snapshot of every stored task keyed by id.
    fn load(&mut self) -> Result<BTreeMap<u32, Task>, Error>;
    /// Fetches a single task, failing with [`Error::TaskNotFound`] when absent.
    fn get_by_index(&mut self, id: u32) -> Result<Task, Error>;
    /// Allocates the next id and stores the task under it.
    fn add(&mut self, task: NewTask) -> Result<(u32, Task), Error>;
    /// Replaces an existing task. Never inserts.
    fn update_by_index(&mut self, id: u32, task: Task) -> Result<(), Error>;
    fn delete_by_index(&mut self, id: u32) -> Result<(), Error>;
}
