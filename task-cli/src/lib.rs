//! Local TODO list manager.
//!
//! Tasks live in a [`storage::Storage`] backend, either a JSON file or
//! memory, and are manipulated through [`manager::TaskManager`]. The
//! [`cli`] module maps command-line input onto the manager and the
//! [`output`] module renders the results.

pub mod cli;
pub mod config;
pub mod manager;
pub mod output;
pub mod storage;
pub mod task;

pub use task::{NewTask, Status, Task};
