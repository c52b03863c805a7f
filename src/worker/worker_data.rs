//! Worker Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in worker_operations.rs

use crate::block::RegisteredBlock;
use crate::config::RegistryConfig;
use crate::context::RegistryContext;
use crate::error::RegistryResult;
use crate::item::RegisteredItem;
use crate::palette::StateEntry;
use crossbeam_channel::Sender;
use std::fmt;
use std::thread;

/// Everything a worker needs to rebuild the registry, captured once
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    pub config: RegistryConfig,
    pub builtin_states: Vec<StateEntry>,
    /// Blocks in registration order, with the ids they were given
    pub blocks: Vec<RegisteredBlock>,
    pub items: Vec<RegisteredItem>,
}

/// Work run against a worker's local registry
pub type WorkerJob = Box<dyn FnOnce(&RegistryContext) + Send>;

pub enum WorkerMessage {
    Job(WorkerJob),
    Shutdown,
}

/// Handle to one running worker
pub struct WorkerData {
    pub name: String,
    pub sender: Sender<WorkerMessage>,
    /// Finishes with the replay error, if the snapshot could not be applied
    pub thread: Option<thread::JoinHandle<RegistryResult<()>>>,
}

impl fmt::Debug for WorkerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerMessage::Job(_) => f.write_str("Job"),
            WorkerMessage::Shutdown => f.write_str("Shutdown"),
        }
    }
}

impl fmt::Debug for WorkerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerData")
            .field("name", &self.name)
            .field("running", &self.thread.is_some())
            .finish()
    }
}
