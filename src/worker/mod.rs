//! Worker replication
//!
//! Workers get a one-shot snapshot of every registration made so far and rebuild
//! their own `RegistryContext` from it. There is no update channel: anything
//! registered after a worker starts stays invisible to that worker.

pub mod worker_data;
pub mod worker_operations;

pub use worker_data::{RegistrySnapshot, WorkerData, WorkerJob, WorkerMessage};
pub use worker_operations::{
    replay_snapshot, shutdown_worker, spawn_worker, submit_job, take_snapshot,
};
