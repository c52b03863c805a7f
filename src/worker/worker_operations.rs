//! Worker Operations - Pure DOP Functions
//!
//! Snapshot capture, replay, and the worker thread lifecycle.

use super::worker_data::{RegistrySnapshot, WorkerData, WorkerJob, WorkerMessage};
use crate::allocator::seeded_allocator;
use crate::block::register_block;
use crate::context::{create_registry_context_with_allocator, RegistryContext};
use crate::error::{RegistryError, RegistryResult};
use crate::item::register_item;
use crossbeam_channel::{bounded, unbounded};
use std::sync::Arc;
use std::thread;

/// Capture every registration made so far
pub fn take_snapshot(ctx: &RegistryContext) -> RegistrySnapshot {
    RegistrySnapshot {
        config: ctx.config.clone(),
        builtin_states: ctx.builtin_states.clone(),
        blocks: ctx.blocks.registered.clone(),
        items: ctx.items.registered.clone(),
    }
}

/// Rebuild a registry from a snapshot, reusing the snapshot's ids
pub fn replay_snapshot(snapshot: RegistrySnapshot) -> RegistryResult<RegistryContext> {
    let mut config = snapshot.config;
    // workers never write the id cache
    config.id_cache_path = None;

    let allocator = seeded_allocator(
        config.first_block_id,
        config.last_block_id,
        snapshot
            .blocks
            .iter()
            .map(|block| (block.registration.identifier.clone(), block.id)),
    );
    let mut ctx = create_registry_context_with_allocator(
        config,
        snapshot.builtin_states,
        Box::new(allocator),
    )?;

    for block in snapshot.blocks {
        let identifier = block.registration.identifier.clone();
        let id = register_block(&mut ctx, block.registration)?;
        if id != block.id {
            return Err(RegistryError::validation(format!(
                "replayed block '{}' got id {} instead of {}",
                identifier, id, block.id
            )));
        }
    }
    for item in snapshot.items {
        register_item(&mut ctx, &item.identifier, Arc::clone(&item.item))?;
    }
    Ok(ctx)
}

/// Start a worker thread and hand it `snapshot`.
///
/// The snapshot is the only registry state the worker ever receives.
pub fn spawn_worker(name: &str, snapshot: RegistrySnapshot) -> RegistryResult<WorkerData> {
    let (snapshot_tx, snapshot_rx) = bounded::<RegistrySnapshot>(1);
    let (job_tx, job_rx) = unbounded::<WorkerMessage>();
    let worker_name = name.to_string();

    let handle = thread::Builder::new()
        .name(worker_name.clone())
        .spawn(move || -> RegistryResult<()> {
            let snapshot = snapshot_rx.recv()?;
            let block_count = snapshot.blocks.len();
            let ctx = replay_snapshot(snapshot)?;
            log::info!(
                "Worker '{}' ready with {} replicated blocks",
                worker_name,
                block_count
            );

            for message in job_rx.iter() {
                match message {
                    WorkerMessage::Job(job) => job(&ctx),
                    WorkerMessage::Shutdown => break,
                }
            }
            log::debug!("Worker '{}' stopped", worker_name);
            Ok(())
        })
        .map_err(|e| RegistryError::Io {
            path: format!("worker thread '{}'", name),
            error: e.to_string(),
        })?;

    snapshot_tx.send(snapshot)?;
    Ok(WorkerData {
        name: name.to_string(),
        sender: job_tx,
        thread: Some(handle),
    })
}

/// Queue a job on the worker
pub fn submit_job(worker: &WorkerData, job: WorkerJob) -> RegistryResult<()> {
    worker.sender.send(WorkerMessage::Job(job))?;
    Ok(())
}

/// Stop the worker and wait for it; returns the replay error if it never started
pub fn shutdown_worker(worker: &mut WorkerData) -> RegistryResult<()> {
    // a worker that failed replay has already dropped its receiver
    let _ = worker.sender.send(WorkerMessage::Shutdown);

    match worker.thread.take() {
        Some(handle) => handle.join().map_err(|_| RegistryError::ChannelClosed {
            name: format!("worker '{}' panicked", worker.name),
        })?,
        None => Ok(()),
    }
}
