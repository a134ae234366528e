//! Append-only record store.
//!
//! The store owns every batch record and its history. The outer table lock
//! linearizes id allocation with insertion; each record carries its own lock
//! so that transitions on different batches never wait on each other.
//! Records are replaced whole after a successful decision, so a reader holding
//! a read guard sees either the old value or the new one.

use crate::config::LedgerConfig;
use crate::core::{Batch, BatchHistory, BatchId, Identity};
use crate::error::{LedgerError, Result};
use crate::validation;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

/// A batch together with its transition history.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchEntry {
    pub batch: Batch,
    pub history: BatchHistory,
}

type Slot = Arc<RwLock<BatchEntry>>;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned: PoisonError<_>| {
        warn!("recovering poisoned store lock for read");
        poisoned.into_inner()
    })
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned: PoisonError<_>| {
        warn!("recovering poisoned store lock for write");
        poisoned.into_inner()
    })
}

fn index_of(id: BatchId) -> Option<usize> {
    usize::try_from(id).ok()?.checked_sub(1)
}

/// Ordered table of batch records keyed by sequential id.
#[derive(Debug, Default)]
pub struct RecordStore {
    slots: RwLock<Vec<Slot>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from entries whose ids are already dense and ordered.
    pub(crate) fn from_entries(entries: Vec<BatchEntry>) -> Self {
        let slots = entries
            .into_iter()
            .map(|entry| Arc::new(RwLock::new(entry)))
            .collect();
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Validate and append a fresh record, returning its id.
    pub fn create(
        &self,
        config: &LedgerConfig,
        farmer: Identity,
        crop_type: &str,
        quantity: u64,
    ) -> Result<BatchId> {
        validation::into_result(validation::validate_new_batch(config, crop_type, quantity))?;
        self.insert_with(|id| {
            Ok(BatchEntry {
                batch: Batch::new(id, farmer, crop_type.to_string(), quantity),
                history: BatchHistory::new(),
            })
        })
    }

    /// Allocate the next id and insert the entry built for it.
    ///
    /// The table stays write-locked while `build` runs; if it fails, the id is
    /// not consumed.
    pub(crate) fn insert_with<F>(&self, build: F) -> Result<BatchId>
    where
        F: FnOnce(BatchId) -> Result<BatchEntry>,
    {
        let mut slots = write(&self.slots);
        let id = slots.len() as BatchId + 1;
        let entry = build(id)?;
        slots.push(Arc::new(RwLock::new(entry)));
        Ok(id)
    }

    fn slot(&self, id: BatchId) -> Result<Slot> {
        let slots = read(&self.slots);
        index_of(id)
            .and_then(|index| slots.get(index))
            .cloned()
            .ok_or(LedgerError::NotFound { id })
    }

    pub fn get(&self, id: BatchId) -> Result<Batch> {
        let slot = self.slot(id)?;
        let entry = read(&*slot);
        Ok(entry.batch.clone())
    }

    pub fn history(&self, id: BatchId) -> Result<BatchHistory> {
        let slot = self.slot(id)?;
        let entry = read(&*slot);
        Ok(entry.history.clone())
    }

    /// Number of records, which is also the highest assigned id.
    pub fn count(&self) -> u64 {
        read(&self.slots).len() as u64
    }

    /// Snapshot of every record in ascending id order.
    pub fn list(&self) -> Vec<Batch> {
        self.entries().into_iter().map(|entry| entry.batch).collect()
    }

    pub(crate) fn entries(&self) -> Vec<BatchEntry> {
        let slots = read(&self.slots);
        slots.iter().map(|slot| read(&**slot).clone()).collect()
    }

    /// Replace one record with the value computed by `step`.
    ///
    /// `step` runs while the record is write-locked, so its check and the
    /// replacement form one unit. On error the record is left untouched.
    pub(crate) fn update<F>(&self, id: BatchId, step: F) -> Result<Batch>
    where
        F: FnOnce(&BatchEntry) -> Result<BatchEntry>,
    {
        let slot = self.slot(id)?;
        let mut entry = write(&*slot);
        let next = step(&entry)?;
        *entry = next;
        Ok(entry.batch.clone())
    }
}
