//! In-memory slot store.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tally_error::{Result, TallyError};
use tally_types::SlotAddr;

use crate::batch::WriteBatch;
use crate::store::SlotStore;

/// A [`SlotStore`] backed by a latch-guarded map.
///
/// The reference substrate: commits take the write latch, validate the
/// whole batch against current state, and only then apply it, so the
/// create-if-absent and all-or-nothing guarantees hold under concurrent
/// writers. Reads take the shared latch and copy out.
#[derive(Debug, Default)]
pub struct MemStore {
    slots: RwLock<HashMap<SlotAddr, Vec<u8>>>,
}

impl MemStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Whether no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl SlotStore for MemStore {
    fn get(&self, addr: &SlotAddr) -> Option<Vec<u8>> {
        self.slots.read().get(addr).cloned()
    }

    fn contains(&self, addr: &SlotAddr) -> bool {
        self.slots.read().contains_key(addr)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut slots = self.slots.write();

        // Validate the whole batch before touching anything, so a failed
        // commit leaves zero observable change.
        let mut fresh: HashSet<SlotAddr> = HashSet::new();
        for (addr, _) in batch.creates() {
            if slots.contains_key(addr) || !fresh.insert(*addr) {
                return Err(TallyError::AlreadyExists);
            }
        }
        for (addr, _) in batch.updates() {
            if !slots.contains_key(addr) {
                return Err(TallyError::internal(format!(
                    "update targets missing slot {addr}"
                )));
            }
        }

        let (creates, updates) = batch.into_parts();
        for (addr, bytes) in creates {
            slots.insert(addr, bytes);
        }
        for (addr, bytes) in updates {
            slots.insert(addr, bytes);
        }
        Ok(())
    }

    fn scan(&self) -> Vec<(SlotAddr, Vec<u8>)> {
        let mut out: Vec<(SlotAddr, Vec<u8>)> = self
            .slots
            .read()
            .iter()
            .map(|(addr, bytes)| (*addr, bytes.clone()))
            .collect();
        out.sort_unstable_by_key(|(addr, _)| *addr);
        out
    }
}
