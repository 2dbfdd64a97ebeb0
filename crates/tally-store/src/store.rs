//! The slot store abstraction.

use std::sync::Arc;

use tally_error::Result;
use tally_types::SlotAddr;

use crate::batch::WriteBatch;

/// A shared, append-only slot store.
///
/// The ledger core is written against this trait so the substrate stays
/// swappable: [`crate::MemStore`] for tests and embedding, an adapter over
/// a transactional ledger for production. Implementations must provide:
///
/// - **Atomicity** — [`SlotStore::commit`] applies a batch entirely or not
///   at all; no partial effects are ever observable.
/// - **Create-if-absent** — a batch whose `create` targets an occupied
///   slot fails with [`tally_error::TallyError::AlreadyExists`] rather
///   than overwriting.
///
/// Reads are snapshot-style and may be stale by the time a subsequent
/// commit is attempted; callers re-read and retry on conflict.
pub trait SlotStore: Send + Sync {
    /// Current bytes at `addr`, if the slot is occupied.
    fn get(&self, addr: &SlotAddr) -> Option<Vec<u8>>;

    /// Whether the slot is occupied.
    fn contains(&self, addr: &SlotAddr) -> bool {
        self.get(addr).is_some()
    }

    /// Atomically apply a batch.
    ///
    /// # Errors
    /// [`tally_error::TallyError::AlreadyExists`] if any `create` targets
    /// an occupied slot; [`tally_error::TallyError::Internal`] if an
    /// `update` targets a missing slot (the core never builds such a batch
    /// from consistent reads). On error, nothing is applied.
    fn commit(&self, batch: WriteBatch) -> Result<()>;

    /// Snapshot of every occupied slot, in stable address order.
    fn scan(&self) -> Vec<(SlotAddr, Vec<u8>)>;
}

impl<'a, S: SlotStore + ?Sized> SlotStore for &'a S {
    fn get(&self, addr: &SlotAddr) -> Option<Vec<u8>> {
        (**self).get(addr)
    }

    fn contains(&self, addr: &SlotAddr) -> bool {
        (**self).contains(addr)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        (**self).commit(batch)
    }

    fn scan(&self) -> Vec<(SlotAddr, Vec<u8>)> {
        (**self).scan()
    }
}

impl<S: SlotStore + ?Sized> SlotStore for Arc<S> {
    fn get(&self, addr: &SlotAddr) -> Option<Vec<u8>> {
        (**self).get(addr)
    }

    fn contains(&self, addr: &SlotAddr) -> bool {
        (**self).contains(addr)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        (**self).commit(batch)
    }

    fn scan(&self) -> Vec<(SlotAddr, Vec<u8>)> {
        (**self).scan()
    }
}
