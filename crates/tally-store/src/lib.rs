//! The shared slot store.
//!
//! One flat, append-only map from derived 32-byte addresses to record
//! bytes. The store's sole concurrency primitive is the atomic
//! [`WriteBatch`] commit with create-if-absent semantics: a batch either
//! fully lands or fully fails, and a create targeting an occupied slot
//! fails the whole batch. That is what makes duplicate polls, duplicate
//! candidate ids, and double votes impossible under concurrent submission,
//! without any caller-visible locks.

pub mod addr;
pub mod batch;
pub mod mem;
pub mod store;

pub use addr::{candidate_addr, derive_addr, poll_addr, vote_addr};
pub use batch::WriteBatch;
pub use mem::MemStore;
pub use store::SlotStore;
