//! Core types for the tally voting ledger.
//!
//! Defines the three record kinds (poll, candidate, vote receipt), the
//! 32-byte identities and slot addresses they are keyed by, the normative
//! size limits, and the binary record codec used by the slot store.

pub mod codec;
pub mod identity;
pub mod record;
pub mod slot;

pub use codec::{Record, decode_record};
pub use identity::Identity;
pub use record::{
    CANDIDATE_SEED, Candidate, MAX_CANDIDATE_NAME_BYTES, MAX_DESCRIPTION_BYTES,
    MIN_CANDIDATE_NAME_BYTES, POLL_SEED, Poll, RecordKind, VOTE_SEED, VoteReceipt,
};
pub use slot::SlotAddr;
