//! Facade crate for the tally voting ledger.
//!
//! Re-exports the public surface of the member crates: record types and
//! codec (`tally-types`), the slot store (`tally-store`), the entity
//! manager and query surface (`tally-core`), and the shared error
//! taxonomy (`tally-error`).
//!
//! ```
//! use tally::{Identity, Ledger, ManualClock, MemStore, TallyError};
//!
//! let clock = ManualClock::new(1_700_000_000);
//! let ledger = Ledger::with_clock(MemStore::new(), clock.clone());
//!
//! let creator = Identity::filled(1);
//! let voter = Identity::filled(2);
//!
//! ledger
//!     .initialize_poll(1, "A vs B", 1_700_000_000, 1_700_086_400, creator)
//!     .expect("poll");
//! ledger.add_candidate(1, creator, "A").expect("candidate A");
//! ledger.add_candidate(1, creator, "B").expect("candidate B");
//!
//! let receipt = ledger.cast_vote(1, voter, 0).expect("vote");
//! assert_eq!(receipt.candidate_id, 0);
//! assert_eq!(ledger.candidates(1)[0].vote_count, 1);
//!
//! // The receipt's existence is the anti-double-vote proof.
//! assert_eq!(
//!     ledger.cast_vote(1, voter, 1),
//!     Err(TallyError::AlreadyVoted { poll_id: 1 })
//! );
//! ```

pub use tally_core::{Clock, Ledger, ManualClock, SystemClock, validate};
pub use tally_error::{DecodeError, Result, TallyError};
pub use tally_store::{
    MemStore, SlotStore, WriteBatch, candidate_addr, derive_addr, poll_addr, vote_addr,
};
pub use tally_types::{
    CANDIDATE_SEED, Candidate, Identity, MAX_CANDIDATE_NAME_BYTES, MAX_DESCRIPTION_BYTES,
    MIN_CANDIDATE_NAME_BYTES, POLL_SEED, Poll, Record, RecordKind, SlotAddr, VOTE_SEED,
    VoteReceipt, decode_record,
};
