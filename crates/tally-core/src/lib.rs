//! Entity manager and query surface for the tally voting ledger.
//!
//! [`Ledger`] combines address derivation, slot-existence checks, the
//! validation gate, and the record codec into the three atomic state
//! transitions (initialize poll, add candidate, cast vote), plus the
//! read-only scans a thin client consumes. All state lives in the
//! [`tally_store::SlotStore`] handle passed in at construction; the core
//! holds no locks and no global state of its own.

pub mod clock;
pub mod ledger;
pub mod validate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::Ledger;
