//! The entity manager and query surface.

use tracing::{debug, info};

use tally_error::{Result, TallyError};
use tally_store::{SlotStore, WriteBatch, candidate_addr, poll_addr, vote_addr};
use tally_types::{Candidate, Identity, Poll, Record, SlotAddr, VoteReceipt, decode_record};

use crate::clock::{Clock, SystemClock};
use crate::validate;

/// The three state transitions and the read-only views over one store.
///
/// Each public operation is a single attempted atomic transition: it
/// re-reads state, validates, derives the target slots, and submits one
/// [`WriteBatch`]. It either fully commits or fails with one error kind
/// and zero observable change. Conflict errors mean a concurrent writer
/// occupied a derived slot first; callers re-read and resubmit.
///
/// The store is an explicit handle, not a process-wide singleton, so the
/// core runs unchanged against [`tally_store::MemStore`], a shared
/// `Arc<MemStore>`, or any substrate adapter implementing [`SlotStore`].
#[derive(Debug)]
pub struct Ledger<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: SlotStore> Ledger<S> {
    /// A ledger over `store` using the system clock.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: SlotStore, C: Clock> Ledger<S, C> {
    /// A ledger over `store` with an explicit time source.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Borrow the underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // State transitions
    // -----------------------------------------------------------------------

    /// Create a new poll owned by `(poll_id, creator)`.
    ///
    /// The creator is part of the address seed, so two different creators
    /// may reuse the same `poll_id` without conflict, while the same
    /// creator reusing one fails with [`TallyError::AlreadyExists`].
    pub fn initialize_poll(
        &self,
        poll_id: u64,
        description: &str,
        start_time: i64,
        end_time: i64,
        creator: Identity,
    ) -> Result<Poll> {
        let addr = poll_addr(poll_id, &creator);
        if self.store.contains(&addr) {
            return Err(TallyError::AlreadyExists);
        }
        validate::check_time_range(start_time, end_time)?;
        validate::check_description(description)?;

        let poll = Poll {
            poll_id,
            description: description.to_owned(),
            start_time,
            end_time,
            candidate_count: 0,
            creator,
        };
        let mut batch = WriteBatch::new();
        batch.create(addr, poll.encode());
        self.store.commit(batch)?;

        info!(
            poll_id,
            creator = %creator,
            start_time,
            end_time,
            "poll initialized"
        );
        Ok(poll)
    }

    /// Add a candidate to an existing poll.
    ///
    /// The new candidate consumes the poll's current `candidate_count` as
    /// its id; the count increment commits in the same batch as the record
    /// creation, so ids stay dense and the count never drifts from the
    /// number of existing candidates. Candidates may be added at any time
    /// the poll exists; the voting window does not gate this transition.
    ///
    /// Losing the create-if-absent race against a concurrent writer (which
    /// consumed the same id first) surfaces [`TallyError::AlreadyExists`];
    /// the caller re-reads and resubmits.
    pub fn add_candidate(&self, poll_id: u64, creator: Identity, name: &str) -> Result<Candidate> {
        let paddr = poll_addr(poll_id, &creator);
        let mut poll = self
            .poll_at(&paddr)
            .ok_or(TallyError::PollNotFound { poll_id })?;
        validate::check_candidate_name(name)?;

        let candidate = Candidate {
            candidate_id: poll.candidate_count,
            poll_id,
            name: name.to_owned(),
            vote_count: 0,
        };
        poll.candidate_count += 1;

        let mut batch = WriteBatch::new();
        batch.create(
            candidate_addr(poll_id, candidate.candidate_id),
            candidate.encode(),
        );
        batch.update(paddr, poll.encode());
        self.store.commit(batch)?;

        info!(
            poll_id,
            candidate_id = candidate.candidate_id,
            name = %candidate.name,
            "candidate added"
        );
        Ok(candidate)
    }

    /// Cast a vote for a candidate of a poll.
    ///
    /// At most one receipt can ever exist per `(poll_id, voter)`; its mere
    /// existence at the derived slot is the proof of prior voting. The
    /// receipt creation and the candidate's `vote_count` increment commit
    /// together or not at all.
    pub fn cast_vote(&self, poll_id: u64, voter: Identity, candidate_id: u64) -> Result<VoteReceipt> {
        let poll = self
            .find_poll(poll_id)
            .ok_or(TallyError::PollNotFound { poll_id })?;
        let mut candidate = self
            .candidate(poll_id, candidate_id)
            .ok_or(TallyError::CandidateNotFound {
                poll_id,
                candidate_id,
            })?;

        let now = self.clock.unix_now();
        validate::check_voting_window(now, poll.start_time, poll.end_time)?;

        let vaddr = vote_addr(poll_id, &voter);
        if self.store.contains(&vaddr) {
            return Err(TallyError::AlreadyVoted { poll_id });
        }

        let receipt = VoteReceipt {
            voter,
            candidate_id,
            poll_id,
            timestamp: now,
        };
        candidate.vote_count += 1;

        let mut batch = WriteBatch::new();
        batch.create(vaddr, receipt.encode());
        batch.update(candidate_addr(poll_id, candidate_id), candidate.encode());
        self.store.commit(batch).map_err(|err| match err {
            // The only create in this batch is the receipt: an occupied
            // slot means a concurrent vote by the same identity landed
            // between our existence check and the commit.
            TallyError::AlreadyExists => TallyError::AlreadyVoted { poll_id },
            other => other,
        })?;

        info!(
            poll_id,
            candidate_id,
            voter = %voter,
            timestamp = now,
            "vote cast"
        );
        Ok(receipt)
    }

    // -----------------------------------------------------------------------
    // Query surface
    // -----------------------------------------------------------------------

    /// Every decodable poll record, ordered by `(poll_id, creator)`.
    pub fn polls(&self) -> Vec<Poll> {
        let mut out: Vec<Poll> = self
            .scan_records()
            .into_iter()
            .filter_map(|record| match record {
                Record::Poll(poll) => Some(poll),
                _ => None,
            })
            .collect();
        out.sort_unstable_by_key(|poll| (poll.poll_id, poll.creator));
        out
    }

    /// The poll at `(poll_id, creator)`, if present and decodable.
    pub fn poll(&self, poll_id: u64, creator: &Identity) -> Option<Poll> {
        self.poll_at(&poll_addr(poll_id, creator))
    }

    /// The first poll with `poll_id` in `(poll_id, creator)` order.
    ///
    /// Candidate and receipt slots are keyed by `poll_id` alone, so this
    /// is how the vote path resolves the poll whose window applies.
    pub fn find_poll(&self, poll_id: u64) -> Option<Poll> {
        self.polls().into_iter().find(|poll| poll.poll_id == poll_id)
    }

    /// The candidates of a poll, ordered by `candidate_id`.
    pub fn candidates(&self, poll_id: u64) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = self
            .scan_records()
            .into_iter()
            .filter_map(|record| match record {
                Record::Candidate(candidate) if candidate.poll_id == poll_id => Some(candidate),
                _ => None,
            })
            .collect();
        out.sort_unstable_by_key(|candidate| candidate.candidate_id);
        out
    }

    /// The candidate at `(poll_id, candidate_id)`, if present and decodable.
    pub fn candidate(&self, poll_id: u64, candidate_id: u64) -> Option<Candidate> {
        let bytes = self.store.get(&candidate_addr(poll_id, candidate_id))?;
        match Candidate::decode(&bytes) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                debug!(poll_id, candidate_id, %err, "undecodable candidate slot treated as absent");
                None
            }
        }
    }

    /// The vote receipt for `(poll_id, voter)`, if present and decodable.
    pub fn vote_receipt(&self, poll_id: u64, voter: &Identity) -> Option<VoteReceipt> {
        let bytes = self.store.get(&vote_addr(poll_id, voter))?;
        match VoteReceipt::decode(&bytes) {
            Ok(receipt) => Some(receipt),
            Err(err) => {
                debug!(poll_id, voter = %voter, %err, "undecodable receipt slot treated as absent");
                None
            }
        }
    }

    /// Whether `(poll_id, voter)` already holds a receipt slot.
    ///
    /// Checks raw slot occupancy, matching the write path: an occupied
    /// receipt slot blocks re-voting even if its bytes no longer decode.
    pub fn has_voted(&self, poll_id: u64, voter: &Identity) -> bool {
        self.store.contains(&vote_addr(poll_id, voter))
    }

    // -----------------------------------------------------------------------
    // Read helpers
    // -----------------------------------------------------------------------

    fn poll_at(&self, addr: &SlotAddr) -> Option<Poll> {
        let bytes = self.store.get(addr)?;
        match Poll::decode(&bytes) {
            Ok(poll) => Some(poll),
            Err(err) => {
                debug!(%addr, %err, "undecodable poll slot treated as absent");
                None
            }
        }
    }

    /// Decode every slot in the current snapshot, skipping malformed ones.
    fn scan_records(&self) -> Vec<Record> {
        self.store
            .scan()
            .into_iter()
            .filter_map(|(addr, bytes)| match decode_record(&bytes) {
                Ok(record) => Some(record),
                Err(err) => {
                    debug!(%addr, %err, "skipping undecodable slot during scan");
                    None
                }
            })
            .collect()
    }
}
