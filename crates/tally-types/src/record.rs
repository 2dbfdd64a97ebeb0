//! The three record kinds and their normative limits.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Namespace tag for poll slots.
pub const POLL_SEED: &[u8] = b"poll";
/// Namespace tag for candidate slots.
pub const CANDIDATE_SEED: &[u8] = b"candidate";
/// Namespace tag for vote-receipt slots.
pub const VOTE_SEED: &[u8] = b"vote";

/// Maximum poll description length in bytes (empty is allowed).
pub const MAX_DESCRIPTION_BYTES: usize = 280;
/// Minimum candidate name length in bytes.
pub const MIN_CANDIDATE_NAME_BYTES: usize = 1;
/// Maximum candidate name length in bytes.
pub const MAX_CANDIDATE_NAME_BYTES: usize = 50;

/// Discriminates the record kinds sharing the flat slot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Poll,
    Candidate,
    Vote,
}

impl RecordKind {
    /// The namespace tag shared by this kind's addresses and discriminator.
    #[must_use]
    pub const fn tag(self) -> &'static [u8] {
        match self {
            Self::Poll => POLL_SEED,
            Self::Candidate => CANDIDATE_SEED,
            Self::Vote => VOTE_SEED,
        }
    }
}

/// A poll record.
///
/// Identity is the `(poll_id, creator)` pair: the same creator may not
/// reuse a poll id, while distinct creators may. `candidate_count` is the
/// only field ever mutated after creation and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub poll_id: u64,
    /// UTF-8 text, at most [`MAX_DESCRIPTION_BYTES`] bytes.
    pub description: String,
    /// Unix seconds, strictly less than `end_time`.
    pub start_time: i64,
    /// Unix seconds.
    pub end_time: i64,
    /// Number of candidate records created under this poll.
    pub candidate_count: u64,
    pub creator: Identity,
}

impl Poll {
    /// Whether `now` falls inside the inclusive voting window.
    #[must_use]
    pub const fn is_open_at(&self, now: i64) -> bool {
        self.start_time <= now && now <= self.end_time
    }
}

/// A candidate record.
///
/// `candidate_id` is assigned from the owning poll's `candidate_count` at
/// creation time, so ids within a poll are dense: `0, 1, 2, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: u64,
    pub poll_id: u64,
    /// UTF-8 text, 1 to [`MAX_CANDIDATE_NAME_BYTES`] bytes.
    pub name: String,
    pub vote_count: u64,
}

/// A vote receipt.
///
/// Existence at the slot derived from `(poll_id, voter)` is itself the
/// proof of prior voting; the record is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub voter: Identity,
    pub candidate_id: u64,
    pub poll_id: u64,
    /// Unix seconds at which the vote committed.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voting_window_is_inclusive_on_both_ends() {
        let poll = Poll {
            poll_id: 1,
            description: String::new(),
            start_time: 100,
            end_time: 200,
            candidate_count: 0,
            creator: Identity::filled(1),
        };
        assert!(!poll.is_open_at(99));
        assert!(poll.is_open_at(100));
        assert!(poll.is_open_at(150));
        assert!(poll.is_open_at(200));
        assert!(!poll.is_open_at(201));
    }

    #[test]
    fn kind_tags_are_distinct() {
        assert_ne!(RecordKind::Poll.tag(), RecordKind::Candidate.tag());
        assert_ne!(RecordKind::Candidate.tag(), RecordKind::Vote.tag());
    }

    #[test]
    fn records_serialize_to_client_json() {
        let receipt = VoteReceipt {
            voter: Identity::filled(9),
            candidate_id: 2,
            poll_id: 1,
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_string(&receipt).expect("serialize receipt");
        assert!(json.contains("\"candidate_id\":2"));
        assert!(json.contains("\"timestamp\":1700000000"));
    }
}
