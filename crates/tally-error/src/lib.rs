//! Error taxonomy for the tally voting ledger.
//!
//! One shared [`TallyError`] enum covers every failure an entity-manager
//! operation can surface, plus a separate [`DecodeError`] for malformed
//! stored bytes. Decode failures never cross the read API: scans and
//! lookups treat an undecodable slot as absent.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T, E = TallyError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// TallyError
// ---------------------------------------------------------------------------

/// Every error an entity-manager operation can return.
///
/// Operations are all-or-nothing: any of these aborts with zero observable
/// state change. Conflict variants ([`TallyError::AlreadyExists`],
/// [`TallyError::AlreadyVoted`]) are expected under concurrent submission
/// and safe to retry after re-reading state; the rest are deterministic
/// given the state the operation observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TallyError {
    /// Poll description exceeds the byte limit.
    #[error("poll description is {len} bytes, limit is {limit}")]
    DescriptionTooLong { len: usize, limit: usize },

    /// Poll start time is not strictly before its end time.
    #[error("poll start time {start} is not before end time {end}")]
    InvalidTimeRange { start: i64, end: i64 },

    /// Candidate name byte length is outside the accepted range.
    #[error("candidate name is {len} bytes, accepted range is {min}..={max}")]
    InvalidCandidateName { len: usize, min: usize, max: usize },

    /// The vote arrived outside the poll's voting window.
    #[error("voting window [{start}, {end}] does not contain {now}")]
    VotingPeriodInvalid { now: i64, start: i64, end: i64 },

    /// A create-if-absent write targeted an occupied slot.
    #[error("record already exists at its derived slot")]
    AlreadyExists,

    /// The voter already holds a receipt for this poll.
    #[error("identity already voted in poll {poll_id}")]
    AlreadyVoted { poll_id: u64 },

    /// No poll record exists for the given identity tuple.
    #[error("poll {poll_id} not found")]
    PollNotFound { poll_id: u64 },

    /// No candidate record exists at the given index of the poll.
    #[error("candidate {candidate_id} not found in poll {poll_id}")]
    CandidateNotFound { poll_id: u64, candidate_id: u64 },

    /// Invariant violation inside the core. Not reachable through the
    /// public operations unless a store misbehaves.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl TallyError {
    /// Construct an [`TallyError::Internal`] from anything stringly.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Conflict errors arise when a concurrent writer occupied the target
    /// slot first. The caller may re-read state and resubmit.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists | Self::AlreadyVoted { .. })
    }

    /// Validation errors are deterministic for the submitted inputs and
    /// never worth retrying.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DescriptionTooLong { .. }
                | Self::InvalidTimeRange { .. }
                | Self::InvalidCandidateName { .. }
        )
    }

    /// Not-found errors are terminal for the call that produced them.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PollNotFound { .. } | Self::CandidateNotFound { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Failure while decoding a stored record buffer.
///
/// Kept separate from [`TallyError`] on purpose: readers treat a slot whose
/// bytes do not decode as absent, so this type stays inside the codec and
/// store layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Buffer ended before the field at `offset` could be read in full.
    #[error("buffer truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// Leading 8 bytes do not match any known record discriminator.
    #[error("unknown record discriminator")]
    BadDiscriminator,

    /// A length-prefixed text field held invalid UTF-8.
    #[error("text field is not valid UTF-8")]
    InvalidUtf8,

    /// Bytes remained after a fully decoded record body.
    #[error("{trailing} trailing bytes after record body")]
    TrailingBytes { trailing: usize },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_classification() {
        assert!(TallyError::AlreadyExists.is_conflict());
        assert!(TallyError::AlreadyVoted { poll_id: 7 }.is_conflict());
        assert!(!TallyError::PollNotFound { poll_id: 7 }.is_conflict());
    }

    #[test]
    fn validation_classification() {
        let err = TallyError::DescriptionTooLong {
            len: 281,
            limit: 280,
        };
        assert!(err.is_validation());
        assert!(!err.is_conflict());
        assert!(!err.is_not_found());

        let err = TallyError::VotingPeriodInvalid {
            now: 5,
            start: 10,
            end: 20,
        };
        assert!(!err.is_validation());
    }

    #[test]
    fn not_found_classification() {
        assert!(
            TallyError::CandidateNotFound {
                poll_id: 1,
                candidate_id: 0
            }
            .is_not_found()
        );
        assert!(!TallyError::AlreadyExists.is_not_found());
    }

    #[test]
    fn display_messages_name_the_offending_values() {
        let err = TallyError::VotingPeriodInvalid {
            now: 99,
            start: 100,
            end: 200,
        };
        let text = err.to_string();
        assert!(text.contains("99"));
        assert!(text.contains("100"));
        assert!(text.contains("200"));

        let err = DecodeError::Truncated {
            offset: 12,
            needed: 4,
        };
        assert!(err.to_string().contains("offset 12"));
    }

    #[test]
    fn internal_constructor() {
        let err = TallyError::internal("store rejected update of missing slot");
        assert!(matches!(err, TallyError::Internal { .. }));
        assert!(err.to_string().contains("missing slot"));
    }
}
