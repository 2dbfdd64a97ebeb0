//! Stateless precondition checks.
//!
//! Applied before any mutation; a violation aborts the whole operation
//! with no partial effect. All text limits are measured in **bytes**, not
//! code points, so multi-byte characters use up a limit faster than their
//! visible length suggests. The boundaries are exact: a 280-byte
//! description passes, 281 fails.

use tally_error::{Result, TallyError};
use tally_types::{MAX_CANDIDATE_NAME_BYTES, MAX_DESCRIPTION_BYTES, MIN_CANDIDATE_NAME_BYTES};

/// Poll description: at most [`MAX_DESCRIPTION_BYTES`] bytes, empty allowed.
pub fn check_description(description: &str) -> Result<()> {
    let len = description.len();
    if len > MAX_DESCRIPTION_BYTES {
        return Err(TallyError::DescriptionTooLong {
            len,
            limit: MAX_DESCRIPTION_BYTES,
        });
    }
    Ok(())
}

/// Poll time range: `start_time` strictly before `end_time`.
pub fn check_time_range(start_time: i64, end_time: i64) -> Result<()> {
    if start_time >= end_time {
        return Err(TallyError::InvalidTimeRange {
            start: start_time,
            end: end_time,
        });
    }
    Ok(())
}

/// Candidate name: [`MIN_CANDIDATE_NAME_BYTES`]..=[`MAX_CANDIDATE_NAME_BYTES`] bytes.
pub fn check_candidate_name(name: &str) -> Result<()> {
    let len = name.len();
    if len < MIN_CANDIDATE_NAME_BYTES || len > MAX_CANDIDATE_NAME_BYTES {
        return Err(TallyError::InvalidCandidateName {
            len,
            min: MIN_CANDIDATE_NAME_BYTES,
            max: MAX_CANDIDATE_NAME_BYTES,
        });
    }
    Ok(())
}

/// Vote timing: `start_time <= now <= end_time`, both ends inclusive.
pub fn check_voting_window(now: i64, start_time: i64, end_time: i64) -> Result<()> {
    if now < start_time || now > end_time {
        return Err(TallyError::VotingPeriodInvalid {
            now,
            start: start_time,
            end: end_time,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_boundary_is_exact() {
        assert!(check_description("").is_ok());
        assert!(check_description(&"a".repeat(280)).is_ok());
        assert_eq!(
            check_description(&"a".repeat(281)),
            Err(TallyError::DescriptionTooLong {
                len: 281,
                limit: 280
            })
        );
    }

    #[test]
    fn description_counts_bytes_not_chars() {
        // 70 rocket emoji: 70 chars but 280 bytes. One more byte tips it.
        let rockets = "🚀".repeat(70);
        assert_eq!(rockets.len(), 280);
        assert!(check_description(&rockets).is_ok());
        let over = format!("{rockets}a");
        assert!(check_description(&over).is_err());
    }

    #[test]
    fn time_range_must_be_strictly_increasing() {
        assert!(check_time_range(100, 200).is_ok());
        assert_eq!(
            check_time_range(100, 100),
            Err(TallyError::InvalidTimeRange {
                start: 100,
                end: 100
            })
        );
        assert!(check_time_range(200, 100).is_err());
        // Negative timestamps are ordinary values, only ordering matters.
        assert!(check_time_range(-100, -50).is_ok());
    }

    #[test]
    fn candidate_name_bounds_are_exact() {
        assert!(check_candidate_name("A").is_ok());
        assert!(check_candidate_name(&"a".repeat(50)).is_ok());
        assert_eq!(
            check_candidate_name(""),
            Err(TallyError::InvalidCandidateName {
                len: 0,
                min: 1,
                max: 50
            })
        );
        assert!(check_candidate_name(&"a".repeat(51)).is_err());
        // "Rust 🦀" is 6 visible characters but 9 bytes.
        assert!(check_candidate_name("Rust 🦀").is_ok());
        assert!(check_candidate_name(&"🦀".repeat(13)).is_err());
    }

    #[test]
    fn voting_window_is_inclusive() {
        assert!(check_voting_window(100, 100, 200).is_ok());
        assert!(check_voting_window(200, 100, 200).is_ok());
        assert_eq!(
            check_voting_window(99, 100, 200),
            Err(TallyError::VotingPeriodInvalid {
                now: 99,
                start: 100,
                end: 200
            })
        );
        assert!(check_voting_window(201, 100, 200).is_err());
    }
}
