//! Deterministic slot address derivation.
//!
//! A record's logical identity (namespace tag + ordered seed fields) maps
//! to exactly one canonical 32-byte address: the BLAKE3 hash of a domain
//! prefix, the tag, and the seed bytes in order. Identical seeds always
//! yield the identical address; distinct seeds collide only with
//! cryptographic-hash probability. The function is pure, so writers and
//! readers reconstruct the same address from known fields.

use tally_types::{CANDIDATE_SEED, Identity, POLL_SEED, SlotAddr, VOTE_SEED};

/// Domain prefix separating slot addresses from every other BLAKE3 use.
const ADDR_DOMAIN: &[u8] = b"tally:slot:v1:";

/// Derive the canonical slot address for `tag` and the ordered `seeds`.
#[must_use]
pub fn derive_addr(tag: &[u8], seeds: &[&[u8]]) -> SlotAddr {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ADDR_DOMAIN);
    hasher.update(tag);
    for seed in seeds {
        hasher.update(seed);
    }
    SlotAddr::from_bytes(*hasher.finalize().as_bytes())
}

/// Address of the poll record for `(poll_id, creator)`.
#[must_use]
pub fn poll_addr(poll_id: u64, creator: &Identity) -> SlotAddr {
    derive_addr(POLL_SEED, &[&poll_id.to_le_bytes(), creator.as_bytes()])
}

/// Address of the candidate record for `(poll_id, candidate_id)`.
#[must_use]
pub fn candidate_addr(poll_id: u64, candidate_id: u64) -> SlotAddr {
    derive_addr(
        CANDIDATE_SEED,
        &[&poll_id.to_le_bytes(), &candidate_id.to_le_bytes()],
    )
}

/// Address of the vote receipt for `(poll_id, voter)`.
#[must_use]
pub fn vote_addr(poll_id: u64, voter: &Identity) -> SlotAddr {
    derive_addr(VOTE_SEED, &[&poll_id.to_le_bytes(), voter.as_bytes()])
}
