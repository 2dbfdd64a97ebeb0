//! Public identities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte public identity (poll creator or voter).
///
/// The core never interprets the bytes; key management and signatures live
/// outside the ledger. Identities participate in address derivation, so two
/// identities are the same actor exactly when their bytes are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Wrap raw identity bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes (used as an address-derivation seed).
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Deterministic test/demo identity: the byte `fill` repeated.
    #[must_use]
    pub const fn filled(fill: u8) -> Self {
        Self([fill; 32])
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full hex is noise in logs; eight leading nibbles identify a test
        // identity unambiguously.
        write!(f, "Identity({:02x}{:02x}{:02x}{:02x}..)", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}
