//! Binary record codec.
//!
//! Every stored record is an 8-byte kind discriminator followed by its
//! fields in declaration order. Integers are little-endian; text fields are
//! a 4-byte little-endian byte length followed by raw UTF-8, with no
//! trailing padding. Decoding is strict: truncated buffers, unknown
//! discriminators, invalid UTF-8, and trailing bytes all fail with a
//! [`DecodeError`] instead of panicking, and readers treat such slots as
//! absent.

use tally_error::DecodeError;

use crate::identity::Identity;
use crate::record::{Candidate, Poll, RecordKind, VoteReceipt};

/// Domain prefix mixed into every discriminator hash.
const DISCRIMINATOR_DOMAIN: &[u8] = b"tally:record:v1:";

/// Discriminator length in bytes.
pub const DISCRIMINATOR_BYTES: usize = 8;

impl RecordKind {
    /// The 8-byte discriminator prefixed to every stored record of this
    /// kind: the truncated BLAKE3 hash of the domain prefix and the kind
    /// tag.
    #[must_use]
    pub fn discriminator(self) -> [u8; DISCRIMINATOR_BYTES] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(DISCRIMINATOR_DOMAIN);
        hasher.update(self.tag());
        let hash = hasher.finalize();
        hash.as_bytes()[..DISCRIMINATOR_BYTES]
            .try_into()
            .expect("8 bytes")
    }

    /// Match a buffer's leading bytes against the known discriminators.
    fn from_discriminator(prefix: &[u8]) -> Option<Self> {
        [Self::Poll, Self::Candidate, Self::Vote]
            .into_iter()
            .find(|kind| prefix == kind.discriminator().as_slice())
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn put_text(buf: &mut Vec<u8>, text: &str) {
    let len = u32::try_from(text.len()).expect("text length fits u32");
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(text.as_bytes());
}

impl Poll {
    /// Serialize to the stored byte layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            DISCRIMINATOR_BYTES + 8 + 4 + self.description.len() + 8 + 8 + 8 + 32,
        );
        buf.extend_from_slice(&RecordKind::Poll.discriminator());
        buf.extend_from_slice(&self.poll_id.to_le_bytes());
        put_text(&mut buf, &self.description);
        buf.extend_from_slice(&self.start_time.to_le_bytes());
        buf.extend_from_slice(&self.end_time.to_le_bytes());
        buf.extend_from_slice(&self.candidate_count.to_le_bytes());
        buf.extend_from_slice(self.creator.as_bytes());
        buf
    }

    /// Decode from the stored byte layout.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::expecting(buf, RecordKind::Poll)?;
        let poll_id = reader.u64_le()?;
        let description = reader.text()?;
        let start_time = reader.i64_le()?;
        let end_time = reader.i64_le()?;
        let candidate_count = reader.u64_le()?;
        let creator = Identity::from_bytes(reader.array_32()?);
        reader.finish()?;
        Ok(Self {
            poll_id,
            description,
            start_time,
            end_time,
            candidate_count,
            creator,
        })
    }
}

impl Candidate {
    /// Serialize to the stored byte layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf =
            Vec::with_capacity(DISCRIMINATOR_BYTES + 8 + 8 + 4 + self.name.len() + 8);
        buf.extend_from_slice(&RecordKind::Candidate.discriminator());
        buf.extend_from_slice(&self.candidate_id.to_le_bytes());
        buf.extend_from_slice(&self.poll_id.to_le_bytes());
        put_text(&mut buf, &self.name);
        buf.extend_from_slice(&self.vote_count.to_le_bytes());
        buf
    }

    /// Decode from the stored byte layout.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::expecting(buf, RecordKind::Candidate)?;
        let candidate_id = reader.u64_le()?;
        let poll_id = reader.u64_le()?;
        let name = reader.text()?;
        let vote_count = reader.u64_le()?;
        reader.finish()?;
        Ok(Self {
            candidate_id,
            poll_id,
            name,
            vote_count,
        })
    }
}

impl VoteReceipt {
    /// Serialize to the stored byte layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(DISCRIMINATOR_BYTES + 32 + 8 + 8 + 8);
        buf.extend_from_slice(&RecordKind::Vote.discriminator());
        buf.extend_from_slice(self.voter.as_bytes());
        buf.extend_from_slice(&self.candidate_id.to_le_bytes());
        buf.extend_from_slice(&self.poll_id.to_le_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf
    }

    /// Decode from the stored byte layout.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::expecting(buf, RecordKind::Vote)?;
        let voter = Identity::from_bytes(reader.array_32()?);
        let candidate_id = reader.u64_le()?;
        let poll_id = reader.u64_le()?;
        let timestamp = reader.i64_le()?;
        reader.finish()?;
        Ok(Self {
            voter,
            candidate_id,
            poll_id,
            timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Any-kind decoding (used by scans)
// ---------------------------------------------------------------------------

/// A decoded record of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Poll(Poll),
    Candidate(Candidate),
    Vote(VoteReceipt),
}

impl Record {
    /// The kind this record decoded as.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Poll(_) => RecordKind::Poll,
            Self::Candidate(_) => RecordKind::Candidate,
            Self::Vote(_) => RecordKind::Vote,
        }
    }
}

/// Decode a slot buffer, dispatching on its discriminator.
pub fn decode_record(buf: &[u8]) -> Result<Record, DecodeError> {
    let prefix = buf
        .get(..DISCRIMINATOR_BYTES)
        .ok_or_else(|| DecodeError::Truncated {
            offset: 0,
            needed: DISCRIMINATOR_BYTES - buf.len(),
        })?;
    match RecordKind::from_discriminator(prefix) {
        Some(RecordKind::Poll) => Poll::decode(buf).map(Record::Poll),
        Some(RecordKind::Candidate) => Candidate::decode(buf).map(Record::Candidate),
        Some(RecordKind::Vote) => VoteReceipt::decode(buf).map(Record::Vote),
        None => Err(DecodeError::BadDiscriminator),
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Cursor over a record buffer. Every read is bounds-checked; nothing here
/// panics on malformed input.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading a buffer whose discriminator must match `kind`.
    fn expecting(buf: &'a [u8], kind: RecordKind) -> Result<Self, DecodeError> {
        let mut reader = Self { buf, pos: 0 };
        let prefix = reader.take(DISCRIMINATOR_BYTES)?;
        if prefix != kind.discriminator().as_slice() {
            return Err(DecodeError::BadDiscriminator);
        }
        Ok(reader)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.buf.len() - self.pos;
        if remaining < n {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: n - remaining,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u32_le(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().expect("4 bytes")))
    }

    fn u64_le(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("8 bytes")))
    }

    fn i64_le(&mut self) -> Result<i64, DecodeError> {
        let bytes = self.take(8)?;
        Ok(i64::from_le_bytes(bytes.try_into().expect("8 bytes")))
    }

    fn array_32(&mut self) -> Result<[u8; 32], DecodeError> {
        let bytes = self.take(32)?;
        Ok(bytes.try_into().expect("32 bytes"))
    }

    fn text(&mut self) -> Result<String, DecodeError> {
        let len = self.u32_le()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Assert the buffer was consumed exactly.
    fn finish(self) -> Result<(), DecodeError> {
        let trailing = self.buf.len() - self.pos;
        if trailing > 0 {
            return Err(DecodeError::TrailingBytes { trailing });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
