//! Stateful fountain encoder.
//!
//! Given a message, deterministically emits an unbounded stream of parts:
//! the first `seq_len` parts are the pure fragments in order, every later
//! part is a pseudo-random XOR mix. The encoder never terminates on its own;
//! the driving loop (typically a display timer) decides when to stop.

use sha2::{Digest, Sha256};

use crate::core::{DIGEST_SIZE, EncoderError, MAX_MESSAGE_LEN, crc32};

use super::fragment::{fragment_count, fragment_length, mix, split};
use super::part::Part;
use super::sampler::choose_fragment_indexes;

/// Fountain encoder session.
///
/// One session per export; construct a fresh encoder rather than reusing one
/// across exports so sequence numbers and session identity never leak between
/// transfers.
#[derive(Debug, Clone)]
pub struct FountainEncoder {
    fragments: Vec<Vec<u8>>,
    fragment_len: usize,
    message_len: usize,
    checksum: u32,
    digest: [u8; DIGEST_SIZE],
    seq_num: u32,
}

impl FountainEncoder {
    /// Create an encoder session for `message`.
    ///
    /// The per-part fragment length is derived from the message so that it
    /// never exceeds `max_fragment_len`.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidFragmentLen`] for a zero bound and
    /// [`EncoderError::MessageTooLarge`] when the message length does not fit
    /// the LE32 header field.
    pub fn new(message: &[u8], max_fragment_len: usize) -> Result<Self, EncoderError> {
        if max_fragment_len == 0 {
            return Err(EncoderError::InvalidFragmentLen);
        }
        if message.len() > MAX_MESSAGE_LEN {
            return Err(EncoderError::MessageTooLarge {
                len: message.len(),
                max: MAX_MESSAGE_LEN,
            });
        }

        let fragment_len = fragment_length(message.len(), max_fragment_len);

        Ok(Self {
            fragments: split(message, fragment_len),
            fragment_len,
            message_len: message.len(),
            checksum: crc32(message),
            digest: Sha256::digest(message).into(),
            seq_num: 0,
        })
    }

    /// Emit the next part.
    ///
    /// Calling this past `seq_len` keeps producing new, valid mixed parts
    /// indefinitely.
    pub fn next_part(&mut self) -> Part {
        self.seq_num = self.seq_num.wrapping_add(1);
        if self.seq_num == 0 {
            // Sequence numbers are 1-based; skip 0 on the (theoretical) wrap.
            self.seq_num = 1;
        }

        let indexes = choose_fragment_indexes(self.seq_num, self.seq_len(), self.checksum);

        Part {
            seq_num: self.seq_num,
            seq_len: self.seq_len() as u32,
            message_len: self.message_len as u32,
            checksum: self.checksum,
            digest: self.digest,
            data: mix(&self.fragments, &indexes),
        }
    }

    /// Last emitted sequence number (0 before the first part).
    #[must_use]
    pub fn seq_num(&self) -> u32 {
        self.seq_num
    }

    /// Number of pure fragments in the session.
    #[must_use]
    pub fn seq_len(&self) -> usize {
        fragment_count(self.message_len, self.fragment_len)
    }

    /// Unpadded message length in bytes.
    #[must_use]
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// Per-part fragment payload length in bytes.
    #[must_use]
    pub fn fragment_len(&self) -> usize {
        self.fragment_len
    }

    /// CRC-32 of the whole message.
    #[must_use]
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Whether every pure part has been emitted at least once.
    ///
    /// Display loops use this to switch from generating parts to cycling the
    /// ones already captured.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.seq_num as usize >= self.seq_len()
    }
}
