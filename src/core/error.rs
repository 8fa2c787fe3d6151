//! Error types for the UR fountain transport.

use thiserror::Error;

/// Errors that can occur when creating an encoder session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncoderError {
    /// The maximum fragment length must be at least one byte.
    #[error("invalid max fragment length: must be >= 1")]
    InvalidFragmentLen,

    /// The message does not fit the LE32 length field of the part header.
    #[error("message too large: {len} bytes, maximum {max}")]
    MessageTooLarge {
        /// Message length in bytes.
        len: usize,
        /// Largest encodable message length.
        max: usize,
    },

    /// The UR type tag contains characters outside `a-z`, `0-9` and `-`.
    #[error("invalid UR type: {0:?}")]
    InvalidUrType(String),
}

/// Errors that can occur when parsing a part from its wire or text form.
///
/// All of these are non-fatal to a decode session: the channel is assumed
/// noisy and a malformed part is simply dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is shorter than required.
    #[error("part too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum bytes required.
        expected: usize,
        /// Actual bytes received.
        actual: usize,
    },

    /// Input has bytes beyond the declared data length.
    #[error("trailing bytes after part data: {0}")]
    TrailingBytes(usize),

    /// A header field holds a value the protocol forbids (e.g. zero).
    #[error("invalid header field: {0}")]
    InvalidField(&'static str),

    /// The text does not start with the `ur:` scheme.
    #[error("missing ur: scheme prefix")]
    InvalidScheme,

    /// The UR type tag contains characters outside `a-z`, `0-9` and `-`.
    #[error("invalid UR type: {0:?}")]
    InvalidUrType(String),

    /// The envelope has the wrong number of `/` components.
    #[error("invalid envelope structure")]
    InvalidStructure,

    /// The `<seq>-<len>` component of a multi-part envelope is malformed.
    #[error("invalid sequence component: {0:?}")]
    InvalidSequence(String),

    /// The envelope sequence component disagrees with the part header.
    #[error("envelope sequence {envelope_seq}-{envelope_len} disagrees with part header {header_seq}-{header_len}")]
    SequenceMismatch {
        /// Sequence number from the envelope.
        envelope_seq: u32,
        /// Sequence length from the envelope.
        envelope_len: u32,
        /// Sequence number from the part header.
        header_seq: u32,
        /// Sequence length from the part header.
        header_len: u32,
    },

    /// The body is not valid hexadecimal.
    #[error("invalid body encoding")]
    InvalidBody,

    /// The body's CRC-32 suffix does not match its content.
    #[error("envelope checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    EnvelopeChecksum {
        /// CRC-32 carried in the body suffix.
        expected: u32,
        /// CRC-32 computed over the body.
        actual: u32,
    },

    /// The text is not valid base64 (PSBT boundary helper).
    #[error("invalid base64 payload")]
    InvalidBase64,
}

/// Terminal decode-session failures.
///
/// Unlike [`ParseError`], these end the session: every fragment was resolved
/// but the reassembled payload does not verify. The only recovery is to
/// discard the decoder and start a fresh scan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecoderError {
    /// The reassembled payload's CRC-32 differs from the session checksum.
    #[error("message checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// Checksum every part of the session carried.
        expected: u32,
        /// Checksum of the reassembled payload.
        actual: u32,
    },

    /// The reassembled payload's SHA-256 differs from the session digest.
    #[error("message digest mismatch")]
    DigestMismatch,
}

/// Top-level error for the UR fountain transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrFountainError {
    /// Encoder session creation failed.
    #[error("encoder error: {0}")]
    Encoder(#[from] EncoderError),

    /// A part failed to parse.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A decode session ended in terminal failure.
    #[error("decoder error: {0}")]
    Decoder(#[from] DecoderError),
}
