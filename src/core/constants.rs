//! Protocol constants for the UR fountain transport.
//!
//! The wire-layout values are fixed by the part format and MUST NOT be
//! changed; doing so breaks interoperability with already-displayed QR
//! streams.

// =============================================================================
// PART WIRE FORMAT
// =============================================================================

/// Fixed part header size: seq num, seq len, message len and checksum
/// (4 x LE32) followed by the 32-byte message digest and the LE32 data length.
pub const PART_HEADER_SIZE: usize = 52;

/// SHA-256 digest size carried in every part.
pub const DIGEST_SIZE: usize = 32;

/// CRC-32 suffix appended to every envelope body before text encoding.
pub const ENVELOPE_CRC_SIZE: usize = 4;

/// Largest message length encodable in the LE32 header field.
pub const MAX_MESSAGE_LEN: usize = u32::MAX as usize;

// =============================================================================
// ENCODER DEFAULTS
// =============================================================================

/// Default upper bound on a single part's fragment payload, in bytes.
///
/// Keeps each part comfortably inside a QR code that still scans reliably
/// at hand-held distance on an animated display.
pub const DEFAULT_MAX_FRAGMENT_LEN: usize = 250;

// =============================================================================
// TEXTUAL ENVELOPE
// =============================================================================

/// URI scheme prefix of every encoded part.
pub const UR_SCHEME: &str = "ur";

/// UR type tag used for partially signed Bitcoin transactions.
pub const PSBT_UR_TYPE: &str = "psbt";
