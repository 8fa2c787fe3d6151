//! Core constants, error types and shared helpers.

mod constants;
mod error;

pub use constants::*;
pub use error::*;

use crc::{CRC_32_ISO_HDLC, Crc};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32 (ISO HDLC) over `data`.
///
/// Used both as the whole-message checksum repeated in every part and as the
/// structural integrity suffix of envelope bodies.
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}
