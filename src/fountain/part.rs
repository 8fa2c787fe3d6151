//! Part type and binary wire codec.
//!
//! A part is the unit exchanged over the visual channel and is fully
//! self-contained: a decoder with zero prior state can extract the session
//! parameters and the (possibly mixed) fragment payload from a single part.
//!
//! Wire format:
//! ```text
//! +0   Sequence Number (4 bytes LE32, >= 1)
//! +4   Sequence Length (4 bytes LE32, >= 1)
//! +8   Message Length  (4 bytes LE32)
//! +12  Message CRC-32  (4 bytes LE32)
//! +16  Message SHA-256 (32 bytes)
//! +48  Data Length     (4 bytes LE32, >= 1)
//! +52  Fragment Data   (variable)
//! ```

use std::collections::BTreeSet;

use crate::core::{DIGEST_SIZE, PART_HEADER_SIZE, ParseError};

use super::sampler::choose_fragment_indexes;

/// One transmitted or received protocol unit.
///
/// `data` is the XOR of the fragments selected by
/// [`fragment_indexes`](Self::fragment_indexes); the index set itself is
/// never transmitted, both sides derive it from the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// 1-based part number, never reused within an encoding session.
    pub seq_num: u32,
    /// Total number of pure fragments in the session.
    pub seq_len: u32,
    /// Unpadded message length in bytes.
    pub message_len: u32,
    /// CRC-32 of the whole message; constant across the session.
    pub checksum: u32,
    /// SHA-256 of the whole message; verified once at decode completion.
    pub digest: [u8; DIGEST_SIZE],
    /// Mixed fragment payload, one fragment length long.
    pub data: Vec<u8>,
}

impl Part {
    /// Whether this part carries exactly one unmixed fragment.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.seq_num <= self.seq_len
    }

    /// The set of fragment indexes mixed into this part's payload, derived
    /// from the header.
    #[must_use]
    pub fn fragment_indexes(&self) -> BTreeSet<usize> {
        choose_fragment_indexes(self.seq_num, self.seq_len as usize, self.checksum)
    }

    /// Total wire size.
    #[must_use]
    pub fn wire_size(&self) -> usize {
        PART_HEADER_SIZE + self.data.len()
    }

    /// Encode to wire format (52-byte header + fragment data).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.wire_size());
        buf.extend_from_slice(&self.seq_num.to_le_bytes());
        buf.extend_from_slice(&self.seq_len.to_le_bytes());
        buf.extend_from_slice(&self.message_len.to_le_bytes());
        buf.extend_from_slice(&self.checksum.to_le_bytes());
        buf.extend_from_slice(&self.digest);
        buf.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Decode from wire format.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on truncated input, forbidden zero fields,
    /// trailing bytes, or a header whose message length cannot fit the
    /// declared fragment grid.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < PART_HEADER_SIZE {
            return Err(ParseError::TooShort {
                expected: PART_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let seq_num = u32::from_le_bytes(data[0..4].try_into().expect("4 bytes"));
        let seq_len = u32::from_le_bytes(data[4..8].try_into().expect("4 bytes"));
        let message_len = u32::from_le_bytes(data[8..12].try_into().expect("4 bytes"));
        let checksum = u32::from_le_bytes(data[12..16].try_into().expect("4 bytes"));
        let digest: [u8; DIGEST_SIZE] = data[16..48].try_into().expect("32 bytes");
        let data_len = u32::from_le_bytes(data[48..52].try_into().expect("4 bytes")) as usize;

        if seq_num == 0 {
            return Err(ParseError::InvalidField("seq_num must be >= 1"));
        }
        if seq_len == 0 {
            return Err(ParseError::InvalidField("seq_len must be >= 1"));
        }
        if data_len == 0 {
            return Err(ParseError::InvalidField("data length must be >= 1"));
        }

        let expected = PART_HEADER_SIZE + data_len;
        if data.len() < expected {
            return Err(ParseError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        if data.len() > expected {
            return Err(ParseError::TrailingBytes(data.len() - expected));
        }

        if message_len as u64 > seq_len as u64 * data_len as u64 {
            return Err(ParseError::InvalidField(
                "message length exceeds fragment grid",
            ));
        }

        Ok(Self {
            seq_num,
            seq_len,
            message_len,
            checksum,
            digest,
            data: data[PART_HEADER_SIZE..expected].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_part() -> Part {
        Part {
            seq_num: 7,
            seq_len: 5,
            message_len: 18,
            checksum: 0xDEAD_BEEF,
            digest: [0xAB; DIGEST_SIZE],
            data: vec![1, 2, 3, 4],
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let part = sample_part();
        let encoded = part.encode();
        assert_eq!(encoded.len(), PART_HEADER_SIZE + 4);

        let decoded = Part::decode(&encoded).unwrap();
        assert_eq!(decoded, part);
    }

    #[test]
    fn test_is_pure() {
        let mut part = sample_part();
        assert!(!part.is_pure());
        part.seq_num = 5;
        assert!(part.is_pure());
    }

    #[test]
    fn test_pure_part_index_derivation() {
        let mut part = sample_part();
        part.seq_num = 3;
        assert_eq!(part.fragment_indexes(), BTreeSet::from([2]));
    }

    #[test]
    fn test_decode_too_short() {
        let result = Part::decode(&[0u8; 20]);
        assert!(matches!(result, Err(ParseError::TooShort { .. })));
    }

    #[test]
    fn test_decode_truncated_data() {
        let mut encoded = sample_part().encode();
        encoded.truncate(PART_HEADER_SIZE + 2);
        let result = Part::decode(&encoded);
        assert!(matches!(result, Err(ParseError::TooShort { .. })));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let mut encoded = sample_part().encode();
        encoded.push(0xFF);
        let result = Part::decode(&encoded);
        assert!(matches!(result, Err(ParseError::TrailingBytes(1))));
    }

    #[test]
    fn test_decode_zero_seq_num() {
        let mut part = sample_part();
        part.seq_num = 0;
        let result = Part::decode(&part.encode());
        assert!(matches!(result, Err(ParseError::InvalidField(_))));
    }

    #[test]
    fn test_decode_oversized_message_len() {
        let mut part = sample_part();
        // 5 fragments of 4 bytes can never hold 500 bytes.
        part.message_len = 500;
        let result = Part::decode(&part.encode());
        assert!(matches!(result, Err(ParseError::InvalidField(_))));
    }
}
