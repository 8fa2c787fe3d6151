//! Textual `ur:` envelope encoding and parsing.
//!
//! Two envelope shapes exist, both case-insensitive single-line tokens
//! suitable as literal QR payloads:
//!
//! ```text
//! ur:<type>/<hex-body>                      single-part (whole payload)
//! ur:<type>/<seq>-<seqlen>/<hex-body>       multi-part (one fountain part)
//! ```
//!
//! The hex body is the binary content followed by a 4-byte LE CRC-32 of that
//! content, so a misread QR frame is rejected structurally before it reaches
//! the fountain layer.

use crate::core::{ENVELOPE_CRC_SIZE, EncoderError, ParseError, UR_SCHEME, crc32};
use crate::fountain::Part;

/// A payload tagged with its UR type, the unit a single-part UR carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ur {
    ur_type: String,
    payload: Vec<u8>,
}

impl Ur {
    /// Create a UR value, validating the type tag.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidUrType`] unless the tag is non-empty
    /// and built from `a-z`, `0-9` and `-`.
    pub fn new(ur_type: impl Into<String>, payload: Vec<u8>) -> Result<Self, EncoderError> {
        let ur_type = ur_type.into();
        if !is_valid_ur_type(&ur_type) {
            return Err(EncoderError::InvalidUrType(ur_type));
        }
        Ok(Self { ur_type, payload })
    }

    /// Construct from parts already known to carry a valid type tag.
    pub(crate) fn from_parts(ur_type: String, payload: Vec<u8>) -> Self {
        debug_assert!(is_valid_ur_type(&ur_type));
        Self { ur_type, payload }
    }

    /// The UR type tag.
    #[must_use]
    pub fn ur_type(&self) -> &str {
        &self.ur_type
    }

    /// The carried payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume into the carried payload.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// A successfully parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedUr {
    /// Single-part form carrying the whole payload.
    Single(Ur),
    /// Multi-part form carrying one fountain part.
    Multi {
        /// The UR type tag.
        ur_type: String,
        /// The decoded fountain part.
        part: Part,
    },
}

/// UR type tags are non-empty lowercase `a-z`, `0-9` and `-`.
#[must_use]
pub fn is_valid_ur_type(ur_type: &str) -> bool {
    !ur_type.is_empty()
        && ur_type
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Encode the single-part form of a UR.
#[must_use]
pub fn encode_single(ur: &Ur) -> String {
    format!("{UR_SCHEME}:{}/{}", ur.ur_type, seal_body(ur.payload()))
}

/// Encode one fountain part in the multi-part form.
#[must_use]
pub fn encode_part(ur_type: &str, part: &Part) -> String {
    debug_assert!(is_valid_ur_type(ur_type));
    format!(
        "{UR_SCHEME}:{ur_type}/{}-{}/{}",
        part.seq_num,
        part.seq_len,
        seal_body(&part.encode())
    )
}

/// Parse an envelope of either shape.
///
/// Case-insensitive and tolerant of surrounding whitespace.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first structural defect found:
/// scheme, type tag, sequence component, body encoding, body checksum, part
/// header, or an envelope sequence that disagrees with the part header.
pub fn parse(text: &str) -> Result<ParsedUr, ParseError> {
    let lower = text.trim().to_ascii_lowercase();
    let rest = lower
        .strip_prefix(UR_SCHEME)
        .and_then(|r| r.strip_prefix(':'))
        .ok_or(ParseError::InvalidScheme)?;

    let components: Vec<&str> = rest.split('/').collect();
    let (ur_type, sequence, body) = match components.as_slice() {
        [ur_type, body] => (*ur_type, None, *body),
        [ur_type, sequence, body] => (*ur_type, Some(*sequence), *body),
        _ => return Err(ParseError::InvalidStructure),
    };

    if !is_valid_ur_type(ur_type) {
        return Err(ParseError::InvalidUrType(ur_type.to_string()));
    }
    let content = open_body(body)?;

    let Some(sequence) = sequence else {
        return Ok(ParsedUr::Single(Ur::from_parts(
            ur_type.to_string(),
            content,
        )));
    };

    let (envelope_seq, envelope_len) = parse_sequence(sequence)?;
    let part = Part::decode(&content)?;
    if part.seq_num != envelope_seq || part.seq_len != envelope_len {
        return Err(ParseError::SequenceMismatch {
            envelope_seq,
            envelope_len,
            header_seq: part.seq_num,
            header_len: part.seq_len,
        });
    }

    Ok(ParsedUr::Multi {
        ur_type: ur_type.to_string(),
        part,
    })
}

/// Append the CRC-32 suffix and hex-encode.
fn seal_body(content: &[u8]) -> String {
    let mut body = content.to_vec();
    body.extend_from_slice(&crc32(content).to_le_bytes());
    hex::encode(body)
}

/// Hex-decode and verify/strip the CRC-32 suffix.
fn open_body(body: &str) -> Result<Vec<u8>, ParseError> {
    let mut bytes = hex::decode(body).map_err(|_| ParseError::InvalidBody)?;
    if bytes.len() < ENVELOPE_CRC_SIZE {
        return Err(ParseError::TooShort {
            expected: ENVELOPE_CRC_SIZE,
            actual: bytes.len(),
        });
    }

    let suffix = bytes.split_off(bytes.len() - ENVELOPE_CRC_SIZE);
    let expected = u32::from_le_bytes(suffix.try_into().expect("4-byte suffix"));
    let actual = crc32(&bytes);
    if expected != actual {
        return Err(ParseError::EnvelopeChecksum { expected, actual });
    }
    Ok(bytes)
}

/// Parse the `<seq>-<seqlen>` component of a multi-part envelope.
fn parse_sequence(sequence: &str) -> Result<(u32, u32), ParseError> {
    let invalid = || ParseError::InvalidSequence(sequence.to_string());

    let (seq, len) = sequence.split_once('-').ok_or_else(invalid)?;
    let seq: u32 = seq.parse().map_err(|_| invalid())?;
    let len: u32 = len.parse().map_err(|_| invalid())?;
    if seq == 0 || len == 0 {
        return Err(invalid());
    }
    Ok((seq, len))
}
