//! Text-level decoding session.
//!
//! Wraps a fountain decoder and consumes raw envelope strings exactly as a
//! QR scanner hands them over: any casing, any order, duplicates and garbage
//! included. Parse failures are typed but non-fatal; the session only ends
//! when the payload verifies (or terminally fails verification).

use sha2::{Digest, Sha256};

use crate::core::{DecoderError, ParseError, crc32};
use crate::fountain::{FountainDecoder, Part, ReceiveOutcome};

use super::envelope::{ParsedUr, Ur, parse};

/// Decoding session fed from scanned envelope strings.
#[derive(Debug, Default)]
pub struct UrDecoder {
    ur_type: Option<String>,
    inner: FountainDecoder,
}

impl UrDecoder {
    /// Create an empty session; the first accepted part defines it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one scanned string.
    ///
    /// A single-part envelope resolves the session immediately; a multi-part
    /// envelope feeds the fountain decoder. Parts whose UR type disagrees
    /// with the latched session are rejected as [`ReceiveOutcome::SessionMismatch`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for text that is not a well-formed envelope.
    /// Parse failures leave the session untouched; a scanning loop is free to
    /// ignore them and keep feeding frames.
    pub fn receive_part(&mut self, text: &str) -> Result<ReceiveOutcome, ParseError> {
        let (ur_type, part) = match parse(text)? {
            ParsedUr::Single(ur) => {
                let part = Self::single_part(&ur);
                (ur.ur_type().to_string(), part)
            }
            ParsedUr::Multi { ur_type, part } => (ur_type, part),
        };

        match &self.ur_type {
            Some(latched) if *latched != ur_type => return Ok(ReceiveOutcome::SessionMismatch),
            Some(_) => {}
            None => self.ur_type = Some(ur_type),
        }

        Ok(self.inner.receive(&part))
    }

    /// Synthesize the one pure part equivalent to a single-part envelope.
    fn single_part(ur: &Ur) -> Part {
        let payload = ur.payload();
        let data = if payload.is_empty() {
            vec![0]
        } else {
            payload.to_vec()
        };
        Part {
            seq_num: 1,
            seq_len: 1,
            message_len: payload.len() as u32,
            checksum: crc32(payload),
            digest: Sha256::digest(payload).into(),
            data,
        }
    }

    /// The latched UR type tag, once a part has been accepted.
    #[must_use]
    pub fn ur_type(&self) -> Option<&str> {
        self.ur_type.as_deref()
    }

    /// Terminal result: `None` while gathering.
    #[must_use]
    pub fn result(&self) -> Option<&Result<Vec<u8>, DecoderError>> {
        self.inner.result()
    }

    /// Whether the payload was reassembled and verified.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Whether the session ended in terminal verification failure.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.inner.is_failed()
    }

    /// Number of pure fragments the session expects, once known.
    #[must_use]
    pub fn expected_part_count(&self) -> Option<usize> {
        self.inner.expected_part_count()
    }

    /// Parts accepted so far.
    #[must_use]
    pub fn received_part_count(&self) -> usize {
        self.inner.received_part_count()
    }

    /// Fraction of fragments resolved, in `[0.0, 1.0]`.
    #[must_use]
    pub fn estimated_percent_complete(&self) -> f64 {
        self.inner.estimated_percent_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::encoder::UrEncoder;

    fn ur(payload: Vec<u8>) -> Ur {
        Ur::new("psbt", payload).unwrap()
    }

    #[test]
    fn test_multi_part_scan_loop() {
        let payload = vec![0xA5; 120];
        let mut encoder = UrEncoder::new(&ur(payload.clone()), 40).unwrap();
        let mut decoder = UrDecoder::new();

        while !decoder.is_complete() {
            decoder.receive_part(&encoder.next_part()).unwrap();
        }

        assert_eq!(decoder.result().unwrap().as_ref().unwrap(), &payload);
        assert_eq!(decoder.ur_type(), Some("psbt"));
        assert_eq!(decoder.expected_part_count(), Some(3));
    }

    #[test]
    fn test_uppercase_display_lowercase_scan() {
        // The display side uppercases for denser QR alphanumeric encoding;
        // the scan side must not care.
        let payload = b"case-insensitive channel".to_vec();
        let mut encoder = UrEncoder::new(&ur(payload.clone()), 8).unwrap();
        let mut decoder = UrDecoder::new();

        while !decoder.is_complete() {
            let frame = encoder.next_part().to_uppercase();
            decoder.receive_part(&frame).unwrap();
        }

        assert_eq!(decoder.result().unwrap().as_ref().unwrap(), &payload);
    }

    #[test]
    fn test_single_part_resolves_immediately() {
        let payload = vec![1, 2, 3, 4];
        let text = UrEncoder::encode(&ur(payload.clone()));
        let mut decoder = UrDecoder::new();

        let outcome = decoder.receive_part(&text).unwrap();
        assert!(matches!(outcome, ReceiveOutcome::Accepted { .. }));
        assert!(decoder.is_complete());
        assert_eq!(decoder.result().unwrap().as_ref().unwrap(), &payload);
    }

    #[test]
    fn test_single_part_empty_payload() {
        let text = UrEncoder::encode(&ur(vec![]));
        let mut decoder = UrDecoder::new();

        decoder.receive_part(&text).unwrap();
        assert!(decoder.is_complete());
        assert!(decoder.result().unwrap().as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_frames_do_not_poison_session() {
        let payload = vec![7u8; 60];
        let mut encoder = UrEncoder::new(&ur(payload.clone()), 20).unwrap();
        let mut decoder = UrDecoder::new();

        for garbage in ["", "ur:", "not a ur at all", "ur:psbt/zz"] {
            assert!(decoder.receive_part(garbage).is_err());
        }

        while !decoder.is_complete() {
            decoder.receive_part(&encoder.next_part()).unwrap();
        }
        assert_eq!(decoder.result().unwrap().as_ref().unwrap(), &payload);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let payload = vec![9u8; 30];
        let mut psbt_encoder = UrEncoder::new(&ur(payload.clone()), 10).unwrap();
        let other = Ur::new("bytes", payload).unwrap();
        let mut bytes_encoder = UrEncoder::new(&other, 10).unwrap();

        let mut decoder = UrDecoder::new();
        decoder.receive_part(&psbt_encoder.next_part()).unwrap();

        let outcome = decoder.receive_part(&bytes_encoder.next_part()).unwrap();
        assert_eq!(outcome, ReceiveOutcome::SessionMismatch);
    }
}
