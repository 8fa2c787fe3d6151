//! Text-level encoding session.
//!
//! Wraps a fountain encoder and emits ready-to-display envelope strings. The
//! driving loop calls [`UrEncoder::next_part`] at its own display cadence;
//! once [`is_complete`](UrEncoder::is_complete) reports true it may keep
//! going for fountain redundancy or start cycling what it already captured.

use crate::core::{DEFAULT_MAX_FRAGMENT_LEN, EncoderError};
use crate::fountain::FountainEncoder;

use super::envelope::{Ur, encode_part, encode_single};

/// Encoding session producing envelope strings for an animated QR display.
#[derive(Debug, Clone)]
pub struct UrEncoder {
    ur_type: String,
    inner: FountainEncoder,
}

impl UrEncoder {
    /// Create a session for `ur` with an explicit fragment length bound.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError`] for a zero bound or an oversized payload.
    pub fn new(ur: &Ur, max_fragment_len: usize) -> Result<Self, EncoderError> {
        Ok(Self {
            ur_type: ur.ur_type().to_string(),
            inner: FountainEncoder::new(ur.payload(), max_fragment_len)?,
        })
    }

    /// Create a session with the default fragment length bound.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::MessageTooLarge`] for an oversized payload.
    pub fn with_defaults(ur: &Ur) -> Result<Self, EncoderError> {
        Self::new(ur, DEFAULT_MAX_FRAGMENT_LEN)
    }

    /// Encode the whole UR as a single static (non-animated) envelope.
    #[must_use]
    pub fn encode(ur: &Ur) -> String {
        encode_single(ur)
    }

    /// Emit the next part as an envelope string.
    pub fn next_part(&mut self) -> String {
        encode_part(&self.ur_type, &self.inner.next_part())
    }

    /// The UR type tag of this session.
    #[must_use]
    pub fn ur_type(&self) -> &str {
        &self.ur_type
    }

    /// Last emitted sequence number (0 before the first part).
    #[must_use]
    pub fn seq_num(&self) -> u32 {
        self.inner.seq_num()
    }

    /// Number of pure fragments in the session.
    #[must_use]
    pub fn seq_len(&self) -> usize {
        self.inner.seq_len()
    }

    /// Whether every pure part has been emitted at least once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_sequenced_envelopes() {
        let ur = Ur::new("psbt", vec![0x42; 30]).unwrap();
        let mut encoder = UrEncoder::new(&ur, 10).unwrap();
        assert_eq!(encoder.seq_len(), 3);

        for seq in 1..=3 {
            let text = encoder.next_part();
            assert!(text.starts_with(&format!("ur:psbt/{seq}-3/")));
        }
        assert!(encoder.is_complete());

        // Keeps producing mixed parts past seq_len.
        assert!(encoder.next_part().starts_with("ur:psbt/4-3/"));
    }

    #[test]
    fn test_default_fragment_bound() {
        let ur = Ur::new("psbt", vec![0; 1000]).unwrap();
        let encoder = UrEncoder::with_defaults(&ur).unwrap();
        assert_eq!(encoder.seq_len(), 4);
    }

    #[test]
    fn test_static_encode_is_single_part() {
        let ur = Ur::new("psbt", vec![1, 2, 3]).unwrap();
        let text = UrEncoder::encode(&ur);
        assert_eq!(text.matches('/').count(), 1);
    }
}
