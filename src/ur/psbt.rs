//! PSBT boundary plumbing.
//!
//! Wallets exchange partially signed Bitcoin transactions as base64 text;
//! the transport moves raw bytes. These helpers convert at the boundary and
//! tag the payload with the `psbt` UR type. Nothing here inspects or
//! validates PSBT structure; the payload stays opaque end to end.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::core::{PSBT_UR_TYPE, ParseError};

use super::envelope::Ur;

/// Build a `psbt` UR from the base64 text a wallet exports.
///
/// # Errors
///
/// Returns [`ParseError::InvalidBase64`] if the text is not valid standard
/// base64.
pub fn ur_from_base64(text: &str) -> Result<Ur, ParseError> {
    let payload = STANDARD
        .decode(text.trim())
        .map_err(|_| ParseError::InvalidBase64)?;
    Ok(Ur::from_parts(PSBT_UR_TYPE.to_string(), payload))
}

/// Render a received payload back to the base64 text wallets expect.
#[must_use]
pub fn to_base64(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_roundtrip() {
        let original = "cHNidP8BAHECAAAAAQ==";
        let ur = ur_from_base64(original).unwrap();
        assert_eq!(ur.ur_type(), PSBT_UR_TYPE);
        assert_eq!(to_base64(ur.payload()), original);
    }

    #[test]
    fn test_whitespace_tolerated() {
        let ur = ur_from_base64("  AQIDBA==\n").unwrap();
        assert_eq!(ur.payload(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let result = ur_from_base64("not base64 at all!!!");
        assert!(matches!(result, Err(ParseError::InvalidBase64)));
    }
}
