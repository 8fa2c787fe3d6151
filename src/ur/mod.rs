//! Textual UR layer.
//!
//! Implements:
//! - The `ur:` envelope wire form (single- and multi-part)
//! - Text-level encoding/decoding sessions for display and scan loops
//! - PSBT base64 boundary helpers

mod decoder;
mod encoder;
mod envelope;
pub mod psbt;

pub use decoder::*;
pub use encoder::*;
pub use envelope::*;
