//! # UR Fountain Transport
//!
//! Fountain-coded [Uniform Resources](https://github.com/BlockchainCommons/Research)
//! style transport for moving binary payloads - typically a partially signed
//! Bitcoin transaction - across a visual, low-bandwidth, lossy channel:
//! animated QR codes between air-gapped devices. It provides:
//!
//! - **Unbounded encoding**: after the pure fragments, an encoder keeps
//!   emitting fresh XOR-mixed parts forever; the receiver stops whenever it
//!   has enough
//! - **Any-order decoding**: parts may arrive shuffled, duplicated or
//!   missing; Gaussian-style reduction recovers dropped fragments from mixes
//! - **Self-describing parts**: every part carries the full session
//!   parameters, so a decoder needs zero prior state
//! - **Noise tolerance**: malformed or foreign parts are absorbed, never
//!   fatal; only a whole-payload verification failure ends a session
//!
//! ## Modules
//!
//! - [`core`]: constants, error types, CRC-32 helper
//! - [`fountain`]: fragment codec, deterministic sampling, part wire format,
//!   encoder/decoder state machines
//! - [`ur`]: textual `ur:` envelope layer and PSBT base64 boundary helpers
//!
//! ## Example
//!
//! ```rust
//! use ur_fountain::{Ur, UrDecoder, UrEncoder};
//!
//! let payload = vec![0x70u8; 600];
//! let ur = Ur::new("psbt", payload.clone())?;
//!
//! // Display side: one frame per timer tick.
//! let mut encoder = UrEncoder::with_defaults(&ur)?;
//! // Scan side: one frame per captured image.
//! let mut decoder = UrDecoder::new();
//!
//! while !decoder.is_complete() {
//!     let frame = encoder.next_part();
//!     decoder.receive_part(&frame)?;
//! }
//!
//! assert_eq!(decoder.result().unwrap().as_ref().unwrap(), &payload);
//! # Ok::<(), ur_fountain::UrFountainError>(())
//! ```
//!
//! Both sessions are plain owned values driven synchronously by their
//! capture/display loop; the crate spawns no threads and holds no timers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Core constants and errors
pub mod core;

// Fountain codec layer
pub mod fountain;

// Textual envelope layer
pub mod ur;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::fountain::*;
    pub use crate::ur::*;
}

// Re-export commonly used items at crate root
pub use crate::core::{DecoderError, EncoderError, ParseError, UrFountainError};
pub use crate::fountain::{FountainDecoder, FountainEncoder, Part, ReceiveOutcome};
pub use crate::ur::{ParsedUr, Ur, UrDecoder, UrEncoder};
