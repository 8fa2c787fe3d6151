//! Fountain-code transport core.
//!
//! Implements:
//! - Fragment splitting, padding and XOR mixing
//! - Deterministic fragment index selection (shared by both channel ends)
//! - Part assembly and the binary part wire format
//! - Encoder and decoder session state machines

mod decoder;
mod encoder;
mod fragment;
mod part;
mod sampler;
mod xoshiro;

pub use decoder::*;
pub use encoder::*;
pub use fragment::*;
pub use part::*;
pub use sampler::*;
pub use xoshiro::*;
