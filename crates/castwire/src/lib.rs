//! Top-level facade crate for castwire.
//!
//! Re-exports the decoder and the CLI library so users can depend on a single crate.

pub mod core {
    pub use castwire_core::*;
}

pub mod cli {
    pub use castwire_cli::*;
}

pub use castwire_core::{decode_base64, decode_bytes, DecodeOptions, DecodeOutput, EventRecord};
