#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod encrypt;
pub mod params;
pub mod range_proof;
pub mod sigma;
pub mod transcript;

#[cfg(test)]
mod tests;

pub use backend::segmented_elgamal::{
    decrypt, decrypt_with_table, encrypt, prove, verify, Ciphertext, Proof, Witness,
};
pub use encrypt::elgamal::{Cipher, DiscreteLogTable, ExponentialElgamal, SplitScalar};
pub use params::Parameters;

use thiserror::Error as ErrorT;

/// Malformed protocol parameters or input shapes. These are caller bugs and never retried.
#[derive(Debug, ErrorT, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("segment width must be within 1..=32 bits, got {0}")]
    InvalidSegmentWidth(usize),
    #[error("{segments} segments of {bits} bits do not span a power of two number of bits")]
    InvalidSegmentLayout { bits: usize, segments: usize },
    #[error("expected {expected} segments, got {got}")]
    SegmentCountMismatch { expected: usize, got: usize },
    #[error("witness segment {0} exceeds the segment width")]
    SegmentOutOfRange(usize),
    #[error("discrete log table for {0}-bit segments is too large")]
    TableTooLarge(usize),
}

#[derive(Debug, ErrorT, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("secret does not fit into {0} bits")]
    Range(usize),
    #[error("no plaintext in the segment range for ciphertext segment {0}")]
    Decryption(usize),
}
