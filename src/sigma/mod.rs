//! Sigma protocols over exponential Elgamal ciphertexts, made non-interactive with the shared
//! [`Transcript`](crate::transcript::Transcript).
mod dlog;
mod homo_elgamal;

pub use dlog::HomoElgamalDlogProof;
pub use homo_elgamal::HomoElgamalProof;

const LOG_TARGET: &str = "segmented_ve::sigma";
