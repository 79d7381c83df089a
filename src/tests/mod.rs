pub use ark_bls12_381::{G1Affine, G1Projective as TestCurve};
use ark_ec::CurveGroup;
use ark_std::rand::{rngs::StdRng, SeedableRng};

pub type Scalar = <TestCurve as ark_ec::Group>::ScalarField;
pub type TestHash = sha3::Keccak256;

pub type Parameters = crate::params::Parameters<TestCurve>;
pub type Cipher = crate::encrypt::elgamal::Cipher<TestCurve>;
pub type Elgamal = crate::encrypt::elgamal::ExponentialElgamal<TestCurve>;
pub type SplitScalar = crate::encrypt::elgamal::SplitScalar<Scalar>;
pub type RangeProof = crate::range_proof::RangeProof<TestCurve>;

/// Small layout used by unit tests: 4 segments of 4 bits.
pub const SEGMENT_BITS: usize = 4;
pub const NUM_SEGMENTS: usize = 4;

pub fn parameters(segment_bits: usize, num_segments: usize) -> Parameters {
    Parameters::new::<TestHash>(segment_bits, num_segments).expect("valid test parameters")
}

/// Deterministic seeded rng, usable where a `CryptoRng` is required.
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

pub fn keypair<R: ark_std::rand::Rng>(rng: &mut R) -> (Scalar, G1Affine) {
    let decryption_key = <Scalar as ark_std::UniformRand>::rand(rng);
    let encryption_key = (<TestCurve as ark_ec::Group>::generator() * decryption_key).into_affine();
    (decryption_key, encryption_key)
}
