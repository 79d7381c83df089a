use ark_bls12_381::{G1Affine, G1Projective as TestCurve};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use ark_std::{UniformRand, Zero};
use tracing_subscriber::EnvFilter;

type Scalar = <TestCurve as ark_ec::Group>::ScalarField;
type TestHash = sha3::Keccak256;
type Elgamal = segmented_ve::ExponentialElgamal<TestCurve>;
type Parameters = segmented_ve::Parameters<TestCurve>;
type SplitScalar = segmented_ve::SplitScalar<Scalar>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

fn keypair() -> (Scalar, G1Affine) {
    let decryption_key = Scalar::rand(&mut test_rng());
    let encryption_key = (G1Affine::generator() * decryption_key).into_affine();
    (decryption_key, encryption_key)
}

mod elgamal;
mod split_scalar;
mod verifiable_encryption;
