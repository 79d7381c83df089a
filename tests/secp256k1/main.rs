use ark_ec::{AffineRepr, CurveGroup};
use ark_secp256k1::{Affine, Fr as Scalar, Projective as TestCurve};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use ark_std::UniformRand;
use segmented_ve::{decrypt, encrypt, prove, verify, Parameters};

type TestHash = sha3::Keccak256;

fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

#[test]
fn verifiable_encryption() {
    let rng = &mut test_rng();
    let params = Parameters::<TestCurve>::for_scalar_field::<TestHash>(8).unwrap();
    assert_eq!(params.num_segments(), 32);

    let decryption_key = Scalar::rand(rng);
    let encryption_key = (Affine::generator() * decryption_key).into_affine();
    let secret = Scalar::rand(rng);
    let public_key = (Affine::generator() * secret).into_affine();

    let (witness, ciphertext) = encrypt(&params, &encryption_key, &secret, rng).unwrap();
    let proof = prove::<TestHash, _, _>(&params, &encryption_key, &witness, &ciphertext, rng).unwrap();
    assert!(verify::<TestHash, _>(
        &params,
        &proof,
        &encryption_key,
        &public_key,
        &ciphertext
    ));
    assert!(!verify::<TestHash, _>(
        &params,
        &proof,
        &encryption_key,
        &encryption_key,
        &ciphertext
    ));
}

#[test]
fn small_segments() {
    let rng = &mut test_rng();
    let params = Parameters::<TestCurve>::new::<TestHash>(4, 2).unwrap();
    let decryption_key = Scalar::rand(rng);
    let encryption_key = (Affine::generator() * decryption_key).into_affine();
    let secret = Scalar::from(7u8);

    let (witness, ciphertext) = encrypt(&params, &encryption_key, &secret, rng).unwrap();
    assert_eq!(decrypt(&params, &decryption_key, &ciphertext).unwrap(), secret);

    let proof = prove::<TestHash, _, _>(&params, &encryption_key, &witness, &ciphertext, rng).unwrap();
    let key_of = |value: u8| (Affine::generator() * Scalar::from(value)).into_affine();
    assert!(verify::<TestHash, _>(&params, &proof, &encryption_key, &key_of(7), &ciphertext));
    assert!(!verify::<TestHash, _>(&params, &proof, &encryption_key, &key_of(8), &ciphertext));
}
