use crate::*;
use segmented_ve::{Cipher, DiscreteLogTable, Error};

#[test]
fn exponential_elgamal() {
    let rng = &mut test_rng();
    let (decryption_key, encryption_key) = keypair();

    // completeness
    let data = Scalar::from(12342526u32);
    let encrypted = Elgamal::encrypt(&data, &encryption_key, rng);
    let decrypted = Elgamal::decrypt_exp(&encrypted, &decryption_key);
    assert_eq!(decrypted, (G1Affine::generator() * data).into_affine());
    // soundness
    let invalid_decryption_key = decryption_key + Scalar::from(123u32);
    let decrypted = Elgamal::decrypt_exp(&encrypted, &invalid_decryption_key);
    assert_ne!(decrypted, (G1Affine::generator() * data).into_affine());

    // with brute force check
    let data = Scalar::from(200u32);
    let encrypted = Elgamal::encrypt(&data, &encryption_key, rng);
    assert_eq!(Elgamal::decrypt(&encrypted, &decryption_key, 8), Some(data));
    assert_eq!(Elgamal::decrypt(&encrypted, &decryption_key, 7), None);
}

#[test]
fn split_encryption() {
    let rng = &mut test_rng();
    let (decryption_key, encryption_key) = keypair();
    let scalar = Scalar::rand(rng);
    let split_scalar = SplitScalar::split(&scalar, 8, 32).unwrap();

    let (ciphers, rands) = split_scalar.encrypt::<TestCurve, _>(&encryption_key, rng);
    let randomness = segmented_ve::encrypt::elgamal::reconstruct(&rands, 8);
    let cipher = Elgamal::encrypt_with_randomness(&scalar, &encryption_key, &randomness);
    assert_eq!(Cipher::assemble(&ciphers, 8), cipher);

    let table = DiscreteLogTable::<TestCurve>::new(8).unwrap();
    let segments = Elgamal::decrypt_segments_with_table(&ciphers, &decryption_key, &table).unwrap();
    assert_eq!(segments, split_scalar.splits());
    assert_eq!(segmented_ve::encrypt::elgamal::reconstruct(&segments, 8), scalar);

    // the zero cipher is the neutral element of the homomorphism
    assert_eq!(cipher + Cipher::zero(), cipher);
    assert_eq!(
        Elgamal::decrypt_segments(&[Cipher::zero()], &decryption_key, 8),
        Ok(vec![Scalar::zero()])
    );
    assert_eq!(
        DiscreteLogTable::<TestCurve>::new(21).unwrap_err(),
        Error::Configuration(segmented_ve::ConfigurationError::TableTooLarge(21))
    );
}
