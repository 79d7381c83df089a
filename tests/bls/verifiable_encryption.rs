use crate::*;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use segmented_ve::{decrypt, decrypt_with_table, encrypt, prove, verify, DiscreteLogTable, Proof};

#[test]
fn full_scalar_flow() {
    init_tracing();
    let rng = &mut test_rng();
    let params = Parameters::for_scalar_field::<TestHash>(8).unwrap();
    let (decryption_key, encryption_key) = keypair();
    let secret = Scalar::rand(rng);
    let public_key = (G1Affine::generator() * secret).into_affine();

    let (witness, ciphertext) = encrypt(&params, &encryption_key, &secret, rng).unwrap();
    assert_eq!(ciphertext.len(), params.num_segments());

    let proof = prove::<TestHash, _, _>(&params, &encryption_key, &witness, &ciphertext, rng).unwrap();
    assert!(verify::<TestHash, _>(
        &params,
        &proof,
        &encryption_key,
        &public_key,
        &ciphertext
    ));

    let table = DiscreteLogTable::new(params.segment_bits()).unwrap();
    assert_eq!(
        decrypt_with_table(&params, &table, &decryption_key, &ciphertext).unwrap(),
        secret
    );
    assert_eq!(decrypt(&params, &decryption_key, &ciphertext).unwrap(), secret);

    // another public key
    let other_key = (G1Affine::generator() * (secret + Scalar::from(1u8))).into_affine();
    assert!(!verify::<TestHash, _>(
        &params,
        &proof,
        &encryption_key,
        &other_key,
        &ciphertext
    ));
}

#[test]
fn proof_transport() {
    init_tracing();
    let rng = &mut test_rng();
    let params = Parameters::new::<TestHash>(4, 4).unwrap();
    let (_, encryption_key) = keypair();
    let secret = Scalar::from(0x1234u16);
    let public_key = (G1Affine::generator() * secret).into_affine();
    let (witness, ciphertext) = encrypt(&params, &encryption_key, &secret, rng).unwrap();
    let proof = prove::<TestHash, _, _>(&params, &encryption_key, &witness, &ciphertext, rng).unwrap();

    let mut proof_bytes = Vec::new();
    proof.serialize_compressed(&mut proof_bytes).unwrap();
    let mut ciphertext_bytes = Vec::new();
    ciphertext.serialize_uncompressed(&mut ciphertext_bytes).unwrap();

    let received_proof = Proof::<TestCurve>::deserialize_compressed(&proof_bytes[..]).unwrap();
    let received_ciphertext =
        segmented_ve::Ciphertext::<TestCurve>::deserialize_uncompressed(&ciphertext_bytes[..])
            .unwrap();
    assert!(verify::<TestHash, _>(
        &params,
        &received_proof,
        &encryption_key,
        &public_key,
        &received_ciphertext
    ));

    // flipping a single byte of the serialized proof either breaks decoding or verification
    for position in [0, proof_bytes.len() / 2, proof_bytes.len() - 1] {
        let mut corrupted = proof_bytes.clone();
        corrupted[position] ^= 1;
        if let Ok(corrupted) = Proof::<TestCurve>::deserialize_compressed(&corrupted[..]) {
            assert!(!verify::<TestHash, _>(
                &params,
                &corrupted,
                &encryption_key,
                &public_key,
                &ciphertext
            ));
        }
    }
}

#[test]
fn verification_with_other_digest() {
    let rng = &mut test_rng();
    let params = Parameters::new::<TestHash>(4, 2).unwrap();
    let (_, encryption_key) = keypair();
    let secret = Scalar::from(7u8);
    let public_key = (G1Affine::generator() * secret).into_affine();
    let (witness, ciphertext) = encrypt(&params, &encryption_key, &secret, rng).unwrap();
    let proof = prove::<TestHash, _, _>(&params, &encryption_key, &witness, &ciphertext, rng).unwrap();

    assert!(verify::<TestHash, _>(
        &params,
        &proof,
        &encryption_key,
        &public_key,
        &ciphertext
    ));
    assert!(!verify::<sha3::Sha3_256, _>(
        &params,
        &proof,
        &encryption_key,
        &public_key,
        &ciphertext
    ));
}
