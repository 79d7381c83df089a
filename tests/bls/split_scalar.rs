use crate::*;
use ark_ff::PrimeField;

#[test]
fn scalar_splitting() {
    let scalar = Scalar::zero();
    let split_scalar = SplitScalar::split(&scalar, 16, 16).unwrap();
    println!("{:?}", split_scalar);
    assert_eq!(scalar, split_scalar.reconstruct());

    let rng = &mut test_rng();
    let max_scalar = Scalar::from(u16::MAX);
    for _ in 0..10 {
        let scalar = Scalar::rand(rng);
        let split_scalar = SplitScalar::split(&scalar, 16, 16).unwrap();
        assert_eq!(split_scalar.splits().len(), 16);
        for split in split_scalar.splits() {
            assert!(split <= &max_scalar);
        }
        assert_eq!(scalar, split_scalar.reconstruct());
    }
}

#[test]
fn scalar_field_parameters() {
    let params = Parameters::for_scalar_field::<TestHash>(8).unwrap();
    assert!(params.size() >= Scalar::MODULUS_BIT_SIZE as usize);
    assert!(params.size().is_power_of_two());

    // every field element fits
    let scalar = -Scalar::from(1u8);
    let split_scalar =
        SplitScalar::split(&scalar, params.segment_bits(), params.num_segments()).unwrap();
    assert_eq!(split_scalar.reconstruct(), scalar);
}
