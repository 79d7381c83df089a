use ark_ec::{AffineRepr, CurveGroup};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use ark_std::UniformRand;
use criterion::{criterion_group, criterion_main, Criterion};
use segmented_ve::transcript::Transcript;

type TestCurve = ark_bls12_381::G1Projective;
type TestHash = sha3::Keccak256;
type Scalar = <TestCurve as ark_ec::Group>::ScalarField;
type Parameters = segmented_ve::Parameters<TestCurve>;
type RangeProof = segmented_ve::range_proof::RangeProof<TestCurve>;
type Elgamal = segmented_ve::ExponentialElgamal<TestCurve>;

const LABEL: &[u8] = b"range-proof-bench";

fn bench_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("range-proof");

    let rng = &mut StdRng::seed_from_u64(0);
    let blinding_base =
        (<TestCurve as CurveGroup>::Affine::generator() * Scalar::rand(rng)).into_affine();

    for (segment_bits, num_segments) in [(8, 4), (8, 32), (16, 16)] {
        let params = Parameters::new::<TestHash>(segment_bits, num_segments).unwrap();
        let values: Vec<Scalar> = (0..num_segments as u64)
            .map(|j| Scalar::from(j % (1 << segment_bits)))
            .collect();
        let blindings: Vec<Scalar> = (0..num_segments).map(|_| Scalar::rand(rng)).collect();
        let commitments: Vec<_> = values
            .iter()
            .zip(&blindings)
            .map(|(v, r)| Elgamal::encrypt_with_randomness(v, &blinding_base, r).e)
            .collect();

        group.bench_function(format!("proof-gen-{segment_bits}x{num_segments}"), |b| {
            b.iter(|| {
                let mut transcript = Transcript::<TestHash>::new(LABEL);
                RangeProof::new(
                    &params,
                    &blinding_base,
                    &values,
                    &blindings,
                    &mut transcript,
                    rng,
                )
                .unwrap()
            })
        });

        let mut transcript = Transcript::<TestHash>::new(LABEL);
        let proof = RangeProof::new(
            &params,
            &blinding_base,
            &values,
            &blindings,
            &mut transcript,
            rng,
        )
        .unwrap();
        group.bench_function(format!("proof-vfy-{segment_bits}x{num_segments}"), |b| {
            b.iter(|| {
                let mut transcript = Transcript::<TestHash>::new(LABEL);
                assert!(proof.verify(&params, &blinding_base, &commitments, &mut transcript))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_proof);
criterion_main!(benches);
