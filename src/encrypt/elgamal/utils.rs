use ark_ff::fields::PrimeField;

/// Multiplies `scalar` by `2^by` in the scalar field.
pub fn shift_scalar<S: PrimeField>(scalar: &S, by: usize) -> S {
    *scalar * S::from(2u8).pow([by as u64])
}

/// Segment weights `[1, 2^bits, 2^(2 * bits), ..]`, one per segment.
pub fn segment_weights<S: PrimeField>(segment_bits: usize, num_segments: usize) -> Vec<S> {
    let step = shift_scalar(&S::one(), segment_bits);
    let mut weight = S::one();
    (0..num_segments)
        .map(|_| {
            let current = weight;
            weight *= step;
            current
        })
        .collect()
}
