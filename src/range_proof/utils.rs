use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM as Msm};
use ark_ff::{BigInteger, Field, PrimeField};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `[1, base, base^2, .., base^(count - 1)]`
pub fn powers<S: Field>(base: S, count: usize) -> Vec<S> {
    let mut current = S::one();
    (0..count)
        .map(|_| {
            let power = current;
            current *= base;
            power
        })
        .collect()
}

pub fn inner_product<S: Field>(a: &[S], b: &[S]) -> S {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| *x * y).sum()
}

/// The lowest `bits` bits of `value` as scalars, or `None` if `value` does not fit.
pub fn bit_decomposition<S: PrimeField>(value: &S, bits: usize) -> Option<Vec<S>> {
    let bigint = value.into_bigint();
    if bigint.num_bits() as usize > bits {
        return None;
    }
    let decomposition = bigint
        .to_bits_le()
        .into_iter()
        .take(bits)
        .map(|bit| S::from(u64::from(bit)))
        .collect();
    Some(decomposition)
}

/// Computes `base^blinding * prod(g_vec[i]^l[i] * h_vec[i]^r[i])` with a single MSM.
pub fn commit_vectors<C: CurveGroup>(
    base: &C::Affine,
    blinding: &C::ScalarField,
    g_vec: &[C::Affine],
    l: &[C::ScalarField],
    h_vec: &[C::Affine],
    r: &[C::ScalarField],
) -> C {
    let bases: Vec<C::Affine> = ark_std::iter::once(*base)
        .chain(g_vec.iter().copied())
        .chain(h_vec.iter().copied())
        .collect();
    let scalars: Vec<C::ScalarField> = ark_std::iter::once(*blinding)
        .chain(l.iter().copied())
        .chain(r.iter().copied())
        .collect();
    Msm::msm_unchecked(&bases, &scalars)
}

/// Scales every base with the corresponding factor, `bases[i]^factors[i]`.
pub fn scale_bases<C: CurveGroup>(bases: &[C::Affine], factors: &[C::ScalarField]) -> Vec<C::Affine> {
    #[cfg(feature = "parallel")]
    let scaled: Vec<C> = bases
        .par_iter()
        .zip(factors)
        .map(|(base, factor)| base.into_group() * factor)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let scaled: Vec<C> = bases
        .iter()
        .zip(factors)
        .map(|(base, factor)| base.into_group() * factor)
        .collect();

    C::normalize_batch(&scaled)
}
