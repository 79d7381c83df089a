use super::utils::inner_product;
use crate::transcript::Transcript;
use ark_ec::{CurveGroup, VariableBaseMSM as Msm};
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::One;
use digest::Digest;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Logarithmic argument of knowledge of `a, b` such that `P = <a, G> + <b, H> + <a, b> * Q`.
///
/// Every round halves the witness vectors and the generators and records the cross terms `L` and
/// `R`. After `log2(n)` rounds only the two closing scalars are left.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct InnerProductArg<C: CurveGroup> {
    pub l_vec: Vec<C::Affine>,
    pub r_vec: Vec<C::Affine>,
    pub a_tag: C::ScalarField,
    pub b_tag: C::ScalarField,
}

impl<C: CurveGroup> InnerProductArg<C> {
    /// Runs the folding rounds on owned buffers that are halved in place.
    ///
    /// All vectors should have the same power of two length.
    pub fn new<D: Digest>(
        g_vec: &[C::Affine],
        h_vec: &[C::Affine],
        q: &C::Affine,
        mut a: Vec<C::ScalarField>,
        mut b: Vec<C::ScalarField>,
        transcript: &mut Transcript<D>,
    ) -> Self {
        debug_assert!(a.len().is_power_of_two());
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), g_vec.len());
        debug_assert_eq!(a.len(), h_vec.len());

        let rounds = a.len().trailing_zeros() as usize;
        let mut g = g_vec.to_vec();
        let mut h = h_vec.to_vec();
        let mut l_vec = Vec::with_capacity(rounds);
        let mut r_vec = Vec::with_capacity(rounds);

        let mut n = a.len();
        while n > 1 {
            let half = n / 2;
            let (a_lo, a_hi) = a.split_at(half);
            let (b_lo, b_hi) = b.split_at(half);
            let (g_lo, g_hi) = g.split_at(half);
            let (h_lo, h_hi) = h.split_at(half);

            let c_l = inner_product(a_lo, b_hi);
            let c_r = inner_product(a_hi, b_lo);
            let l = cross_term::<C>(g_hi, a_lo, h_lo, b_hi, q, c_l);
            let r = cross_term::<C>(g_lo, a_hi, h_hi, b_lo, q, c_r);

            transcript.append(b"L", &l);
            transcript.append(b"R", &r);
            let (u, u_inv): (C::ScalarField, C::ScalarField) = transcript.invertible_challenge(b"u");

            // a' = a_lo * u + a_hi * u^-1, b' = b_lo * u^-1 + b_hi * u
            for i in 0..half {
                a[i] = a[i] * u + a[half + i] * u_inv;
                b[i] = b[i] * u_inv + b[half + i] * u;
            }
            a.truncate(half);
            b.truncate(half);
            // G' = G_lo * u^-1 + G_hi * u, H' = H_lo * u + H_hi * u^-1
            g = fold_bases::<C>(&g, u_inv, u);
            h = fold_bases::<C>(&h, u, u_inv);

            l_vec.push(l);
            r_vec.push(r);
            n = half;
        }

        Self {
            l_vec,
            r_vec,
            a_tag: a[0],
            b_tag: b[0],
        }
    }

    /// Checks the argument against the commitment `p` with a single multi-scalar multiplication.
    pub fn verify<D: Digest>(
        &self,
        g_vec: &[C::Affine],
        h_vec: &[C::Affine],
        q: &C::Affine,
        p: &C,
        transcript: &mut Transcript<D>,
    ) -> bool {
        let n = g_vec.len();
        if !n.is_power_of_two()
            || h_vec.len() != n
            || self.l_vec.len() != n.trailing_zeros() as usize
            || self.r_vec.len() != self.l_vec.len()
        {
            return false;
        }

        let mut challenges = Vec::with_capacity(self.l_vec.len());
        for (l, r) in self.l_vec.iter().zip(&self.r_vec) {
            transcript.append(b"L", l);
            transcript.append(b"R", r);
            let (u, u_inv): (C::ScalarField, C::ScalarField) = transcript.invertible_challenge(b"u");
            challenges.push((u, u_inv));
        }

        // s_i is the product of u_k or u_k^-1 depending on the bits of i, most significant first
        let mut s = vec![C::ScalarField::one()];
        for (u, u_inv) in &challenges {
            s = s.iter().flat_map(|v| [*v * u_inv, *v * u]).collect();
        }

        // s_i^-1 = s_(n - 1 - i), so H uses the reversed coefficients
        let g_scalars = s.iter().map(|s_i| *s_i * self.a_tag);
        let h_scalars = s.iter().rev().map(|s_i| *s_i * self.b_tag);
        let l_scalars = challenges.iter().map(|(u, _)| -u.square());
        let r_scalars = challenges.iter().map(|(_, u_inv)| -u_inv.square());

        let bases: Vec<C::Affine> = g_vec
            .iter()
            .chain(h_vec)
            .chain(ark_std::iter::once(q))
            .chain(&self.l_vec)
            .chain(&self.r_vec)
            .copied()
            .collect();
        let scalars: Vec<C::ScalarField> = g_scalars
            .chain(h_scalars)
            .chain(ark_std::iter::once(self.a_tag * self.b_tag))
            .chain(l_scalars)
            .chain(r_scalars)
            .collect();

        let folded: C = Msm::msm_unchecked(&bases, &scalars);
        folded == *p
    }
}

/// `<scalars_g, g> + <scalars_h, h> + c * q`
fn cross_term<C: CurveGroup>(
    g: &[C::Affine],
    scalars_g: &[C::ScalarField],
    h: &[C::Affine],
    scalars_h: &[C::ScalarField],
    q: &C::Affine,
    c: C::ScalarField,
) -> C::Affine {
    let bases: Vec<C::Affine> = g.iter().chain(h).chain(ark_std::iter::once(q)).copied().collect();
    let scalars: Vec<C::ScalarField> = scalars_g
        .iter()
        .chain(scalars_h)
        .chain(ark_std::iter::once(&c))
        .copied()
        .collect();
    let term: C = Msm::msm_unchecked(&bases, &scalars);
    term.into_affine()
}

/// Folds the two halves of `bases` into `lo * lo_factor + hi * hi_factor`.
fn fold_bases<C: CurveGroup>(
    bases: &[C::Affine],
    lo_factor: C::ScalarField,
    hi_factor: C::ScalarField,
) -> Vec<C::Affine> {
    let (lo, hi) = bases.split_at(bases.len() / 2);

    #[cfg(feature = "parallel")]
    let folded: Vec<C> = lo
        .par_iter()
        .zip(hi)
        .map(|(lo, hi)| *lo * lo_factor + *hi * hi_factor)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let folded: Vec<C> = lo
        .iter()
        .zip(hi)
        .map(|(lo, hi)| *lo * lo_factor + *hi * hi_factor)
        .collect();

    C::normalize_batch(&folded)
}
