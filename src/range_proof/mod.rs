// Aggregated range proof from "Bulletproofs: Short Proofs for Confidential Transactions and More"
// (Bünz et al.), with the value commitments doubling as Elgamal ciphertext components.
mod inner_product;
mod utils;

pub use inner_product::InnerProductArg;
pub use utils::{bit_decomposition, inner_product, powers};
use utils::{commit_vectors, scale_bases};

use crate::encrypt::elgamal::ExponentialElgamal;
use crate::params::Parameters;
use crate::transcript::Transcript;
use crate::{ConfigurationError, Error};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM as Msm};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, Rng};
use ark_std::{One, UniformRand};
use digest::Digest;

const LOG_TARGET: &str = "segmented_ve::range_proof";

/// Proves that every committed value `V_j = g^(v_j) * h^(gamma_j)` lies in `[0, 2^n)`.
///
/// `n` is the segment width and `m` the number of segments from [`Parameters`]. The bit vectors
/// of all `m` values are concatenated, so a single inner product argument of `log2(n * m)` rounds
/// covers every value at once.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct RangeProof<C: CurveGroup> {
    pub a: C::Affine,
    pub s: C::Affine,
    pub t1: C::Affine,
    pub t2: C::Affine,
    pub tau_x: C::ScalarField,
    pub miu: C::ScalarField,
    pub tx: C::ScalarField,
    pub inner_product_arg: InnerProductArg<C>,
}

/// Challenges and derived vectors shared by the prover and the verifier.
struct Challenges<S> {
    y_inv: S,
    z: S,
    /// `[y^0, .., y^(nm - 1)]`
    y_powers: Vec<S>,
    /// `[z^0, .., z^(m + 1)]`
    z_powers: Vec<S>,
    /// `[2^0, .., 2^(n - 1)]`
    two_powers: Vec<S>,
}

impl<S: PrimeField> Challenges<S> {
    fn new<D: Digest>(transcript: &mut Transcript<D>, n: usize, m: usize) -> Self {
        let (y, y_inv) = transcript.invertible_challenge(b"y");
        let z = transcript.challenge_scalar(b"z");
        Self {
            y_inv,
            z,
            y_powers: powers(y, n * m),
            z_powers: powers(z, m + 2),
            two_powers: powers(S::from(2u8), n),
        }
    }

    /// `z^(2 + i / n) * 2^(i % n)`, the weight binding bit `i` to its value commitment.
    fn bit_weight(&self, i: usize) -> S {
        let n = self.two_powers.len();
        self.z_powers[2 + i / n] * self.two_powers[i % n]
    }
}

impl<C: CurveGroup> RangeProof<C> {
    /// Generates the proof for `values` committed with `blindings` over `blinding_base`.
    ///
    /// The commitments themselves are recomputed and absorbed into the transcript, the verifier
    /// should receive them alongside the proof.
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = values.len()))]
    pub fn new<D: Digest, R: Rng + CryptoRng>(
        params: &Parameters<C>,
        blinding_base: &C::Affine,
        values: &[C::ScalarField],
        blindings: &[C::ScalarField],
        transcript: &mut Transcript<D>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        params.check_segment_count(values.len())?;
        params.check_segment_count(blindings.len())?;
        let n = params.segment_bits();
        let m = params.num_segments();
        let nm = params.size();
        let g = C::Affine::generator();
        let h = *blinding_base;

        let mut a_l = Vec::with_capacity(nm);
        for (j, value) in values.iter().enumerate() {
            let bits = bit_decomposition(value, n).ok_or(ConfigurationError::SegmentOutOfRange(j))?;
            a_l.extend(bits);
        }
        let one = C::ScalarField::one();
        let a_r: Vec<C::ScalarField> = a_l.iter().map(|bit| *bit - one).collect();

        let commitments: Vec<C::Affine> = values
            .iter()
            .zip(blindings)
            .map(|(v, gamma)| ExponentialElgamal::<C>::encrypt_with_randomness(v, &h, gamma).e)
            .collect();
        transcript.append_u64(b"n", n as u64);
        transcript.append_u64(b"m", m as u64);
        transcript.append_all(b"V", &commitments);

        let alpha = C::ScalarField::rand(rng);
        let rho = C::ScalarField::rand(rng);
        let s_l: Vec<C::ScalarField> = (0..nm).map(|_| C::ScalarField::rand(rng)).collect();
        let s_r: Vec<C::ScalarField> = (0..nm).map(|_| C::ScalarField::rand(rng)).collect();

        let a = commit_vectors::<C>(&h, &alpha, params.g_vec(), &a_l, params.h_vec(), &a_r);
        let s = commit_vectors::<C>(&h, &rho, params.g_vec(), &s_l, params.h_vec(), &s_r);
        let a = a.into_affine();
        let s = s.into_affine();
        transcript.append(b"A", &a);
        transcript.append(b"S", &s);

        let challenges = Challenges::<C::ScalarField>::new(transcript, n, m);
        let z = challenges.z;

        // l(X) = (aL - z) + sL * X
        // r(X) = y^i * (aR + z + sR * X) + z^(2 + j) * 2^i
        let l0: Vec<C::ScalarField> = a_l.iter().map(|bit| *bit - z).collect();
        let r0: Vec<C::ScalarField> = a_r
            .iter()
            .zip(&challenges.y_powers)
            .enumerate()
            .map(|(i, (bit, y_i))| *y_i * (*bit + z) + challenges.bit_weight(i))
            .collect();
        let r1: Vec<C::ScalarField> = s_r
            .iter()
            .zip(&challenges.y_powers)
            .map(|(s_i, y_i)| *s_i * y_i)
            .collect();

        let t1 = inner_product(&l0, &r1) + inner_product(&s_l, &r0);
        let t2 = inner_product(&s_l, &r1);
        let tau1 = C::ScalarField::rand(rng);
        let tau2 = C::ScalarField::rand(rng);
        let t1_commitment = (g * t1 + h * tau1).into_affine();
        let t2_commitment = (g * t2 + h * tau2).into_affine();
        transcript.append(b"T1", &t1_commitment);
        transcript.append(b"T2", &t2_commitment);
        let x: C::ScalarField = transcript.challenge_scalar(b"x");

        let l: Vec<C::ScalarField> = l0.iter().zip(&s_l).map(|(l0, l1)| *l0 + *l1 * x).collect();
        let r: Vec<C::ScalarField> = r0.iter().zip(&r1).map(|(r0, r1)| *r0 + *r1 * x).collect();
        let tx = inner_product(&l, &r);
        let tau_x = tau2 * x * x
            + tau1 * x
            + blindings
                .iter()
                .zip(&challenges.z_powers[2..])
                .map(|(gamma, z_j)| *gamma * z_j)
                .sum::<C::ScalarField>();
        let miu = alpha + rho * x;
        transcript.append(b"tau_x", &tau_x);
        transcript.append(b"miu", &miu);
        transcript.append(b"tx", &tx);

        let w: C::ScalarField = transcript.challenge_scalar(b"w");
        let q = (params.u() * w).into_affine();
        let h_prime = scale_bases::<C>(params.h_vec(), &powers(challenges.y_inv, nm));
        let inner_product_arg = InnerProductArg::new(params.g_vec(), &h_prime, &q, l, r, transcript);

        Ok(Self {
            a,
            s,
            t1: t1_commitment,
            t2: t2_commitment,
            tau_x,
            miu,
            tx,
            inner_product_arg,
        })
    }

    /// Verifies the proof against the value commitments. Returns `false` on any mismatch,
    /// including commitment counts that disagree with `params`.
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = commitments.len()))]
    pub fn verify<D: Digest>(
        &self,
        params: &Parameters<C>,
        blinding_base: &C::Affine,
        commitments: &[C::Affine],
        transcript: &mut Transcript<D>,
    ) -> bool {
        if params.check_segment_count(commitments.len()).is_err() {
            tracing::debug!(target: LOG_TARGET, "commitment count mismatch");
            return false;
        }
        let n = params.segment_bits();
        let m = params.num_segments();
        let nm = params.size();
        let g = C::Affine::generator();
        let h = *blinding_base;

        transcript.append_u64(b"n", n as u64);
        transcript.append_u64(b"m", m as u64);
        transcript.append_all(b"V", commitments);
        transcript.append(b"A", &self.a);
        transcript.append(b"S", &self.s);
        let challenges = Challenges::<C::ScalarField>::new(transcript, n, m);
        let z = challenges.z;
        transcript.append(b"T1", &self.t1);
        transcript.append(b"T2", &self.t2);
        let x: C::ScalarField = transcript.challenge_scalar(b"x");
        transcript.append(b"tau_x", &self.tau_x);
        transcript.append(b"miu", &self.miu);
        transcript.append(b"tx", &self.tx);
        let w: C::ScalarField = transcript.challenge_scalar(b"w");

        // g^tx * h^tau_x == prod(V_j^(z^(2 + j))) * g^delta * T1^x * T2^(x^2)
        let sum_y: C::ScalarField = challenges.y_powers.iter().sum();
        let sum_two: C::ScalarField = challenges.two_powers.iter().sum();
        let sum_z: C::ScalarField = challenges.z_powers[2..].iter().sum();
        let delta = (z - z * z) * sum_y - z * sum_z * sum_two;

        let bases: Vec<C::Affine> = [g, h, self.t1, self.t2]
            .into_iter()
            .chain(commitments.iter().copied())
            .collect();
        let scalars: Vec<C::ScalarField> = [self.tx - delta, self.tau_x, -x, -x * x]
            .into_iter()
            .chain(challenges.z_powers[2..].iter().map(|z_j| -*z_j))
            .collect();
        let polynomial_check: C = Msm::msm_unchecked(&bases, &scalars);
        if !polynomial_check.is_zero() {
            tracing::debug!(target: LOG_TARGET, "polynomial evaluation check failed");
            return false;
        }

        // P = A * S^x * h^(-miu) * g_vec^(-z) * h'_vec^(z * y^i + z^(2 + j) * 2^i)
        let h_prime = scale_bases::<C>(params.h_vec(), &powers(challenges.y_inv, nm));
        let bases: Vec<C::Affine> = [self.a, self.s, h]
            .into_iter()
            .chain(params.g_vec().iter().copied())
            .chain(h_prime.iter().copied())
            .collect();
        let scalars: Vec<C::ScalarField> = [C::ScalarField::one(), x, -self.miu]
            .into_iter()
            .chain(ark_std::iter::repeat(-z).take(nm))
            .chain(
                challenges
                    .y_powers
                    .iter()
                    .enumerate()
                    .map(|(i, y_i)| z * y_i + challenges.bit_weight(i)),
            )
            .collect();
        let q = (params.u() * w).into_affine();
        let p: C = Msm::msm_unchecked(&bases, &scalars);
        let p = p + q * self.tx;

        let valid = self
            .inner_product_arg
            .verify(params.g_vec(), &h_prime, &q, &p, transcript);
        if !valid {
            tracing::debug!(target: LOG_TARGET, "inner product argument check failed");
        }
        valid
    }
}
