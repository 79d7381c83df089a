mod split_scalar;
mod table;
mod utils;

pub use split_scalar::{reconstruct, SplitScalar};
pub use table::{DiscreteLogTable, MAX_TABLE_BITS};
pub use utils::{segment_weights, shift_scalar};

use crate::params::MAX_SEGMENT_BITS;
use crate::Error;
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM as Msm};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;
use ark_std::ops::{Add, Mul};
use ark_std::rand::{CryptoRng, Rng};
use ark_std::{UniformRand, Zero};

const LOG_TARGET: &str = "segmented_ve::encrypt::elgamal";

pub struct ExponentialElgamal<C>(pub PhantomData<C>);

/// Exponential Elgamal encryption scheme ciphertext.
///
/// It contains `d = g^r` and `e = g^m * h^r` where `g` is a group generator, `h = g^x` is the
/// public encryption key computed from the secret `x` key, `r` is some random scalar and `m` is
/// the message to be encrypted. Since `e` is also a Pedersen commitment to `m` with blinding `r`
/// (with bases `g` and `h`), the range proof commits to segments through `e` directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Cipher<C: CurveGroup> {
    pub d: C::Affine,
    pub e: C::Affine,
}

impl<C: CurveGroup> Default for Cipher<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: CurveGroup> Zero for Cipher<C> {
    fn zero() -> Self {
        Self {
            d: C::Affine::zero(),
            e: C::Affine::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.d.is_zero() && self.e.is_zero()
    }
}

impl<C: CurveGroup> Cipher<C> {
    pub fn new(d: C::Affine, e: C::Affine) -> Self {
        Self { d, e }
    }

    /// Folds segment ciphers into the cipher of the whole scalar.
    ///
    /// The result encrypts `sum(m_i * 2^(i * segment_bits))` under randomness
    /// `sum(r_i * 2^(i * segment_bits))`.
    pub fn assemble(ciphers: &[Self], segment_bits: usize) -> Self {
        let weights = segment_weights::<C::ScalarField>(segment_bits, ciphers.len());
        let (d_vec, e_vec): (Vec<C::Affine>, Vec<C::Affine>) =
            ciphers.iter().map(|cipher| (cipher.d, cipher.e)).unzip();
        let d: C = Msm::msm_unchecked(&d_vec, &weights);
        let e: C = Msm::msm_unchecked(&e_vec, &weights);
        Self::new(d.into_affine(), e.into_affine())
    }

    pub fn check_encrypted_sum(&self, ciphers: &[Self], segment_bits: usize) -> bool {
        Self::assemble(ciphers, segment_bits) == *self
    }
}

impl<C: CurveGroup> Add for Cipher<C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new((self.d + rhs.d).into_affine(), (self.e + rhs.e).into_affine())
    }
}

impl<C: CurveGroup> Mul<C::ScalarField> for Cipher<C> {
    type Output = Self;
    fn mul(self, rhs: C::ScalarField) -> Self::Output {
        Self::new((self.d * rhs).into_affine(), (self.e * rhs).into_affine())
    }
}

impl<C: CurveGroup> ExponentialElgamal<C> {
    pub fn encrypt<R: Rng + CryptoRng>(
        data: &C::ScalarField,
        key: &C::Affine,
        rng: &mut R,
    ) -> Cipher<C> {
        let random_nonce = C::ScalarField::rand(rng);
        Self::encrypt_with_randomness(data, key, &random_nonce)
    }

    pub fn encrypt_with_randomness(
        data: &C::ScalarField,
        key: &C::Affine,
        randomness: &C::ScalarField,
    ) -> Cipher<C> {
        // h^r
        let shared_secret = *key * randomness;
        // g^r
        let d = C::Affine::generator() * randomness;
        // g^m * h^r
        let e = C::Affine::generator() * data + shared_secret;
        Cipher::new(d.into_affine(), e.into_affine())
    }

    /// Removes the mask from the cipher, returning `g^m`.
    pub fn decrypt_exp(cipher: &Cipher<C>, key: &C::ScalarField) -> C::Affine {
        let shared_secret = cipher.d * key;
        (cipher.e.into_group() - shared_secret).into_affine()
    }

    /// Searches `[0, 2^bits)` for the discrete log of `decrypted`. Widths above
    /// [`MAX_SEGMENT_BITS`] are never searched.
    pub fn brute_force(decrypted: &C::Affine, bits: usize) -> Option<u64> {
        if bits > MAX_SEGMENT_BITS {
            tracing::debug!(target: LOG_TARGET, bits, "segment width too large to search");
            return None;
        }
        let target = decrypted.into_group();
        let generator = C::Affine::generator();
        let mut candidate = C::zero();
        for exponent in 0..1u64 << bits {
            if candidate == target {
                return Some(exponent);
            }
            candidate += generator;
        }
        None
    }

    pub fn decrypt(cipher: &Cipher<C>, key: &C::ScalarField, bits: usize) -> Option<C::ScalarField> {
        Self::brute_force(&Self::decrypt_exp(cipher, key), bits).map(C::ScalarField::from)
    }

    /// Decrypts every segment by bounded brute force. Fails on the first segment whose plaintext
    /// is out of range.
    pub fn decrypt_segments(
        ciphers: &[Cipher<C>],
        key: &C::ScalarField,
        segment_bits: usize,
    ) -> Result<Vec<C::ScalarField>, Error> {
        ciphers
            .iter()
            .enumerate()
            .map(|(index, cipher)| {
                Self::decrypt(cipher, key, segment_bits).ok_or_else(|| {
                    tracing::debug!(target: LOG_TARGET, index, "segment plaintext out of range");
                    Error::Decryption(index)
                })
            })
            .collect()
    }

    /// Same as [`Self::decrypt_segments`] but resolves discrete logs with a precomputed table.
    pub fn decrypt_segments_with_table(
        ciphers: &[Cipher<C>],
        key: &C::ScalarField,
        table: &DiscreteLogTable<C>,
    ) -> Result<Vec<C::ScalarField>, Error> {
        ciphers
            .iter()
            .enumerate()
            .map(|(index, cipher)| {
                table
                    .lookup(&Self::decrypt_exp(cipher, key))
                    .map(C::ScalarField::from)
                    .ok_or_else(|| {
                        tracing::debug!(target: LOG_TARGET, index, "segment not found in table");
                        Error::Decryption(index)
                    })
            })
            .collect()
    }
}
