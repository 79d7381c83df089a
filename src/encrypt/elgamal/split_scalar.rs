use super::utils::segment_weights;
use super::{Cipher, ExponentialElgamal};
use crate::params::MAX_SEGMENT_BITS;
use crate::{ConfigurationError, Error};
use ark_ec::CurveGroup;
use ark_ff::fields::PrimeField;
use ark_ff::BigInteger;
use ark_std::rand::{CryptoRng, Rng};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A scalar split into `segment_bits` wide little-endian segments.
///
/// Segments are small enough for the exponential Elgamal plaintext to be brute-forced after
/// decryption. The segments are secret, so they are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SplitScalar<S: PrimeField> {
    splits: Vec<S>,
    #[zeroize(skip)]
    segment_bits: usize,
}

impl<S: PrimeField> SplitScalar<S> {
    pub fn new(splits: Vec<S>, segment_bits: usize) -> Self {
        Self {
            splits,
            segment_bits,
        }
    }

    /// Splits `scalar` into exactly `num_segments` segments, least significant segment first.
    pub fn split(scalar: &S, segment_bits: usize, num_segments: usize) -> Result<Self, Error> {
        if segment_bits == 0 || segment_bits > MAX_SEGMENT_BITS {
            return Err(ConfigurationError::InvalidSegmentWidth(segment_bits).into());
        }
        let total_bits = segment_bits.checked_mul(num_segments).ok_or(
            ConfigurationError::InvalidSegmentLayout {
                bits: segment_bits,
                segments: num_segments,
            },
        )?;
        let bigint = scalar.into_bigint();
        if bigint.num_bits() as usize > total_bits {
            return Err(Error::Range(total_bits));
        }

        let bits = bigint.to_bits_le();
        let splits = (0..num_segments)
            .map(|i| {
                let start = (i * segment_bits).min(bits.len());
                let end = ((i + 1) * segment_bits).min(bits.len());
                let value = bits[start..end]
                    .iter()
                    .rev()
                    .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
                S::from(value)
            })
            .collect();

        Ok(Self::new(splits, segment_bits))
    }

    pub fn reconstruct(&self) -> S {
        reconstruct(&self.splits, self.segment_bits)
    }

    /// Encrypts every segment with fresh randomness and returns the ciphers together with the
    /// randomness used for each of them.
    pub fn encrypt<C, R>(&self, encryption_key: &C::Affine, rng: &mut R) -> (Vec<Cipher<C>>, Vec<S>)
    where
        C: CurveGroup<ScalarField = S>,
        R: Rng + CryptoRng,
    {
        let rands: Vec<S> = (0..self.splits.len()).map(|_| S::rand(rng)).collect();
        let ciphers = self
            .splits
            .iter()
            .zip(&rands)
            .map(|(s, r)| ExponentialElgamal::<C>::encrypt_with_randomness(s, encryption_key, r))
            .collect();

        (ciphers, rands)
    }

    pub fn splits(&self) -> &[S] {
        &self.splits
    }

    pub fn segment_bits(&self) -> usize {
        self.segment_bits
    }

    /// Moves the segments out, leaving an empty split behind.
    pub fn take_splits(&mut self) -> Vec<S> {
        ark_std::mem::take(&mut self.splits)
    }
}

impl<S: PrimeField> ark_std::fmt::Debug for SplitScalar<S> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.debug_struct("SplitScalar")
            .field("segments", &self.splits.len())
            .field("segment_bits", &self.segment_bits)
            .finish()
    }
}

/// Computes `sum(splits[i] * 2^(i * segment_bits))`.
pub fn reconstruct<S: PrimeField>(splits: &[S], segment_bits: usize) -> S {
    segment_weights::<S>(segment_bits, splits.len())
        .into_iter()
        .zip(splits)
        .fold(S::zero(), |acc, (weight, split)| acc + weight * split)
}
