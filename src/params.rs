use crate::{ConfigurationError, Error};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use digest::Digest;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

const LOG_TARGET: &str = "segmented_ve::params";

/// Domain label for every generator derived by [`Parameters::new`].
pub const GENERATOR_LABEL: &[u8] = b"segmented-elgamal-ve";
/// Upper bound on the segment width; decryption brute-forces `2^segment_bits` candidates.
pub const MAX_SEGMENT_BITS: usize = 32;

/// Immutable protocol parameters shared by prover, verifier and decryptor.
///
/// Besides the segment layout it holds the nothing-up-my-sleeve generators of the range proof:
/// the vector bases `g_vec`, `h_vec` (one per committed bit) and the inner-product base `u`. None of
/// them has a known discrete logarithm with respect to the curve generator or to each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters<C: CurveGroup> {
    segment_bits: usize,
    num_segments: usize,
    g_vec: Vec<C::Affine>,
    h_vec: Vec<C::Affine>,
    u: C::Affine,
}

impl<C: CurveGroup> Parameters<C> {
    pub fn new<D: Digest>(segment_bits: usize, num_segments: usize) -> Result<Self, Error> {
        check_layout(segment_bits, num_segments)?;
        let size = segment_bits * num_segments;
        let g_vec = derive_generators::<C, D>(b"g_vec", size);
        let h_vec = derive_generators::<C, D>(b"h_vec", size);
        let u = hash_to_curve::<C, D>(b"u", 0);
        tracing::debug!(
            target: LOG_TARGET,
            segment_bits,
            num_segments,
            "derived protocol parameters"
        );

        Ok(Self {
            segment_bits,
            num_segments,
            g_vec,
            h_vec,
            u,
        })
    }

    /// Parameters whose segments cover every element of the scalar field.
    ///
    /// The number of segments is rounded up so that the total bit count is a power of two, thus
    /// `segment_bits` should be a power of two as well.
    pub fn for_scalar_field<D: Digest>(segment_bits: usize) -> Result<Self, Error> {
        if segment_bits == 0 || segment_bits > MAX_SEGMENT_BITS {
            return Err(ConfigurationError::InvalidSegmentWidth(segment_bits).into());
        }
        let field_bits = C::ScalarField::MODULUS_BIT_SIZE as usize;
        let min_segments = (field_bits + segment_bits - 1) / segment_bits;
        let total_bits = (segment_bits * min_segments).next_power_of_two();
        if total_bits % segment_bits != 0 {
            return Err(ConfigurationError::InvalidSegmentLayout {
                bits: segment_bits,
                segments: min_segments,
            }
            .into());
        }
        Self::new::<D>(segment_bits, total_bits / segment_bits)
    }

    pub fn segment_bits(&self) -> usize {
        self.segment_bits
    }

    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    /// Total number of committed bits, `segment_bits * num_segments`.
    pub fn size(&self) -> usize {
        self.segment_bits * self.num_segments
    }

    pub fn g_vec(&self) -> &[C::Affine] {
        &self.g_vec
    }

    pub fn h_vec(&self) -> &[C::Affine] {
        &self.h_vec
    }

    pub fn u(&self) -> C::Affine {
        self.u
    }

    pub(crate) fn check_segment_count(&self, got: usize) -> Result<(), ConfigurationError> {
        if got == self.num_segments {
            Ok(())
        } else {
            Err(ConfigurationError::SegmentCountMismatch {
                expected: self.num_segments,
                got,
            })
        }
    }
}

fn check_layout(segment_bits: usize, num_segments: usize) -> Result<(), ConfigurationError> {
    if segment_bits == 0 || segment_bits > MAX_SEGMENT_BITS {
        return Err(ConfigurationError::InvalidSegmentWidth(segment_bits));
    }
    // the inner product argument halves the vectors until a single element is left
    match segment_bits.checked_mul(num_segments) {
        Some(total_bits) if total_bits.is_power_of_two() => Ok(()),
        _ => Err(ConfigurationError::InvalidSegmentLayout {
            bits: segment_bits,
            segments: num_segments,
        }),
    }
}

fn derive_generators<C: CurveGroup, D: Digest>(name: &[u8], size: usize) -> Vec<C::Affine> {
    #[cfg(feature = "parallel")]
    let generators = (0..size as u64)
        .into_par_iter()
        .map(|index| hash_to_curve::<C, D>(name, index))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let generators = (0..size as u64)
        .map(|index| hash_to_curve::<C, D>(name, index))
        .collect();

    generators
}

/// Try-and-increment hashing onto the prime order subgroup.
///
/// Candidate x coordinates are expanded from `D(label || name || index || counter || block)`
/// until one of them is on the curve and survives cofactor clearing.
pub fn hash_to_curve<C: CurveGroup, D: Digest>(name: &[u8], index: u64) -> C::Affine {
    let size = C::Affine::generator().compressed_size();
    let mut counter = 0u64;
    loop {
        let bytes = expand::<D>(name, index, counter, size);
        if let Some(point) = C::Affine::from_random_bytes(&bytes) {
            let point = point.clear_cofactor();
            if !point.is_zero() {
                return point;
            }
        }
        counter += 1;
    }
}

fn expand<D: Digest>(name: &[u8], index: u64, counter: u64, size: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(size);
    let mut block = 0u64;
    while output.len() < size {
        let digest = D::new()
            .chain_update(GENERATOR_LABEL)
            .chain_update(name)
            .chain_update(index.to_le_bytes())
            .chain_update(counter.to_le_bytes())
            .chain_update(block.to_le_bytes())
            .finalize();
        output.extend_from_slice(&digest);
        block += 1;
    }
    output.truncate(size);
    output
}
