use crate::{ConfigurationError, Error};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::collections::HashMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Largest segment width a table is built for, it holds `2^MAX_TABLE_BITS` points.
pub const MAX_TABLE_BITS: usize = 20;

/// Precomputed discrete logs `g^i -> i` for every `i` in `[0, 2^segment_bits)`.
///
/// Building the table costs as much as a single worst case brute force, so it pays off as soon as
/// more than one segment is decrypted with the same width.
#[derive(Clone, Debug)]
pub struct DiscreteLogTable<C: CurveGroup> {
    segment_bits: usize,
    table: HashMap<C::Affine, u64>,
}

impl<C: CurveGroup> DiscreteLogTable<C> {
    pub fn new(segment_bits: usize) -> Result<Self, Error> {
        if segment_bits == 0 || segment_bits > MAX_TABLE_BITS {
            return Err(ConfigurationError::TableTooLarge(segment_bits).into());
        }

        let size = 1usize << segment_bits;
        let generator = C::Affine::generator();
        let mut points = Vec::with_capacity(size);
        let mut point = C::zero();
        for _ in 0..size {
            points.push(point);
            point += generator;
        }
        let points = C::normalize_batch(&points);

        #[cfg(feature = "parallel")]
        let table = points
            .into_par_iter()
            .enumerate()
            .map(|(i, point)| (point, i as u64))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let table = points
            .into_iter()
            .enumerate()
            .map(|(i, point)| (point, i as u64))
            .collect();

        Ok(Self {
            segment_bits,
            table,
        })
    }

    pub fn segment_bits(&self) -> usize {
        self.segment_bits
    }

    pub fn lookup(&self, point: &C::Affine) -> Option<u64> {
        self.table.get(point).copied()
    }
}
