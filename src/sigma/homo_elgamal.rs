use super::LOG_TARGET;
use crate::encrypt::elgamal::Cipher;
use crate::transcript::Transcript;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, Rng};
use ark_std::UniformRand;
use digest::Digest;

/// Proof of knowledge of `(x, r)` such that `d = g^r` and `e = g^x * h^r`.
///
/// `e` is also the Pedersen commitment of the segment inside the range proof, so the same opening
/// ties the ciphertext to the range-checked value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct HomoElgamalProof<C: CurveGroup> {
    pub t: C::Affine,
    pub a3: C::Affine,
    pub z1: C::ScalarField,
    pub z2: C::ScalarField,
}

impl<C: CurveGroup> HomoElgamalProof<C> {
    pub fn new<D: Digest, R: Rng + CryptoRng>(
        encryption_key: &C::Affine,
        cipher: &Cipher<C>,
        index: usize,
        value: &C::ScalarField,
        randomness: &C::ScalarField,
        transcript: &mut Transcript<D>,
        rng: &mut R,
    ) -> Self {
        let g = C::Affine::generator();
        let s1 = C::ScalarField::rand(rng);
        let s2 = C::ScalarField::rand(rng);
        let t = (g * s1 + *encryption_key * s2).into_affine();
        let a3 = (g * s2).into_affine();

        let challenge = Self::challenge(cipher, index, &t, &a3, transcript);
        Self {
            t,
            a3,
            z1: s1 + challenge * value,
            z2: s2 + challenge * randomness,
        }
    }

    pub fn verify<D: Digest>(
        &self,
        encryption_key: &C::Affine,
        cipher: &Cipher<C>,
        index: usize,
        transcript: &mut Transcript<D>,
    ) -> bool {
        let challenge = Self::challenge(cipher, index, &self.t, &self.a3, transcript);
        self.check(encryption_key, cipher, index, &challenge)
    }

    /// Absorbs the statement and the commitments of a segment proof and squeezes its challenge.
    pub(crate) fn transcript_challenge<D: Digest>(
        &self,
        cipher: &Cipher<C>,
        index: usize,
        transcript: &mut Transcript<D>,
    ) -> C::ScalarField {
        Self::challenge(cipher, index, &self.t, &self.a3, transcript)
    }

    /// Verification equations for an already derived challenge.
    pub(crate) fn check(
        &self,
        encryption_key: &C::Affine,
        cipher: &Cipher<C>,
        index: usize,
        challenge: &C::ScalarField,
    ) -> bool {
        let g = C::Affine::generator();

        // g^z1 * h^z2 == T * e^c
        let lhs = g * self.z1 + *encryption_key * self.z2;
        let rhs = cipher.e * *challenge + self.t;
        if lhs != rhs {
            tracing::debug!(target: LOG_TARGET, index, "ciphertext opening check failed");
            return false;
        }

        // g^z2 == A3 * d^c
        let lhs = g * self.z2;
        let rhs = cipher.d * *challenge + self.a3;
        if lhs != rhs {
            tracing::debug!(target: LOG_TARGET, index, "ciphertext randomness check failed");
            return false;
        }
        true
    }

    fn challenge<D: Digest>(
        cipher: &Cipher<C>,
        index: usize,
        t: &C::Affine,
        a3: &C::Affine,
        transcript: &mut Transcript<D>,
    ) -> C::ScalarField {
        transcript.append_u64(b"segment", index as u64);
        transcript.append(b"cipher", cipher);
        transcript.append(b"T", t);
        transcript.append(b"A3", a3);
        transcript.challenge_scalar(b"e")
    }
}
