use super::LOG_TARGET;
use crate::encrypt::elgamal::Cipher;
use crate::transcript::Transcript;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, Rng};
use ark_std::UniformRand;
use digest::Digest;

/// Proof that the Elgamal ciphertext `(D, E) = (g^R, g^X * h^R)` encrypts the discrete log `X` of
/// the public key `Q = g^X`.
///
/// Applied to the assembled segment ciphertext, it binds the segments to the secret behind `Q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct HomoElgamalDlogProof<C: CurveGroup> {
    pub a1: C::Affine,
    pub a2: C::Affine,
    pub a3: C::Affine,
    pub z1: C::ScalarField,
    pub z2: C::ScalarField,
}

impl<C: CurveGroup> HomoElgamalDlogProof<C> {
    pub fn new<D: Digest, R: Rng + CryptoRng>(
        encryption_key: &C::Affine,
        cipher: &Cipher<C>,
        public_key: &C::Affine,
        secret: &C::ScalarField,
        randomness: &C::ScalarField,
        transcript: &mut Transcript<D>,
        rng: &mut R,
    ) -> Self {
        let g = C::Affine::generator();
        let s1 = C::ScalarField::rand(rng);
        let s2 = C::ScalarField::rand(rng);
        let a1 = (g * s1).into_affine();
        let a2 = (*encryption_key * s2).into_affine();
        let a3 = (g * s2).into_affine();

        let challenge = Self::challenge(cipher, public_key, &[a1, a2, a3], transcript);
        Self {
            a1,
            a2,
            a3,
            z1: s1 + challenge * secret,
            z2: s2 + challenge * randomness,
        }
    }

    pub fn verify<D: Digest>(
        &self,
        encryption_key: &C::Affine,
        cipher: &Cipher<C>,
        public_key: &C::Affine,
        transcript: &mut Transcript<D>,
    ) -> bool {
        let g = C::Affine::generator();
        let challenge = Self::challenge(cipher, public_key, &[self.a1, self.a2, self.a3], transcript);
        let g_z1 = g * self.z1;

        // g^z1 * h^z2 == A1 * A2 * E^c
        let lhs = g_z1 + *encryption_key * self.z2;
        let rhs = cipher.e * challenge + self.a1 + self.a2;
        if lhs != rhs {
            tracing::debug!(target: LOG_TARGET, "assembled ciphertext opening check failed");
            return false;
        }

        // g^z2 == A3 * D^c
        if g * self.z2 != cipher.d * challenge + self.a3 {
            tracing::debug!(target: LOG_TARGET, "assembled ciphertext randomness check failed");
            return false;
        }

        // g^z1 == A1 * Q^c
        if g_z1 != *public_key * challenge + self.a1 {
            tracing::debug!(target: LOG_TARGET, "public key check failed");
            return false;
        }
        true
    }

    fn challenge<D: Digest>(
        cipher: &Cipher<C>,
        public_key: &C::Affine,
        commitments: &[C::Affine; 3],
        transcript: &mut Transcript<D>,
    ) -> C::ScalarField {
        transcript.append(b"cipher", cipher);
        transcript.append(b"Q", public_key);
        transcript.append_all(b"A", commitments);
        transcript.challenge_scalar(b"e")
    }
}
