use crate::encrypt::elgamal::{reconstruct, Cipher, DiscreteLogTable, ExponentialElgamal, SplitScalar};
use crate::params::Parameters;
use crate::range_proof::RangeProof;
use crate::sigma::{HomoElgamalDlogProof, HomoElgamalProof};
use crate::transcript::Transcript;
use crate::{ConfigurationError, Error};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, Rng};
use digest::Digest;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use zeroize::{Zeroize, ZeroizeOnDrop};

const LOG_TARGET: &str = "segmented_ve::backend::segmented_elgamal";

/// Domain separator of every proof transcript.
pub const TRANSCRIPT_LABEL: &[u8] = b"segmented-elgamal-ve";

/// Secret side of an encryption: the segments of the secret and the Elgamal randomness of each
/// segment. Only [`prove`] consumes it and it is wiped on drop.
#[derive(
    Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Zeroize, ZeroizeOnDrop,
)]
pub struct Witness<S: PrimeField> {
    x_vec: Vec<S>,
    r_vec: Vec<S>,
}

impl<S: PrimeField> Witness<S> {
    pub fn new(x_vec: Vec<S>, r_vec: Vec<S>) -> Self {
        Self { x_vec, r_vec }
    }

    pub fn x_vec(&self) -> &[S] {
        &self.x_vec
    }

    pub fn r_vec(&self) -> &[S] {
        &self.r_vec
    }
}

impl<S: PrimeField> ark_std::fmt::Debug for Witness<S> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.debug_struct("Witness")
            .field("segments", &self.x_vec.len())
            .finish_non_exhaustive()
    }
}

/// Segment ciphertexts ordered from the least significant segment.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Ciphertext<C: CurveGroup> {
    pub segments: Vec<Cipher<C>>,
}

impl<C: CurveGroup> Ciphertext<C> {
    pub fn new(segments: Vec<Cipher<C>>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The single Elgamal ciphertext of the whole secret.
    pub fn assemble(&self, segment_bits: usize) -> Cipher<C> {
        Cipher::assemble(&self.segments, segment_bits)
    }

    /// Segment ciphertext `e` components, the value commitments of the range proof.
    fn commitments(&self) -> Vec<C::Affine> {
        self.segments.iter().map(|cipher| cipher.e).collect()
    }
}

/// Publicly verifiable proof that a [`Ciphertext`] encrypts the discrete log of a public key.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof<C: CurveGroup> {
    pub range_proof: RangeProof<C>,
    pub segment_proofs: Vec<HomoElgamalProof<C>>,
    pub dlog_proof: HomoElgamalDlogProof<C>,
}

impl<C: CurveGroup> Proof<C> {
    pub fn new<D: Digest, R: Rng + CryptoRng>(
        params: &Parameters<C>,
        encryption_key: &C::Affine,
        witness: &Witness<C::ScalarField>,
        ciphertext: &Ciphertext<C>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        params.check_segment_count(witness.x_vec.len())?;
        params.check_segment_count(witness.r_vec.len())?;
        params.check_segment_count(ciphertext.len())?;
        let segment_bits = params.segment_bits();

        let mut transcript = init_transcript::<C, D>(params, encryption_key, ciphertext);
        let range_proof = RangeProof::new(
            params,
            encryption_key,
            &witness.x_vec,
            &witness.r_vec,
            &mut transcript,
            rng,
        )?;

        let segment_proofs = ciphertext
            .segments
            .iter()
            .zip(witness.x_vec.iter().zip(&witness.r_vec))
            .enumerate()
            .map(|(index, (cipher, (x, r)))| {
                HomoElgamalProof::new(encryption_key, cipher, index, x, r, &mut transcript, rng)
            })
            .collect();

        let mut secret = reconstruct(&witness.x_vec, segment_bits);
        let mut randomness = reconstruct(&witness.r_vec, segment_bits);
        let public_key = (C::Affine::generator() * secret).into_affine();
        let dlog_proof = HomoElgamalDlogProof::new(
            encryption_key,
            &ciphertext.assemble(segment_bits),
            &public_key,
            &secret,
            &randomness,
            &mut transcript,
            rng,
        );
        secret.zeroize();
        randomness.zeroize();

        Ok(Self {
            range_proof,
            segment_proofs,
            dlog_proof,
        })
    }

    pub fn verify<D: Digest>(
        &self,
        params: &Parameters<C>,
        encryption_key: &C::Affine,
        public_key: &C::Affine,
        ciphertext: &Ciphertext<C>,
    ) -> bool {
        if params.check_segment_count(ciphertext.len()).is_err()
            || params.check_segment_count(self.segment_proofs.len()).is_err()
        {
            tracing::debug!(target: LOG_TARGET, "segment count mismatch");
            return false;
        }
        let segment_bits = params.segment_bits();

        let mut transcript = init_transcript::<C, D>(params, encryption_key, ciphertext);
        let commitments = ciphertext.commitments();
        if !self
            .range_proof
            .verify(params, encryption_key, &commitments, &mut transcript)
        {
            tracing::debug!(target: LOG_TARGET, "range proof rejected");
            return false;
        }

        // challenges follow the transcript order, the group checks are independent
        let challenges: Vec<C::ScalarField> = self
            .segment_proofs
            .iter()
            .zip(&ciphertext.segments)
            .enumerate()
            .map(|(index, (proof, cipher))| proof.transcript_challenge(cipher, index, &mut transcript))
            .collect();

        #[cfg(feature = "parallel")]
        let segments_valid = self
            .segment_proofs
            .par_iter()
            .zip(&ciphertext.segments)
            .zip(&challenges)
            .enumerate()
            .all(|(index, ((proof, cipher), challenge))| {
                proof.check(encryption_key, cipher, index, challenge)
            });

        #[cfg(not(feature = "parallel"))]
        let segments_valid = self
            .segment_proofs
            .iter()
            .zip(&ciphertext.segments)
            .zip(&challenges)
            .enumerate()
            .all(|(index, ((proof, cipher), challenge))| {
                proof.check(encryption_key, cipher, index, challenge)
            });

        if !segments_valid {
            tracing::debug!(target: LOG_TARGET, "segment proof rejected");
            return false;
        }

        let valid = self.dlog_proof.verify(
            encryption_key,
            &ciphertext.assemble(segment_bits),
            public_key,
            &mut transcript,
        );
        if !valid {
            tracing::debug!(target: LOG_TARGET, "discrete log proof rejected");
        }
        valid
    }
}

/// Absorbs the public context shared by every sub-proof.
fn init_transcript<C: CurveGroup, D: Digest>(
    params: &Parameters<C>,
    encryption_key: &C::Affine,
    ciphertext: &Ciphertext<C>,
) -> Transcript<D> {
    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    transcript.append_u64(b"segment_bits", params.segment_bits() as u64);
    transcript.append_u64(b"num_segments", params.num_segments() as u64);
    transcript.append(b"g", &C::Affine::generator());
    transcript.append(b"ek", encryption_key);
    transcript.append_all(b"ciphertext", &ciphertext.segments);
    transcript
}

/// Splits `secret` into segments and encrypts each of them under `encryption_key`.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = params.num_segments()))]
pub fn encrypt<C: CurveGroup, R: Rng + CryptoRng>(
    params: &Parameters<C>,
    encryption_key: &C::Affine,
    secret: &C::ScalarField,
    rng: &mut R,
) -> Result<(Witness<C::ScalarField>, Ciphertext<C>), Error> {
    let mut split_scalar = SplitScalar::split(secret, params.segment_bits(), params.num_segments())?;
    let (segments, r_vec) = split_scalar.encrypt::<C, R>(encryption_key, rng);
    let witness = Witness::new(split_scalar.take_splits(), r_vec);
    Ok((witness, Ciphertext::new(segments)))
}

/// Decrypts every segment by bounded brute force and reassembles the secret.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = ciphertext.len()))]
pub fn decrypt<C: CurveGroup>(
    params: &Parameters<C>,
    decryption_key: &C::ScalarField,
    ciphertext: &Ciphertext<C>,
) -> Result<C::ScalarField, Error> {
    params.check_segment_count(ciphertext.len())?;
    let segments = ExponentialElgamal::<C>::decrypt_segments(
        &ciphertext.segments,
        decryption_key,
        params.segment_bits(),
    )?;
    Ok(reconstruct(&segments, params.segment_bits()))
}

/// Same as [`decrypt`] but resolves the segments with a precomputed table.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = ciphertext.len()))]
pub fn decrypt_with_table<C: CurveGroup>(
    params: &Parameters<C>,
    table: &DiscreteLogTable<C>,
    decryption_key: &C::ScalarField,
    ciphertext: &Ciphertext<C>,
) -> Result<C::ScalarField, Error> {
    params.check_segment_count(ciphertext.len())?;
    if table.segment_bits() != params.segment_bits() {
        return Err(ConfigurationError::InvalidSegmentWidth(table.segment_bits()).into());
    }
    let segments =
        ExponentialElgamal::<C>::decrypt_segments_with_table(&ciphertext.segments, decryption_key, table)?;
    Ok(reconstruct(&segments, params.segment_bits()))
}

/// Proves that `ciphertext` encrypts the discrete log of `g^secret` where `secret` is the value
/// behind `witness`.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = ciphertext.len()))]
pub fn prove<D: Digest, C: CurveGroup, R: Rng + CryptoRng>(
    params: &Parameters<C>,
    encryption_key: &C::Affine,
    witness: &Witness<C::ScalarField>,
    ciphertext: &Ciphertext<C>,
    rng: &mut R,
) -> Result<Proof<C>, Error> {
    Proof::new::<D, R>(params, encryption_key, witness, ciphertext, rng)
}

/// Checks `proof` against the public data only. Malformed inputs are rejected, never reported as
/// errors.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(segments = ciphertext.len()))]
pub fn verify<D: Digest, C: CurveGroup>(
    params: &Parameters<C>,
    proof: &Proof<C>,
    encryption_key: &C::Affine,
    public_key: &C::Affine,
    ciphertext: &Ciphertext<C>,
) -> bool {
    proof.verify::<D>(params, encryption_key, public_key, ciphertext)
}
