use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::marker::PhantomData;
use digest::Digest;

/// Fiat-Shamir transcript shared by every sub-proof of a single proof.
///
/// All public values are absorbed in order, each prefixed by a label. A challenge hashes the whole
/// transcript so far and is absorbed back, so later challenges depend on earlier ones.
#[derive(Clone, Debug)]
pub struct Transcript<D> {
    data: Vec<u8>,
    _digest: PhantomData<D>,
}

impl<D: Digest> Transcript<D> {
    pub fn new(label: &'static [u8]) -> Self {
        let mut transcript = Self {
            data: Vec::new(),
            _digest: PhantomData,
        };
        transcript.append_message(b"domain-separator", label);
        transcript
    }

    pub fn append_message(&mut self, label: &'static [u8], message: &[u8]) {
        self.data.extend_from_slice(label);
        self.data
            .extend_from_slice(&(message.len() as u64).to_le_bytes());
        self.data.extend_from_slice(message);
    }

    pub fn append_u64(&mut self, label: &'static [u8], value: u64) {
        self.append_message(label, &value.to_le_bytes());
    }

    pub fn append<P: CanonicalSerialize>(&mut self, label: &'static [u8], item: &P) {
        self.data.extend_from_slice(label);
        item.serialize_compressed(&mut self.data)
            .expect("serializing into a vector should not fail");
    }

    pub fn append_all<P: CanonicalSerialize>(&mut self, label: &'static [u8], items: &[P]) {
        self.append_u64(label, items.len() as u64);
        items.iter().for_each(|item| self.append(label, item));
    }

    pub fn challenge_scalar<S: PrimeField>(&mut self, label: &'static [u8]) -> S {
        self.data.extend_from_slice(label);
        let output = D::digest(&self.data);
        self.data.extend_from_slice(&output);
        S::from_le_bytes_mod_order(&output)
    }

    /// Squeezes challenges until one is invertible and returns it with its inverse.
    pub fn invertible_challenge<S: PrimeField>(&mut self, label: &'static [u8]) -> (S, S) {
        loop {
            let challenge: S = self.challenge_scalar(label);
            if let Some(inverse) = challenge.inverse() {
                return (challenge, inverse);
            }
        }
    }
}
