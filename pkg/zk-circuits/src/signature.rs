//! Schnorr signatures over the Ristretto group
//!
//! The base point is `generator(Domain::Sig, 0)`, so signing keys live in the
//! same derivation universe as every other generator. Verification checks
//! `s·G == R + e·P` with a Fiat-Shamir challenge `e` bound to the nonce
//! commitment, the verification key, and the message.

use curve25519_dalek::ristretto::RistrettoPoint;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use zk_primitives::{CommitmentPoint, Domain, Element, GeneratorSet};

use crate::util::engine;

const NONCE_PREFIX: &[u8] = b"joinsplit/sig/v1/nonce";
const CHALLENGE_PREFIX: &[u8] = b"joinsplit/sig/v1/challenge";

/// A Schnorr signing key: a secret scalar
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SigningKey(Element);

impl SigningKey {
    /// Generate a fresh signing key
    pub fn random<R: RngCore + CryptoRng>(rng: R) -> Self {
        Self(Element::secure_random(rng))
    }

    /// Wrap an existing secret scalar
    pub fn from_element(secret: Element) -> Self {
        Self(secret)
    }

    /// The public verification key `sk·G`
    pub fn verification_key(&self, generators: &GeneratorSet) -> VerificationKey {
        let base = generators.generator(Domain::Sig, 0);
        VerificationKey(base * self.0.to_scalar())
    }

    /// The scalar handed to nullifier derivation
    ///
    /// Derived as `hash(sk, 0)` under the signature domain, so the note codec
    /// never sees raw key material
    pub fn spend_key(&self, generators: &GeneratorSet) -> Element {
        engine(generators, Domain::Sig).hash(self.0, Element::ZERO)
    }

    /// Sign `message` with a deterministic nonce
    ///
    /// The nonce is derived from the key and the message, so signing needs no
    /// randomness source and never reuses a nonce across distinct messages
    pub fn sign(&self, generators: &GeneratorSet, message: Element) -> Signature {
        let base = generators.generator(Domain::Sig, 0);

        let mut hasher = Sha512::new();
        hasher.update(NONCE_PREFIX);
        hasher.update(self.0.to_le_bytes());
        hasher.update(message.to_le_bytes());
        let nonce = wide_reduce(hasher);

        let commitment = base * nonce.to_scalar();
        let key = base * self.0.to_scalar();

        let challenge = challenge(&commitment, &key, message);
        let response = nonce + challenge * self.0;

        Signature {
            r: commitment,
            s: response,
        }
    }
}

// never print key material
impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// A Schnorr verification key: the point `sk·G`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey(#[serde(with = "point_serde")] RistrettoPoint);

impl VerificationKey {
    /// Check `signature` over `message`
    ///
    /// `s·G == R + e·P`, with `e` recomputed from the transmitted nonce
    /// commitment
    #[must_use]
    pub fn verify(
        &self,
        generators: &GeneratorSet,
        message: Element,
        signature: &Signature,
    ) -> bool {
        let base = generators.generator(Domain::Sig, 0);
        let challenge = challenge(&signature.r, &self.0, message);

        base * signature.s.to_scalar() == signature.r + self.0 * challenge.to_scalar()
    }

    /// The injective pair-of-scalars encoding of this key
    ///
    /// This is what note and account commitments commit to when they bind an
    /// owner
    #[must_use]
    pub fn coordinates(&self) -> (Element, Element) {
        CommitmentPoint::from(self.0).coordinates()
    }

    /// The canonical compressed encoding
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Decode a compressed key; `None` if the encoding is not canonical
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self> {
        CommitmentPoint::from_bytes(bytes).map(|point| Self(*point.as_point()))
    }
}

impl Default for VerificationKey {
    fn default() -> Self {
        use curve25519_dalek::traits::Identity;
        Self(RistrettoPoint::identity())
    }
}

/// A Schnorr signature: the nonce commitment `R` and response `s`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "point_serde")]
    r: RistrettoPoint,
    s: Element,
}

impl Default for Signature {
    fn default() -> Self {
        use curve25519_dalek::traits::Identity;
        Self {
            r: RistrettoPoint::identity(),
            s: Element::ZERO,
        }
    }
}

fn challenge(commitment: &RistrettoPoint, key: &RistrettoPoint, message: Element) -> Element {
    let mut hasher = Sha512::new();
    hasher.update(CHALLENGE_PREFIX);
    hasher.update(commitment.compress().to_bytes());
    hasher.update(key.compress().to_bytes());
    hasher.update(message.to_le_bytes());
    wide_reduce(hasher)
}

fn wide_reduce(hasher: Sha512) -> Element {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Element::from_bytes_mod_order_wide(&wide)
}

mod point_serde {
    use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(point: &RistrettoPoint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        hex::serde::serialize(point.compress().to_bytes(), serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<RistrettoPoint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let vec = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
        let bytes =
            <[u8; 32]>::try_from(vec).map_err(|_| serde::de::Error::custom("Invalid length"))?;
        CompressedRistretto(bytes)
            .decompress()
            .ok_or_else(|| serde::de::Error::custom("not a canonical point encoding"))
    }
}

mod borsh_impls {
    use borsh::{BorshDeserialize, BorshSerialize};
    use curve25519_dalek::ristretto::CompressedRistretto;

    use super::{Signature, VerificationKey};

    fn invalid_point() -> std::io::Error {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "not a canonical point encoding",
        )
    }

    impl BorshSerialize for VerificationKey {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            self.to_bytes().serialize(writer)
        }
    }

    impl BorshDeserialize for VerificationKey {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let bytes = <[u8; 32]>::deserialize_reader(reader)?;
            VerificationKey::from_bytes(bytes).ok_or_else(invalid_point)
        }
    }

    impl BorshSerialize for Signature {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            self.r.compress().to_bytes().serialize(writer)?;
            self.s.serialize(writer)
        }
    }

    impl BorshDeserialize for Signature {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let r_bytes = <[u8; 32]>::deserialize_reader(reader)?;
            let r = CompressedRistretto(r_bytes)
                .decompress()
                .ok_or_else(invalid_point)?;
            let s = BorshDeserialize::deserialize_reader(reader)?;
            Ok(Signature { r, s })
        }
    }
}
