use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    traits::{Identity, MultiscalarMul},
};

use crate::{Domain, Element, GeneratorSet};

/// An error produced while computing a Pedersen commitment
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// The scalar vector handed to [`PedersenEngine::commit`] was empty
    #[error("cannot commit to an empty scalar vector")]
    EmptyValues,

    /// A generator derived to the identity point
    ///
    /// This is unreachable for an honest hash-to-curve implementation; seeing
    /// it means the derivation itself is broken
    #[error("generator ({domain:?}, {index}) derived to the identity point")]
    DegenerateGenerator {
        /// The domain the generator was derived under
        domain: Domain,
        /// The absolute generator index (offset included)
        index: u32,
    },
}

/// A Pedersen commitment in affine (compressed-encodable) form
///
/// Binding under the discrete-log assumption. Hiding only when one of the
/// committed scalars is a fresh blinding secret - a raw commitment to known
/// values can be brute-forced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentPoint(RistrettoPoint);

impl CommitmentPoint {
    /// The canonical scalar encoding of this point
    ///
    /// This is the compressed 32-byte encoding reduced mod `ℓ`, and is the
    /// value stored in merkle leaves and fed to nullifier derivation - the
    /// role an x-coordinate plays for a curve with affine coordinates
    #[must_use]
    pub fn to_element(self) -> Element {
        Element::from_le_bytes_mod_order(self.0.compress().to_bytes())
    }

    /// An injective pair-of-scalars encoding of this point
    ///
    /// The canonical compressed encoding is split into its low and high
    /// 16-byte halves; each half is below `2^128 < ℓ`, so the pair determines
    /// the point exactly. This is the form used when a point itself has to be
    /// committed to (e.g. an owner key inside a note commitment)
    #[must_use]
    pub fn coordinates(self) -> (Element, Element) {
        let bytes = self.0.compress().to_bytes();

        let mut lo = [0u8; 32];
        lo[..16].copy_from_slice(&bytes[..16]);
        let mut hi = [0u8; 32];
        hi[..16].copy_from_slice(&bytes[16..]);

        (
            Element::from_le_bytes_mod_order(lo),
            Element::from_le_bytes_mod_order(hi),
        )
    }

    /// The canonical compressed encoding of this point
    #[must_use]
    pub fn to_bytes(self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Decode a compressed point
    ///
    /// Returns `None` if the bytes are not a canonical encoding
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self> {
        CompressedRistretto(bytes).decompress().map(Self)
    }

    /// View the underlying curve point
    #[must_use]
    pub fn as_point(&self) -> &RistrettoPoint {
        &self.0
    }
}

impl From<RistrettoPoint> for CommitmentPoint {
    fn from(point: RistrettoPoint) -> Self {
        Self(point)
    }
}

/// A Pedersen commitment engine bound to one generator [`Domain`]
///
/// `commit(values, offset)` computes `Σ values[i] · generator(domain, offset + i)`.
/// The engine holds no mutable state of its own - it is a read-only borrow of
/// a [`GeneratorSet`], cheap to construct and safe to share across threads
#[derive(Debug, Clone, Copy)]
pub struct PedersenEngine<'g> {
    generators: &'g GeneratorSet,
    domain: Domain,
}

impl<'g> PedersenEngine<'g> {
    /// Create an engine over `generators`, committing under `domain`
    #[must_use]
    pub fn new(generators: &'g GeneratorSet, domain: Domain) -> Self {
        Self { generators, domain }
    }

    /// The domain this engine commits under
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The generator set backing this engine
    #[must_use]
    pub fn generators(&self) -> &'g GeneratorSet {
        self.generators
    }

    /// Commit to an ordered vector of scalars
    ///
    /// Deterministic: identical inputs always produce the identical point.
    /// A zero scalar contributes the identity and is perfectly legal; an
    /// empty vector is not
    pub fn commit(
        &self,
        values: &[Element],
        offset: u32,
    ) -> Result<CommitmentPoint, CommitError> {
        if values.is_empty() {
            return Err(CommitError::EmptyValues);
        }

        let mut points = Vec::with_capacity(values.len());
        let mut index = offset;
        for _ in values {
            let point = self.generators.generator(self.domain, index);
            if point == RistrettoPoint::identity() {
                return Err(CommitError::DegenerateGenerator {
                    domain: self.domain,
                    index,
                });
            }
            points.push(point);
            index += 1;
        }

        Ok(CommitmentPoint(RistrettoPoint::multiscalar_mul(
            values.iter().map(|value| value.to_scalar()),
            points,
        )))
    }

    /// Commit to a fixed-arity scalar array
    ///
    /// The arity is part of the call site, so the empty-vector failure mode
    /// of [`commit`][Self::commit] cannot arise and internal callers don't
    /// carry a `Result` for it
    #[must_use]
    pub fn commit_array<const N: usize>(
        &self,
        values: &[Element; N],
        offset: u32,
    ) -> CommitmentPoint {
        let mut index = offset;
        let points = values.map(|_| {
            let point = self.generators.generator(self.domain, index);
            index += 1;
            point
        });

        CommitmentPoint(RistrettoPoint::multiscalar_mul(
            values.iter().map(|value| value.to_scalar()),
            points,
        ))
    }

    /// Two-to-one compression: commit `[left, right]` and take the canonical
    /// scalar of the result
    ///
    /// This is the primitive that merkle hashing and nullifier derivation are
    /// built from. Not symmetric: `hash(a, b) != hash(b, a)`
    #[must_use]
    pub fn hash(&self, left: Element, right: Element) -> Element {
        self.commit_array(&[left, right], 0).to_element()
    }
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    fn engine(domain: Domain) -> PedersenEngine<'static> {
        static GENERATORS: Lazy<GeneratorSet> = Lazy::new(GeneratorSet::new);
        PedersenEngine::new(&GENERATORS, domain)
    }

    #[test]
    fn commit_is_deterministic() {
        let engine = engine(Domain::Note);
        let values = [Element::new(1), Element::new(2), Element::new(3)];

        let a = engine.commit(&values, 0).unwrap();
        let b = engine.commit(&values, 0).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn empty_vector_is_rejected() {
        let engine = engine(Domain::Note);
        assert_eq!(engine.commit(&[], 0), Err(CommitError::EmptyValues));
    }

    #[test]
    fn zero_scalars_commit_to_the_identity() {
        let engine = engine(Domain::Note);

        let zero = engine.commit(&[Element::ZERO, Element::ZERO], 0).unwrap();
        assert_eq!(zero.0, RistrettoPoint::identity());

        // and a zero coordinate drops out of the sum entirely
        let with_zero = engine
            .commit(&[Element::new(5), Element::ZERO], 0)
            .unwrap();
        let without = engine.commit(&[Element::new(5)], 0).unwrap();
        assert_eq!(with_zero, without);
    }

    #[test]
    fn offset_shifts_the_generator_window() {
        let engine = engine(Domain::Note);
        let values = [Element::new(7)];

        assert_ne!(
            engine.commit(&values, 0).unwrap(),
            engine.commit(&values, 1).unwrap()
        );
    }

    #[test]
    fn domains_are_separated() {
        let left = Element::new(11);
        let right = Element::new(12);

        assert_ne!(
            engine(Domain::Note).hash(left, right),
            engine(Domain::Merkle).hash(left, right)
        );
        assert_ne!(
            engine(Domain::Merkle).hash(left, right),
            engine(Domain::Nullifier).hash(left, right)
        );
    }

    #[test]
    fn hash_is_not_symmetric() {
        let engine = engine(Domain::Merkle);

        assert_ne!(
            engine.hash(Element::new(1), Element::new(2)),
            engine.hash(Element::new(2), Element::new(1))
        );
    }

    #[test]
    fn commit_array_matches_commit() {
        let engine = engine(Domain::Note);
        let values = [Element::new(4), Element::new(5)];

        assert_eq!(
            engine.commit_array(&values, 3),
            engine.commit(&values, 3).unwrap()
        );
    }

    #[test]
    fn coordinates_are_consistent_with_bytes() {
        let engine = engine(Domain::Note);
        let point = engine.commit(&[Element::new(9)], 0).unwrap();

        let (lo, hi) = point.coordinates();
        let bytes = point.to_bytes();

        assert_eq!(lo.to_le_bytes()[..16], bytes[..16]);
        assert_eq!(hi.to_le_bytes()[..16], bytes[16..]);
        assert_eq!(lo.to_le_bytes()[16..], [0; 16]);
        assert_eq!(hi.to_le_bytes()[16..], [0; 16]);
    }

    #[test]
    fn compressed_round_trip() {
        let engine = engine(Domain::Note);
        let point = engine.commit(&[Element::new(42)], 0).unwrap();

        assert_eq!(CommitmentPoint::from_bytes(point.to_bytes()), Some(point));
    }

    #[proptest]
    fn changing_any_scalar_changes_the_commitment(
        #[strategy(proptest::collection::vec(any::<Element>(), 1..6))] values: Vec<Element>,
        #[strategy(0usize..6)] position: usize,
        delta: Element,
    ) {
        prop_assume!(!delta.is_zero());

        let engine = engine(Domain::Note);
        let position = position % values.len();

        let mut tampered = values.clone();
        tampered[position] = tampered[position] + delta;

        prop_assert_ne!(
            engine.commit(&values, 0).unwrap(),
            engine.commit(&tampered, 0).unwrap()
        );
    }

    #[proptest]
    fn hash_is_deterministic(left: Element, right: Element) {
        let engine = engine(Domain::Merkle);
        prop_assert_eq!(engine.hash(left, right), engine.hash(left, right));
    }
}
