use rand::{CryptoRng, RngCore};
use zk_primitives::{CommitmentPoint, Domain, Element, GeneratorSet};

use crate::{
    constants::NOTE_COMMIT_OFFSET, data::Note, signature::VerificationKey, synth::Synthesizer,
    util::engine, Result,
};

impl Note {
    /// Create a note with a fresh blinding secret
    pub fn new<R: RngCore + CryptoRng>(
        owner: VerificationKey,
        asset_id: Element,
        value: u64,
        rng: R,
    ) -> Self {
        Self::restore(owner, asset_id, Element::new(value), Element::secure_random(rng))
    }

    /// Rebuild a note from its stored fields
    pub fn restore(
        owner: VerificationKey,
        asset_id: Element,
        value: Element,
        secret: Element,
    ) -> Self {
        Note {
            value,
            asset_id,
            owner,
            secret,
        }
    }

    /// The all-zero note used to fill unused output slots
    ///
    /// It commits like any other note; only its value is pinned to zero
    pub fn dummy() -> Self {
        Note::default()
    }

    /// The note commitment: the leaf published to the global tree
    ///
    /// Commits `[value, asset_id, owner.x, owner.y, secret]` under the note
    /// domain. Identical notes with different secrets commit to unrelated
    /// points, which is what keeps spends unlinkable
    pub fn commitment(&self, generators: &GeneratorSet) -> CommitmentPoint {
        let (owner_x, owner_y) = self.owner.coordinates();

        engine(generators, Domain::Note).commit_array(
            &[self.value, self.asset_id, owner_x, owner_y, self.secret],
            NOTE_COMMIT_OFFSET,
        )
    }

    /// The nullifier revealed when this note is spent from `leaf_index`
    pub fn nullifier(
        &self,
        generators: &GeneratorSet,
        leaf_index: u64,
        spend_key: Element,
    ) -> Element {
        derive_nullifier(
            generators,
            self.commitment(generators).to_element(),
            leaf_index,
            spend_key,
        )
    }

    /// Witness the note fields and constrain the commitment relation
    pub(crate) fn enforce_constraints<S: Synthesizer>(
        &self,
        syn: &mut S,
    ) -> Result<NoteConstraintCells<S::Var>> {
        let value = syn.witness("note value", self.value);
        let asset_id = syn.witness("note asset", self.asset_id);

        let (owner_x, owner_y) = self.owner.coordinates();
        let owner_x = syn.witness("note owner x", owner_x);
        let owner_y = syn.witness("note owner y", owner_y);

        let secret = syn.witness("note secret", self.secret);

        let commitment = syn.commit(
            Domain::Note,
            &[
                value.clone(),
                asset_id.clone(),
                owner_x,
                owner_y,
                secret,
            ],
            NOTE_COMMIT_OFFSET,
        )?;

        Ok(NoteConstraintCells {
            value,
            asset_id,
            commitment,
        })
    }
}

/// Derive a nullifier from a commitment's canonical scalar
///
/// `hash(hash(commitment, leaf_index), spend_key)` under the nullifier
/// domain. Deterministic in all three inputs and one-way in `spend_key`, so
/// re-deriving always produces the same tag without leaking the key
pub fn derive_nullifier(
    generators: &GeneratorSet,
    commitment: Element,
    leaf_index: u64,
    spend_key: Element,
) -> Element {
    let engine = engine(generators, Domain::Nullifier);
    engine.hash(engine.hash(commitment, Element::from(leaf_index)), spend_key)
}

/// Cells produced by constraining one note
#[derive(Debug)]
pub struct NoteConstraintCells<V> {
    /// The note's value
    pub value: V,
    /// The note's asset id
    pub asset_id: V,
    /// The note's commitment (canonical scalar form)
    pub commitment: V,
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use crate::{signature::SigningKey, synth::Native};

    use super::*;

    fn owner(generators: &GeneratorSet, seed: u8) -> VerificationKey {
        SigningKey::random(ChaChaRng::from_seed([seed; 32])).verification_key(generators)
    }

    #[test]
    fn commitment_is_deterministic() {
        let generators = GeneratorSet::new();
        let note = Note::new(
            owner(&generators, 1),
            Element::new(1),
            100,
            ChaChaRng::from_seed([2; 32]),
        );

        assert_eq!(note.commitment(&generators), note.commitment(&generators));
    }

    #[test]
    fn secret_alone_separates_commitments() {
        let generators = GeneratorSet::new();
        let owner = owner(&generators, 1);

        let a = Note::restore(owner, Element::new(1), Element::new(100), Element::new(7));
        let b = Note::restore(owner, Element::new(1), Element::new(100), Element::new(8));

        assert_ne!(a.commitment(&generators), b.commitment(&generators));
        assert_ne!(
            a.nullifier(&generators, 0, Element::new(9)),
            b.nullifier(&generators, 0, Element::new(9))
        );
    }

    #[test]
    fn zero_value_notes_commit_distinctly() {
        let generators = GeneratorSet::new();
        let owner = owner(&generators, 1);

        let a = Note::restore(owner, Element::ZERO, Element::ZERO, Element::new(1));
        let b = Note::restore(owner, Element::ZERO, Element::ZERO, Element::new(2));

        assert_ne!(a.commitment(&generators), b.commitment(&generators));
    }

    #[test]
    fn nullifier_depends_on_every_input() {
        let generators = GeneratorSet::new();
        let commitment = Element::new(11);

        let base = derive_nullifier(&generators, commitment, 5, Element::new(42));

        assert_eq!(
            base,
            derive_nullifier(&generators, commitment, 5, Element::new(42))
        );
        assert_ne!(
            base,
            derive_nullifier(&generators, Element::new(12), 5, Element::new(42))
        );
        assert_ne!(
            base,
            derive_nullifier(&generators, commitment, 6, Element::new(42))
        );
        assert_ne!(
            base,
            derive_nullifier(&generators, commitment, 5, Element::new(43))
        );
    }

    #[test]
    fn constraint_cells_match_native_values() {
        let generators = GeneratorSet::new();
        let note = Note::new(
            owner(&generators, 3),
            Element::new(2),
            50,
            ChaChaRng::from_seed([4; 32]),
        );

        let mut native = Native::new(&generators);
        let cells = note.enforce_constraints(&mut native).unwrap();

        assert_eq!(native.value(&cells.value), note.value);
        assert_eq!(native.value(&cells.asset_id), note.asset_id);
        assert_eq!(
            native.value(&cells.commitment),
            note.commitment(&generators).to_element()
        );
        assert!(native.is_satisfied());
    }
}
