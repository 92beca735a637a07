use zk_primitives::{Domain, Element, GeneratorSet};

use super::note::NoteConstraintCells;
use crate::{
    data::{HashPath, InputNote, Note},
    merkle,
    synth::Synthesizer,
    Result,
};

impl<const MERKLE_D: usize> InputNote<MERKLE_D> {
    /// A real input: `note` sits at `leaf_index` under the transaction root
    pub fn new(note: Note, leaf_index: u64, merkle_path: HashPath<MERKLE_D>) -> Self {
        InputNote {
            note,
            leaf_index,
            merkle_path,
            real: true,
        }
    }

    /// An unused input slot
    ///
    /// Carries a zero-value note and a placeholder path; membership is never
    /// checked, but the slot still produces a well-formed (unusable)
    /// nullifier so the circuit keeps its shape
    pub fn dummy() -> Self {
        InputNote {
            note: Note::dummy(),
            leaf_index: 0,
            merkle_path: HashPath::default(),
            real: false,
        }
    }

    /// The note commitment in canonical scalar form
    pub fn commitment(&self, generators: &GeneratorSet) -> Element {
        self.note.commitment(generators).to_element()
    }

    /// The nullifier this input reveals
    pub fn nullifier(&self, generators: &GeneratorSet, spend_key: Element) -> Element {
        self.note.nullifier(generators, self.leaf_index, spend_key)
    }

    /// The value being spent
    pub fn value(&self) -> Element {
        self.note.value
    }

    /// Constrain this input slot
    ///
    /// Emits the note commitment relation, pins dummy slots to zero value,
    /// pins real slots to the transaction asset, walks the membership path
    /// (binding the result only when the slot is real), and derives the
    /// nullifier
    pub(crate) fn enforce_constraints<S: Synthesizer>(
        &self,
        syn: &mut S,
        claimed_root: &S::Var,
        spend_key: &S::Var,
        tx_asset: &S::Var,
    ) -> Result<InputNoteConstraintCells<S::Var>> {
        // structural path checks are skipped entirely for dummy slots - the
        // placeholder path's content is meaningless by construction
        if self.real {
            self.merkle_path.check_structure(self.leaf_index)?;
        }

        let cells = self.note.enforce_constraints(syn)?;

        let real = syn.witness("input real", Element::from(self.real));
        syn.assert_boolean("input real bit", &real);

        // dummy slots spend nothing
        let zero = syn.constant(Element::ZERO);
        let gated_value = syn.select(&real, &zero, &cells.value);
        syn.assert_equal("dummy input value", &gated_value, &zero);

        // real slots move the transaction's asset
        let gated_asset = syn.select(&real, &cells.asset_id, tx_asset);
        syn.assert_equal("input asset", &gated_asset, tx_asset);

        // membership: the path is always walked so the gate count is
        // witness-independent; the computed root only has to match for real
        // slots
        let computed_root = merkle::membership_gadget(syn, &cells.commitment, &self.merkle_path);
        let effective_root = syn.select(&real, &computed_root, claimed_root);
        syn.assert_equal("input membership", &effective_root, claimed_root);

        let leaf_index = syn.witness("input leaf index", Element::from(self.leaf_index));
        let inner = syn.hash(Domain::Nullifier, &cells.commitment, &leaf_index);
        let nullifier = syn.hash(Domain::Nullifier, &inner, spend_key);

        Ok(InputNoteConstraintCells {
            note: cells,
            real,
            nullifier,
        })
    }
}

/// Cells produced by constraining one input slot
#[derive(Debug)]
pub struct InputNoteConstraintCells<V> {
    /// The plain note cells
    pub note: NoteConstraintCells<V>,
    /// The boolean-constrained real/dummy flag
    pub real: V,
    /// The nullifier this slot reveals
    pub nullifier: V,
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use crate::{
        signature::SigningKey, synth::Native, test::tree::NoteTree, Error, MERKLE_TREE_DEPTH,
    };

    use super::*;

    #[test]
    fn real_input_binds_membership() {
        let generators = GeneratorSet::new();
        let mut tree = NoteTree::<MERKLE_TREE_DEPTH>::new(&generators);

        let key = SigningKey::random(ChaChaRng::from_seed([1; 32]));
        let note = Note::new(
            key.verification_key(&generators),
            Element::new(1),
            10,
            ChaChaRng::from_seed([2; 32]),
        );

        let index = tree.insert(note.commitment(&generators).to_element());
        let input = InputNote::new(note, index, tree.path_for(&generators, index));

        let mut native = Native::new(&generators);
        let root = native.witness("root", tree.root(&generators));
        let spend_key = native.witness("spend key", key.spend_key(&generators));
        let asset = native.witness("asset", Element::new(1));

        let cells = input
            .enforce_constraints(&mut native, &root, &spend_key, &asset)
            .unwrap();

        assert!(native.is_satisfied());
        assert_eq!(
            native.value(&cells.nullifier),
            input.nullifier(&generators, key.spend_key(&generators))
        );
    }

    #[test]
    fn stale_root_is_unsatisfiable_not_an_error() {
        let generators = GeneratorSet::new();
        let mut tree = NoteTree::<MERKLE_TREE_DEPTH>::new(&generators);

        let key = SigningKey::random(ChaChaRng::from_seed([3; 32]));
        let note = Note::new(
            key.verification_key(&generators),
            Element::new(1),
            10,
            ChaChaRng::from_seed([4; 32]),
        );

        let index = tree.insert(note.commitment(&generators).to_element());
        let input = InputNote::new(note, index, tree.path_for(&generators, index));

        let mut native = Native::new(&generators);
        let root = native.witness("root", Element::new(999));
        let spend_key = native.witness("spend key", key.spend_key(&generators));
        let asset = native.witness("asset", Element::new(1));

        input
            .enforce_constraints(&mut native, &root, &spend_key, &asset)
            .unwrap();

        assert!(!native.is_satisfied());
        assert!(native.violations().contains(&"input membership"));
    }

    #[test]
    fn dummy_slot_ignores_its_path() {
        let generators = GeneratorSet::new();

        // nonsense path content: a dummy slot must still build and satisfy
        let mut input = InputNote::<MERKLE_TREE_DEPTH>::dummy();
        for (sibling, _) in &mut input.merkle_path.siblings {
            *sibling = Element::new(123);
        }

        let mut native = Native::new(&generators);
        let root = native.witness("root", Element::new(1));
        let spend_key = native.witness("spend key", Element::new(2));
        let asset = native.witness("asset", Element::new(3));

        let cells = input
            .enforce_constraints(&mut native, &root, &spend_key, &asset)
            .unwrap();

        assert!(native.is_satisfied());
        // the slot still yields a well-formed nullifier
        assert_eq!(
            native.value(&cells.nullifier),
            input.nullifier(&generators, Element::new(2))
        );
    }

    #[test]
    fn dummy_slot_with_value_is_unsatisfiable() {
        let generators = GeneratorSet::new();

        let mut input = InputNote::<MERKLE_TREE_DEPTH>::dummy();
        input.note.value = Element::new(5);

        let mut native = Native::new(&generators);
        let root = native.witness("root", Element::new(1));
        let spend_key = native.witness("spend key", Element::new(2));
        let asset = native.witness("asset", Element::new(3));

        input
            .enforce_constraints(&mut native, &root, &spend_key, &asset)
            .unwrap();

        assert!(!native.is_satisfied());
        assert!(native.violations().contains(&"dummy input value"));
    }

    #[test]
    fn real_slot_with_malformed_path_fails_fast() {
        let generators = GeneratorSet::new();

        let mut input = InputNote::<MERKLE_TREE_DEPTH>::dummy();
        input.real = true;
        input.merkle_path.siblings.pop();

        let mut native = Native::new(&generators);
        let root = native.witness("root", Element::new(1));
        let spend_key = native.witness("spend key", Element::new(2));
        let asset = native.witness("asset", Element::new(3));

        let err = input
            .enforce_constraints(&mut native, &root, &spend_key, &asset)
            .unwrap_err();

        assert_eq!(
            err,
            Error::MalformedPath {
                expected: MERKLE_TREE_DEPTH,
                got: MERKLE_TREE_DEPTH - 1
            }
        );
    }
}
