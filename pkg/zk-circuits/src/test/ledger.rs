use rand::{CryptoRng, RngCore};
use zk_primitives::{Element, GeneratorSet};

use crate::{
    data::{InputNote, JoinSplitTx, Note},
    join_split::account_commitment,
    signature::{SigningKey, VerificationKey},
    test::tree::NoteTree,
    JOIN_SPLIT_INPUTS, JOIN_SPLIT_OUTPUTS, MERKLE_TREE_DEPTH,
};

/// A test ledger: one note tree plus helpers for building signed transactions
///
/// Uses the process-wide generator set, like everything outside of isolated
/// unit tests does
#[derive(Debug, Clone)]
pub struct Ledger {
    pub tree: NoteTree<MERKLE_TREE_DEPTH>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            tree: NoteTree::new(Self::generators()),
        }
    }

    pub fn generators() -> &'static GeneratorSet {
        GeneratorSet::global()
    }

    pub fn root(&self) -> Element {
        self.tree.root(Self::generators())
    }

    /// Insert a note commitment without any verification (simulates notes
    /// that already exist in the tree)
    pub fn add_note(&mut self, note: &Note) -> u64 {
        self.tree
            .insert(note.commitment(Self::generators()).to_element())
    }

    /// Register `wallet`'s signing key as a spending account
    pub fn register_account(&mut self, wallet: &Wallet) -> u64 {
        let generators = Self::generators();
        let leaf = account_commitment(generators, &wallet.verification_key());
        self.tree.insert(leaf)
    }

    /// Turn a tree-resident note into a spendable input
    pub fn input_note(&self, note: Note, index: u64) -> InputNote<MERKLE_TREE_DEPTH> {
        InputNote::new(note, index, self.tree.path_for(Self::generators(), index))
    }

    /// Build a signed join-split over the current root
    ///
    /// Missing input slots become dummies; missing output slots become
    /// zero-value notes owned by `wallet` (outputs are always denominated in
    /// the transaction asset, so plain `Note::dummy()` won't do there)
    #[allow(clippy::too_many_arguments)]
    pub fn transfer<R: RngCore + CryptoRng>(
        &self,
        wallet: &Wallet,
        account_index: u64,
        inputs: Vec<(Note, u64)>,
        outputs: Vec<Note>,
        public_input: u64,
        public_output: u64,
        asset_id: Element,
        mut rng: R,
    ) -> JoinSplitTx<MERKLE_TREE_DEPTH> {
        assert!(inputs.len() <= JOIN_SPLIT_INPUTS);
        assert!(outputs.len() <= JOIN_SPLIT_OUTPUTS);

        let generators = Self::generators();

        let mut input_slots: Vec<InputNote<MERKLE_TREE_DEPTH>> = inputs
            .into_iter()
            .map(|(note, index)| self.input_note(note, index))
            .collect();
        while input_slots.len() < JOIN_SPLIT_INPUTS {
            input_slots.push(InputNote::dummy());
        }

        let mut output_slots = outputs;
        while output_slots.len() < JOIN_SPLIT_OUTPUTS {
            output_slots.push(wallet.new_note(asset_id, 0, &mut rng));
        }

        let mut tx = JoinSplitTx {
            public_input: Element::new(public_input),
            public_output: Element::new(public_output),
            asset_id,
            inputs: input_slots.try_into().unwrap(),
            outputs: output_slots.try_into().unwrap(),
            merkle_root: self.root(),
            account_index,
            account_path: self.tree.path_for(generators, account_index),
            ..JoinSplitTx::default()
        };

        tx.sign(generators, wallet.signing_key());
        tx
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// A test wallet: one signing key
#[derive(Debug, Clone)]
pub struct Wallet {
    key: SigningKey,
}

impl Wallet {
    pub fn new<R: RngCore + CryptoRng>(rng: R) -> Self {
        Self {
            key: SigningKey::random(rng),
        }
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    pub fn verification_key(&self) -> VerificationKey {
        self.key.verification_key(Ledger::generators())
    }

    pub fn spend_key(&self) -> Element {
        self.key.spend_key(Ledger::generators())
    }

    /// Mint a note owned by this wallet
    pub fn new_note<R: RngCore + CryptoRng>(
        &self,
        asset_id: Element,
        value: u64,
        rng: R,
    ) -> Note {
        Note::new(self.verification_key(), asset_id, value, rng)
    }
}
