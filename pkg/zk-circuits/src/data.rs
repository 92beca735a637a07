//! Simple data types used as inputs to the circuits

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use zk_primitives::Element;

use crate::{
    constants::{JOIN_SPLIT_INPUTS, JOIN_SPLIT_OUTPUTS},
    signature::{Signature, VerificationKey},
};

/// A confidential note: ownership of `value` units of `asset_id`
///
/// The note itself never leaves its owner; only its commitment is published,
/// as a leaf of the global note tree
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Note {
    /// Value carried by the note (zero-value notes are legal)
    pub value: Element,
    /// Asset the value is denominated in
    pub asset_id: Element,
    /// Verification key of the note owner
    pub owner: VerificationKey,
    /// Blinding secret; this is what makes the commitment hiding
    pub secret: Element,
}

/// A [`Note`] being spent: the note plus the evidence that it sits in the tree
///
/// Dummy input slots carry `real = false`; they must have zero value, their
/// membership is never checked, and their path content is ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct InputNote<const MERKLE_D: usize> {
    pub note: Note,
    /// Position of the note commitment in the tree
    pub leaf_index: u64,
    /// Sibling path from the commitment up to the transaction root
    pub merkle_path: HashPath<MERKLE_D>,
    /// Whether this slot spends an actual note
    pub real: bool,
}

// https://github.com/rust-lang/rust/issues/61415
impl<const MERKLE_D: usize> Default for InputNote<MERKLE_D> {
    fn default() -> Self {
        Self::dummy()
    }
}

/// The sibling path for a tree of depth `DEPTH`
///
/// Pairs are in deepest-first order. `is_left = true` means the sibling is
/// the left operand of that level's hash, i.e. the running node is a right
/// child there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct HashPath<const DEPTH: usize> {
    /// `(sibling, is_left)` pairs, deepest first
    pub siblings: Vec<(Element, bool)>,
}

impl<const DEPTH: usize> Default for HashPath<DEPTH> {
    fn default() -> Self {
        Self {
            siblings: vec![(Element::ZERO, false); DEPTH],
        }
    }
}

/// A join-split transaction witness
///
/// Constructed off-circuit by the prover, consumed once to produce a
/// constraint set plus [`JoinSplitOutputs`]; never mutated after signing
#[derive(Debug, Clone, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct JoinSplitTx<const MERKLE_D: usize> {
    /// Value entering the pool from outside (a deposit)
    pub public_input: Element,
    /// Value leaving the pool (a withdrawal)
    pub public_output: Element,
    /// The single asset this transaction moves
    pub asset_id: Element,
    pub inputs: [InputNote<MERKLE_D>; JOIN_SPLIT_INPUTS],
    pub outputs: [Note; JOIN_SPLIT_OUTPUTS],
    /// Root the input membership proofs are checked against
    pub merkle_root: Element,
    /// Nullifier key derived from the signing key (never the raw secret)
    pub spend_key: Element,
    /// Key that must have signed the public transaction fields
    pub signing_key: VerificationKey,
    pub signature: Signature,
    /// Position of the signing account's registration leaf
    pub account_index: u64,
    /// Sibling path for the account leaf, under the same root
    pub account_path: HashPath<MERKLE_D>,
}

// https://github.com/rust-lang/rust/issues/61415
impl<const MERKLE_D: usize> Default for JoinSplitTx<MERKLE_D> {
    fn default() -> Self {
        Self {
            public_input: Element::ZERO,
            public_output: Element::ZERO,
            asset_id: Element::ZERO,
            inputs: core::array::from_fn(|_| InputNote::default()),
            outputs: core::array::from_fn(|_| Note::default()),
            merkle_root: Element::ZERO,
            spend_key: Element::ZERO,
            signing_key: VerificationKey::default(),
            signature: Signature::default(),
            account_index: 0,
            account_path: HashPath::default(),
        }
    }
}

/// The public outputs of one join-split circuit
///
/// Nullifiers go to the nullifier set; commitments go to the tree operator
/// for insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSplitOutputs {
    pub nullifier1: Element,
    pub nullifier2: Element,
    pub account_nullifier: Element,
    pub output_commitments: [Element; JOIN_SPLIT_OUTPUTS],
}

/// The serialized form of a transaction
///
/// The version lives in the envelope, not the struct, so a decoder can accept
/// every version it knows and old payloads stay decodable after the schema
/// moves on
#[derive(Debug, Clone, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum TxPayload<const MERKLE_D: usize> {
    V1(JoinSplitTx<MERKLE_D>),
}

impl<const MERKLE_D: usize> TxPayload<MERKLE_D> {
    /// The schema version of this payload
    pub fn version(&self) -> u64 {
        match self {
            Self::V1(_) => 1,
        }
    }

    /// Encode to the canonical byte representation
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        borsh::to_vec(self)
    }

    /// Decode from the canonical byte representation
    pub fn from_bytes(bytes: &[u8]) -> std::io::Result<Self> {
        borsh::from_slice(bytes)
    }

    /// Unwrap into the current in-memory representation
    pub fn into_latest(self) -> JoinSplitTx<MERKLE_D> {
        match self {
            Self::V1(tx) => tx,
        }
    }
}

impl<const MERKLE_D: usize> From<JoinSplitTx<MERKLE_D>> for TxPayload<MERKLE_D> {
    fn from(tx: JoinSplitTx<MERKLE_D>) -> Self {
        Self::V1(tx)
    }
}
