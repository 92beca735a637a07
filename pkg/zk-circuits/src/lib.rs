//! Join-split circuit construction
//!
//! The circuit proves, without revealing the notes involved, that a prover
//! owns value in the global note tree, is authorized to spend it, and
//! produces new commitments plus a public delta that balances.

pub mod constants;
pub mod data;
pub mod merkle;
pub mod signature;
pub mod synth;

mod error;
mod join_split;
mod util;

#[cfg(feature = "test")]
pub mod test;

pub use constants::{JOIN_SPLIT_INPUTS, JOIN_SPLIT_OUTPUTS, MERKLE_TREE_DEPTH};
pub use data::{HashPath, InputNote, JoinSplitOutputs, JoinSplitTx, Note, TxPayload};
pub use error::{Error, Result};
pub use join_split::{
    account_commitment, derive_nullifier, InputNoteConstraintCells, NoteConstraintCells,
};
