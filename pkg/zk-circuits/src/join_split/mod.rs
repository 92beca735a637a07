//! The join-split circuit: spend up to two notes, mint up to two notes,
//! balance against a public delta

mod circuit;
mod input_note;
mod note;


pub use circuit::account_commitment;
pub use input_note::InputNoteConstraintCells;
pub use note::{derive_nullifier, NoteConstraintCells};
