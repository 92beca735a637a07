//! Test helpers: an in-memory note tree and a ledger/wallet harness
//!
//! Real deployments keep the tree in an external storage service; these
//! helpers exist so circuit tests can mint notes, fetch paths, and build
//! signed transactions without one.

pub mod ledger;
pub mod tree;

pub use ledger::{Ledger, Wallet};
pub use tree::NoteTree;
