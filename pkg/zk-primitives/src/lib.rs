#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Core scalar, generator, and commitment primitives for the join-split circuits

mod commit;
mod element;
mod generators;
mod path;

pub use commit::{CommitError, CommitmentPoint, PedersenEngine};
pub use element::{Element, ParseElementError};
pub use generators::{Domain, GeneratorSet};
pub use path::compute_merkle_root;

/// The curve point type underlying all commitments
///
/// Ristretto points form a prime-order group, so generator derivation never
/// needs to clear a cofactor
pub type Point = curve25519_dalek::ristretto::RistrettoPoint;
