//! Execution modes for circuit synthesis
//!
//! The join-split logic is written once, against [`Synthesizer`]. Two drivers
//! implement it:
//!
//! - [`Native`] evaluates everything eagerly over plain field elements and
//!   records which assertions failed - the mode used for offline checking
//!   and tests
//! - [`ConstraintBuilder`] allocates numbered witnesses and records a typed
//!   gate per operation, producing the constraint graph a proof backend
//!   consumes; its assignment can be re-evaluated to decide satisfiability
//!
//! Semantic violations (a bad signature, an unbalanced transaction) never
//! abort synthesis in either mode: they make the result unsatisfiable while
//! leaving its shape untouched.

mod circuit;
mod native;

pub use circuit::{ConstraintBuilder, Var};
pub use native::Native;

use zk_primitives::{Domain, Element};

use crate::signature::{Signature, VerificationKey};

/// The arithmetic capability a circuit is written against
///
/// This is the boundary to the proof backend: allocate a witness, combine
/// values, add a constraint, expose a public input. The hash, commitment, and
/// signature relations are backend primitives rather than compositions here,
/// mirroring the gadgets a real constraint system provides.
pub trait Synthesizer {
    /// A handle to an allocated value
    type Var: Clone;

    /// Allocate a private witness
    fn witness(&mut self, label: &'static str, value: Element) -> Self::Var;

    /// Allocate a constant
    fn constant(&mut self, value: Element) -> Self::Var;

    /// The value currently assigned to `var`
    fn value(&self, var: &Self::Var) -> Element;

    /// `a + b`
    fn add(&mut self, a: &Self::Var, b: &Self::Var) -> Self::Var;

    /// `bit · on_true + (1 - bit) · on_false`
    ///
    /// Only meaningful when `bit` is constrained boolean
    fn select(
        &mut self,
        bit: &Self::Var,
        on_true: &Self::Var,
        on_false: &Self::Var,
    ) -> Self::Var;

    /// The two-to-one Pedersen compression under `domain`
    fn hash(&mut self, domain: Domain, left: &Self::Var, right: &Self::Var) -> Self::Var;

    /// A Pedersen commitment under `domain`, reduced to its canonical scalar
    fn commit(
        &mut self,
        domain: Domain,
        values: &[Self::Var],
        offset: u32,
    ) -> crate::Result<Self::Var>;

    /// Constrain `a == b`
    fn assert_equal(&mut self, label: &'static str, a: &Self::Var, b: &Self::Var);

    /// Constrain `var ∈ {0, 1}`
    fn assert_boolean(&mut self, label: &'static str, var: &Self::Var);

    /// Constrain `signature` to be valid for `key` over `message`
    fn verify_signature(
        &mut self,
        label: &'static str,
        key: &VerificationKey,
        signature: &Signature,
        message: &Self::Var,
    );

    /// Expose `var` as a public input
    fn expose_public(&mut self, label: &'static str, var: &Self::Var);
}
