//! Merkle membership checks over the Pedersen two-to-one hash
//!
//! A witness is structurally valid when it carries exactly `DEPTH` siblings
//! and its direction flags agree with the bits of the claimed leaf index.
//! Structural problems are caller bugs and fail fast; a witness that is
//! structurally fine but hashes to the wrong root is simply *false*.

use zk_primitives::{compute_merkle_root, Domain, Element, GeneratorSet};

use crate::{data::HashPath, synth::Synthesizer, util::engine, Error, Result};

/// Bit `height` of `index`
///
/// A set bit means the node is a right child at that height, i.e. its
/// sibling sits on the left
fn direction_bit(index: u64, height: usize) -> bool {
    (index >> height) & 1 == 1
}

impl<const DEPTH: usize> HashPath<DEPTH> {
    /// Wrap an explicit `(sibling, is_left)` sequence
    pub fn new(siblings: Vec<(Element, bool)>) -> Result<Self> {
        if siblings.len() != DEPTH {
            return Err(Error::MalformedPath {
                expected: DEPTH,
                got: siblings.len(),
            });
        }

        Ok(Self { siblings })
    }

    /// Build the path for `index`, deriving each level's direction flag from
    /// the index bits
    pub fn for_index(index: u64, siblings: Vec<Element>) -> Result<Self> {
        if siblings.len() != DEPTH {
            return Err(Error::MalformedPath {
                expected: DEPTH,
                got: siblings.len(),
            });
        }

        let siblings = siblings
            .into_iter()
            .enumerate()
            .map(|(height, sibling)| (sibling, direction_bit(index, height)))
            .collect();

        Ok(Self { siblings })
    }

    /// Recompute the root this path implies for `leaf`
    pub fn compute_root(&self, generators: &GeneratorSet, leaf: Element) -> Element {
        compute_merkle_root(
            &engine(generators, Domain::Merkle),
            leaf,
            self.siblings.iter().copied(),
        )
    }

    /// Check that this path's shape agrees with `index`
    pub(crate) fn check_structure(&self, index: u64) -> Result<()> {
        if self.siblings.len() != DEPTH {
            return Err(Error::MalformedPath {
                expected: DEPTH,
                got: self.siblings.len(),
            });
        }

        if DEPTH < u64::BITS as usize && index >> DEPTH != 0 {
            return Err(Error::IndexMismatch {
                index,
                height: DEPTH,
            });
        }

        for (height, (_, is_left)) in self.siblings.iter().enumerate() {
            if direction_bit(index, height) != *is_left {
                return Err(Error::IndexMismatch { index, height });
            }
        }

        Ok(())
    }
}

/// Verify a membership witness natively
///
/// Structural failures return an error; an intact witness that does not lead
/// to `root` returns `Ok(false)`
pub fn verify<const DEPTH: usize>(
    generators: &GeneratorSet,
    root: Element,
    leaf: Element,
    path: &HashPath<DEPTH>,
    index: u64,
) -> Result<bool> {
    path.check_structure(index)?;
    Ok(path.compute_root(generators, leaf) == root)
}

/// Walk the path inside a synthesizer, returning the computed-root cell
///
/// Each level witnesses the sibling and its direction bit, swaps the operand
/// order with two selects, and hashes. Binding the result (or not - dummy
/// input slots don't) is the caller's decision
pub(crate) fn membership_gadget<S: Synthesizer, const DEPTH: usize>(
    syn: &mut S,
    leaf: &S::Var,
    path: &HashPath<DEPTH>,
) -> S::Var {
    let mut current = leaf.clone();

    for &(sibling, is_left) in &path.siblings {
        let sibling = syn.witness("path sibling", sibling);
        let direction = syn.witness("path direction", Element::from(is_left));
        syn.assert_boolean("path direction bit", &direction);

        let left = syn.select(&direction, &sibling, &current);
        let right = syn.select(&direction, &current, &sibling);

        current = syn.hash(Domain::Merkle, &left, &right);
    }

    current
}
