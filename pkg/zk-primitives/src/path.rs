use crate::{Element, PedersenEngine};

/// Compute the root hash of a merkle tree
///
/// `siblings` yields `(sibling, is_left)` tuples in deepest-first order:
/// `is_left = true` means the sibling sits on the left, so the running value
/// is the right operand of that level's [`hash`][PedersenEngine::hash].
/// A tree of depth `N` has `N` siblings between a leaf and the root.
///
/// ```rust
/// # use zk_primitives::*;
/// let generators = GeneratorSet::new();
/// let engine = PedersenEngine::new(&generators, Domain::Merkle);
///
/// // a depth-2 tree holding leaves [0, 1, 2, 3]
/// let a = engine.hash(Element::new(0), Element::new(1));
/// let b = engine.hash(Element::new(2), Element::new(3));
/// let root = engine.hash(a, b);
///
/// // prove that `2` is at index 2: sibling `3` on the right, then `a` on the left
/// let siblings = [(Element::new(3), false), (a, true)];
///
/// assert_eq!(compute_merkle_root(&engine, Element::new(2), siblings), root);
///
/// // any other leaf at that position produces a different root
/// assert_ne!(compute_merkle_root(&engine, Element::ZERO, siblings), root);
/// ```
pub fn compute_merkle_root<I: IntoIterator<Item = (Element, bool)>>(
    engine: &PedersenEngine,
    mut leaf: Element,
    siblings: I,
) -> Element {
    for (sibling, is_left) in siblings {
        match is_left {
            // sibling on the left, running value on the right
            true => leaf = engine.hash(sibling, leaf),

            // sibling on the right, running value on the left
            false => leaf = engine.hash(leaf, sibling),
        }
    }

    leaf
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;

    use crate::{Domain, GeneratorSet};

    use super::*;

    fn engine() -> PedersenEngine<'static> {
        static GENERATORS: Lazy<GeneratorSet> = Lazy::new(GeneratorSet::new);
        PedersenEngine::new(&GENERATORS, Domain::Merkle)
    }

    #[test]
    fn empty_path_returns_the_leaf() {
        let engine = engine();
        let leaf = Element::new(17);

        assert_eq!(compute_merkle_root(&engine, leaf, []), leaf);
    }

    #[test]
    fn all_left_fold() {
        let engine = engine();
        let siblings = (0..5u64).map(Element::new).collect::<Vec<_>>();

        let root = compute_merkle_root(
            &engine,
            Element::ZERO,
            siblings.iter().map(|&s| (s, false)),
        );

        // index 0 is the left-most leaf, so every merge is this way round
        let expected = siblings
            .into_iter()
            .fold(Element::ZERO, |acc, s| engine.hash(acc, s));

        assert_eq!(root, expected);
    }

    #[test]
    fn direction_flags_matter() {
        let engine = engine();
        let sibling = [(Element::new(3), false)];
        let flipped = [(Element::new(3), true)];

        assert_ne!(
            compute_merkle_root(&engine, Element::new(2), sibling),
            compute_merkle_root(&engine, Element::new(2), flipped),
        );
    }
}
