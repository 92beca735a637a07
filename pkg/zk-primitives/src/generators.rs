use curve25519_dalek::ristretto::RistrettoPoint;
use dashmap::{mapref::entry::Entry, DashMap};
use once_cell::sync::Lazy;
use sha2::Sha512;

/// Version tag baked into every generator preimage
///
/// Bumping this invalidates every commitment, nullifier, and merkle hash in
/// existence, so it changes only with a coordinated migration
const DERIVATION_PREFIX: &[u8] = b"joinsplit/gen/v1";

/// A domain that generators (and therefore commitments) are separated by
///
/// The same underlying Pedersen primitive backs note commitments, nullifier
/// derivation, merkle hashing, account registration, and the signature base
/// point. Giving each use its own generator family means a value committed in
/// one domain can never be reinterpreted as a commitment in another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Note commitments
    Note,
    /// Nullifier derivation
    Nullifier,
    /// Merkle two-to-one compression
    Merkle,
    /// Account registration leaves
    Account,
    /// Signature base point and key derivation
    Sig,
}

impl Domain {
    /// The fixed tag string mixed into generator preimages for this domain
    ///
    /// Tags contain no `/`, which keeps the preimage encoding injective
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Domain::Note => "note",
            Domain::Nullifier => "nullifier",
            Domain::Merkle => "merkle",
            Domain::Account => "account",
            Domain::Sig => "sig",
        }
    }
}

/// A deterministic, memoizing source of Pedersen generators
///
/// `generator(domain, index)` is a pure function: the same pair produces the
/// bit-identical point in every process, forever. Derivation hashes the pair
/// into a curve point, so no party knows a discrete-log relation between any
/// two generators (which is what makes the commitments binding).
///
/// Derived points are cached in a concurrent read-through map, so a set can
/// be shared freely across circuit builders running on multiple threads.
/// Call [`warm`][GeneratorSet::warm] before a latency-sensitive section to
/// avoid paying the hash-to-curve cost on first touch
#[derive(Debug, Default)]
pub struct GeneratorSet {
    cache: DashMap<(Domain, u32), RistrettoPoint>,
}

impl GeneratorSet {
    /// Create a new, empty [`GeneratorSet`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide generator set
    ///
    /// Components that don't need an isolated cache (i.e. everything outside
    /// of tests) should share this one
    #[must_use]
    pub fn global() -> &'static GeneratorSet {
        static GLOBAL: Lazy<GeneratorSet> = Lazy::new(GeneratorSet::new);
        &GLOBAL
    }

    /// The generator for `(domain, index)`
    ///
    /// The preimage is `joinsplit/gen/v1 / <tag> / <index as u32 BE>`, mapped
    /// to the curve with `RistrettoPoint::hash_from_bytes::<Sha512>`
    /// (Elligator-based, uniform over the group; Ristretto is prime-order so
    /// there is no cofactor to clear). The encoding is injective: the prefix
    /// and tags are fixed `/`-free strings and the index is fixed-width
    #[must_use]
    pub fn generator(&self, domain: Domain, index: u32) -> RistrettoPoint {
        match self.cache.entry((domain, index)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(derive(domain, index)),
        }
    }

    /// Derive and cache generators `0..count` for `domain`
    ///
    /// Memoization is unobservable either way; this just front-loads the
    /// hash-to-curve work before, say, a batch of provers starts hammering
    /// the set from many threads
    pub fn warm(&self, domain: Domain, count: u32) {
        tracing::debug!(?domain, count, "warming generator cache");
        for index in 0..count {
            self.generator(domain, index);
        }
    }

    /// The number of generators currently cached
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no generators have been derived yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn derive(domain: Domain, index: u32) -> RistrettoPoint {
    let tag = domain.tag().as_bytes();
    let mut preimage = Vec::with_capacity(DERIVATION_PREFIX.len() + tag.len() + 6);
    preimage.extend_from_slice(DERIVATION_PREFIX);
    preimage.push(b'/');
    preimage.extend_from_slice(tag);
    preimage.push(b'/');
    preimage.extend_from_slice(&index.to_be_bytes());

    RistrettoPoint::hash_from_bytes::<Sha512>(&preimage)
}
