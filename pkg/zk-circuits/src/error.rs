use zk_primitives::{CommitError, Domain};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An error surfaced while assembling a join-split constraint set
///
/// Structural variants (`InvalidInput`, `MalformedPath`, `IndexMismatch`)
/// are returned before any constraint is emitted: they mean the caller
/// handed over malformed data, not that a prover tried to cheat.
///
/// The semantic variants (`InvalidAuthorization`, `UnbalancedTransaction`)
/// are only ever returned by the fail-fast [`validate`] helper. During
/// synthesis a semantically invalid witness does *not* abort construction -
/// it produces an unsatisfiable constraint set of exactly the same shape, so
/// proving cost and the verification key stay constant regardless of whether
/// the witness is honest.
///
/// [`validate`]: crate::JoinSplitTx::validate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An empty or otherwise malformed scalar vector reached the commitment engine
    #[error("invalid input: {0}")]
    InvalidInput(CommitError),

    /// A merkle witness whose sibling count does not match the tree depth
    #[error("malformed path: expected {expected} siblings, got {got}")]
    MalformedPath {
        expected: usize,
        got: usize,
    },

    /// A leaf index that disagrees with its path's left/right flags
    #[error("index {index} disagrees with the path direction at height {height}")]
    IndexMismatch {
        index: u64,
        height: usize,
    },

    /// The transaction signature does not verify against the signing key
    #[error("signature does not authorize this transaction")]
    InvalidAuthorization,

    /// The public delta plus note values do not balance, or the notes do not
    /// share a single asset id
    #[error("transaction values do not balance")]
    UnbalancedTransaction,

    /// Generator derivation produced the identity point
    ///
    /// Unreachable unless the hash-to-curve implementation is broken
    #[error("generator derivation failed for {domain:?} at index {index}")]
    GeneratorDerivation {
        domain: Domain,
        index: u32,
    },
}

impl From<CommitError> for Error {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::EmptyValues => Error::InvalidInput(err),
            CommitError::DegenerateGenerator { domain, index } => {
                Error::GeneratorDerivation { domain, index }
            }
        }
    }
}
