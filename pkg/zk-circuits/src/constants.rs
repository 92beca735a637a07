/// Depth of the note tree; a path carries exactly this many siblings, and
/// leaf indexes must fit in this many bits
pub const MERKLE_TREE_DEPTH: usize = 32;

pub const JOIN_SPLIT_INPUTS: usize = 2;
pub const JOIN_SPLIT_OUTPUTS: usize = 2;

/// Generator offset of the note-commitment window within [`Domain::Note`]
///
/// [`Domain::Note`]: zk_primitives::Domain::Note
pub const NOTE_COMMIT_OFFSET: u32 = 0;

/// Generator offset of the account-commitment window within [`Domain::Account`]
///
/// [`Domain::Account`]: zk_primitives::Domain::Account
pub const ACCOUNT_COMMIT_OFFSET: u32 = 0;
