use thiserror::Error;

/// Coarse classification of a [`Rejection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionKind {
    Structural,
    Linkage,
    Integrity,
}

/// Why a candidate block was not accepted as the successor of another block.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("block {index} is malformed: {reason}")]
    Structural { index: u64, reason: &'static str },

    #[error("index {found} does not follow predecessor index {previous}")]
    IndexMismatch { previous: u64, found: u64 },

    #[error("previous hash {found:?} does not match predecessor hash {expected:?}")]
    PreviousHashMismatch { expected: String, found: String },

    #[error("stored hash {stored:?} does not match recomputed hash {computed:?}")]
    HashMismatch { stored: String, computed: String },
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::Structural { .. } => RejectionKind::Structural,
            Rejection::IndexMismatch { .. } | Rejection::PreviousHashMismatch { .. } => {
                RejectionKind::Linkage
            }
            Rejection::HashMismatch { .. } => RejectionKind::Integrity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Only reachable if the genesis invariant has been broken.
    #[error("chain has no blocks")]
    EmptyChain,

    #[error("block rejected: {0}")]
    Rejected(#[from] Rejection),
}

/// An untyped value that does not have the shape of a block.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("malformed block value: {0}")]
pub struct MalformedBlock(pub &'static str);
