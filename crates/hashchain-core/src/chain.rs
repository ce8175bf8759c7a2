use tracing::{debug, warn};

use crate::constants::{GENESIS_DATA, GENESIS_HASH, GENESIS_PREVIOUS_HASH};
use crate::validate::{check_next_block, validate_chain};
use crate::{now_millis, Block, ChainError};

/// The fixed first block, stamped with the current time.
pub fn genesis_block() -> Block {
    genesis_block_at(now_millis())
}

/// The fixed first block with an explicit timestamp.
///
/// Its hash is the sentinel [`GENESIS_HASH`], not a computed digest; the genesis
/// block is trusted and never validated against a predecessor.
pub fn genesis_block_at(timestamp: u64) -> Block {
    Block {
        index: 0,
        hash: GENESIS_HASH.to_string(),
        previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        data: GENESIS_DATA.to_string(),
        timestamp,
    }
}

/// Append-only sequence of blocks, starting at a genesis block.
///
/// Blocks are only handed out by shared reference or by value, so nothing
/// stored can be changed after it is accepted. Writers need `&mut Chain`; an
/// append reads the tail, builds, validates and pushes within one call.
#[derive(Clone, Debug)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    pub fn new() -> Self {
        Self::with_genesis_at(now_millis())
    }

    /// A chain whose genesis block carries a fixed timestamp.
    pub fn with_genesis_at(timestamp: u64) -> Self {
        Self {
            blocks: vec![genesis_block_at(timestamp)],
        }
    }

    /// Build the next block for `data` on top of the current tail and append it.
    ///
    /// Returns the accepted block. On rejection the chain is left unchanged.
    pub fn append(&mut self, data: impl Into<String>) -> Result<Block, ChainError> {
        self.append_at(data, now_millis())
    }

    /// Same as [`Chain::append`] with a caller-supplied timestamp.
    pub fn append_at(
        &mut self,
        data: impl Into<String>,
        timestamp: u64,
    ) -> Result<Block, ChainError> {
        let data = data.into();
        let tail = self.latest()?;
        // A tail at u64::MAX wraps to 0, which validation then rejects.
        let candidate = Block::new(tail.index.wrapping_add(1), &tail.hash, timestamp, &data);
        self.try_push(candidate.clone())?;
        Ok(candidate)
    }

    /// Validate an externally built candidate against the tail and push it.
    pub fn try_push(&mut self, candidate: Block) -> Result<(), ChainError> {
        let tail = self.latest()?;
        if let Err(rejection) = check_next_block(&candidate, tail) {
            warn!(index = candidate.index, %rejection, "block rejected");
            return Err(rejection.into());
        }
        debug!(index = candidate.index, hash = %candidate.hash, "block appended");
        self.blocks.push(candidate);
        Ok(())
    }

    /// Read-only view of every block, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn latest(&self) -> Result<&Block, ChainError> {
        self.blocks.last().ok_or(ChainError::EmptyChain)
    }

    pub fn genesis(&self) -> Result<&Block, ChainError> {
        self.blocks.first().ok_or(ChainError::EmptyChain)
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false while the genesis block is present.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn validate(&self) -> Vec<(usize, bool)> {
        validate_chain(&self.blocks)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().iter().all(|(_, ok)| *ok)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
