//! Chain integrity rules.
//!
//! A chain is valid when every block's stored digest matches its contents and
//! every non-genesis block links to its predecessor's digest. Genesis is
//! exempt from proof-of-work but its own digest is still checked.

use crate::pow::ProofOfWork;
use landchain_core::{Block, CodecError};
use thiserror::Error;

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("chain has no genesis block")]
    MissingGenesis,

    #[error("first block {index} is not a genesis block")]
    NonGenesisFirstBlock { index: u64 },

    #[error("block {index} digest does not match its contents")]
    DigestMismatch { index: u64 },

    #[error("block {index} previous digest does not match its predecessor")]
    BrokenLink { index: u64 },

    #[error("block index mismatch (expected {expected}, got {got})")]
    IndexMismatch { expected: u64, got: u64 },

    #[error("block {index} does not satisfy difficulty {difficulty}")]
    InsufficientWork { index: u64, difficulty: u32 },

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Chain validator.
pub struct ChainValidator;

impl ChainValidator {
    /// Validate that a block's stored digest matches its fields.
    pub fn validate_block_digest(block: &Block) -> Result<()> {
        if !block.has_consistent_digest()? {
            return Err(ValidationError::DigestMismatch { index: block.index });
        }
        Ok(())
    }

    /// Validate block extends the parent correctly.
    pub fn validate_block_extends_parent(block: &Block, parent: &Block) -> Result<()> {
        if block.index != parent.index + 1 {
            return Err(ValidationError::IndexMismatch {
                expected: parent.index + 1,
                got: block.index,
            });
        }

        if block.previous_digest != parent.digest {
            return Err(ValidationError::BrokenLink { index: block.index });
        }

        Ok(())
    }

    /// Validate the block's proof-of-work.
    pub fn validate_work(block: &Block, pow: &ProofOfWork) -> Result<()> {
        if !pow.is_satisfied_by(&block.digest) {
            return Err(ValidationError::InsufficientWork {
                index: block.index,
                difficulty: pow.difficulty(),
            });
        }
        Ok(())
    }

    /// Validate digests and back-links of a whole chain.
    pub fn validate_chain(blocks: &[Block]) -> Result<()> {
        let genesis = blocks.first().ok_or(ValidationError::MissingGenesis)?;
        if !genesis.is_genesis() {
            return Err(ValidationError::NonGenesisFirstBlock {
                index: genesis.index,
            });
        }
        Self::validate_block_digest(genesis)?;

        for pair in blocks.windows(2) {
            let (parent, block) = (&pair[0], &pair[1]);
            Self::validate_block_digest(block)?;
            Self::validate_block_extends_parent(block, parent)?;
        }

        Ok(())
    }

    /// Validate a chain and additionally require every non-genesis block to
    /// satisfy the given proof-of-work policy.
    pub fn validate_chain_with_work(blocks: &[Block], pow: &ProofOfWork) -> Result<()> {
        Self::validate_chain(blocks)?;
        for block in blocks.iter().skip(1) {
            Self::validate_work(block, pow)?;
        }
        Ok(())
    }

    /// Boolean form of [`ChainValidator::validate_chain`].
    pub fn is_valid(blocks: &[Block]) -> bool {
        Self::validate_chain(blocks).is_ok()
    }
}
