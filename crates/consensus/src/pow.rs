//! Proof-of-work difficulty policy.

use landchain_core::{Block, CodecError, Digest};
use thiserror::Error;
use tracing::{info, warn};

/// Difficulties above this take noticeably long on a single core.
pub const PRACTICAL_DIFFICULTY_LIMIT: u32 = 6;

/// Errors that can occur while configuring or running proof-of-work.
#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("difficulty must be at least 1")]
    ZeroDifficulty,

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;

/// Leading-zero proof-of-work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl ProofOfWork {
    /// Create a policy for the given difficulty (leading zero hex digits).
    pub fn new(difficulty: u32) -> Result<Self> {
        if difficulty == 0 {
            return Err(ConsensusError::ZeroDifficulty);
        }
        if difficulty > PRACTICAL_DIFFICULTY_LIMIT {
            warn!(
                difficulty,
                expected_attempts = Self::attempts_for(difficulty),
                "proof-of-work difficulty is impractically high; mining may take very long"
            );
        }
        Ok(Self { difficulty })
    }

    /// Required number of leading zero hex digits.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// The required digest prefix, e.g. `"00"` for difficulty 2.
    pub fn target(&self) -> String {
        "0".repeat(self.difficulty as usize)
    }

    /// Expected number of digests to try: `16^difficulty`.
    pub fn expected_attempts(&self) -> f64 {
        Self::attempts_for(self.difficulty)
    }

    fn attempts_for(difficulty: u32) -> f64 {
        16f64.powi(difficulty as i32)
    }

    /// Check whether a digest satisfies this policy.
    pub fn is_satisfied_by(&self, digest: &Digest) -> bool {
        digest.meets_difficulty(self.difficulty)
    }

    /// Mine the block until its digest satisfies this policy.
    pub fn seal(&self, block: &mut Block) -> Result<()> {
        block.mine(self.difficulty)?;
        info!(
            index = block.index,
            nonce = block.nonce,
            digest = %block.digest,
            "block mined"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_zero_difficulty_rejected() {
        assert!(matches!(
            ProofOfWork::new(0),
            Err(ConsensusError::ZeroDifficulty)
        ));
    }

    #[test]
    fn test_target_and_expected_attempts() {
        let pow = ProofOfWork::new(3).unwrap();
        assert_eq!(pow.target(), "000");
        assert_eq!(pow.expected_attempts(), 4096.0);
    }

    #[test]
    fn test_seal_satisfies_policy() {
        let pow = ProofOfWork::new(2).unwrap();
        let mut block = Block::new(1, vec![], Utc::now(), Digest::genesis_parent()).unwrap();
        pow.seal(&mut block).unwrap();

        assert!(pow.is_satisfied_by(&block.digest));
        assert!(block.digest.as_str().starts_with(&pow.target()));
        assert!(block.has_consistent_digest().unwrap());
    }
}
