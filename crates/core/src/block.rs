//! Blocks and the proof-of-work nonce search.

use crate::codec::{block_digest, Result};
use crate::event::Event;
use crate::hash::Digest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sealed batch of events linked to its predecessor by digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0 for genesis).
    pub index: u64,
    /// Events in inclusion order.
    #[serde(rename = "transactions")]
    pub events: Vec<Event>,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Digest of the previous block, `"0"` for genesis.
    #[serde(rename = "previous_hash")]
    pub previous_digest: Digest,
    /// Proof-of-work nonce.
    pub nonce: u64,
    /// Digest of this block's canonical form.
    #[serde(rename = "hash")]
    pub digest: Digest,
}

impl Block {
    /// Create a new unmined block with `nonce = 0` and a freshly computed digest.
    pub fn new(
        index: u64,
        events: Vec<Event>,
        timestamp: DateTime<Utc>,
        previous_digest: Digest,
    ) -> Result<Self> {
        let digest = block_digest(index, &events, &timestamp, &previous_digest, 0)?;
        Ok(Self {
            index,
            events,
            timestamp,
            previous_digest,
            nonce: 0,
            digest,
        })
    }

    /// Create the genesis block. Genesis is never mined.
    pub fn genesis(timestamp: DateTime<Utc>) -> Result<Self> {
        Self::new(0, Vec::new(), timestamp, Digest::genesis_parent())
    }

    /// Re-derive the digest from the current fields without storing it.
    pub fn recompute_digest(&self) -> Result<Digest> {
        block_digest(
            self.index,
            &self.events,
            &self.timestamp,
            &self.previous_digest,
            self.nonce,
        )
    }

    /// Recompute and store the digest.
    pub fn refresh_digest(&mut self) -> Result<()> {
        self.digest = self.recompute_digest()?;
        Ok(())
    }

    /// Check that the stored digest matches the block's contents.
    pub fn has_consistent_digest(&self) -> Result<bool> {
        Ok(self.recompute_digest()? == self.digest)
    }

    /// Search for a nonce whose digest starts with `difficulty` zero hex digits.
    ///
    /// Starts from the current nonce and is unbounded; expected work is
    /// about `16^difficulty` digests.
    pub fn mine(&mut self, difficulty: u32) -> Result<()> {
        while !self.digest.meets_difficulty(difficulty) {
            self.nonce += 1;
            self.refresh_digest()?;
        }
        Ok(())
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_digest.is_genesis_parent()
    }

    /// Get the number of events in this block.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Details;
    use crate::hash::hash;

    fn sample_block() -> Block {
        let event = Event::register("SYSTEM", "123 Main St", "LAND001", Details::new());
        Block::new(1, vec![event], Utc::now(), hash(b"parent")).unwrap()
    }

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis(Utc::now()).unwrap();

        assert!(genesis.is_genesis());
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.previous_digest, "0");
        assert_eq!(genesis.nonce, 0);
        assert!(genesis.events.is_empty());
        assert!(genesis.has_consistent_digest().unwrap());
    }

    #[test]
    fn test_recompute_digest_idempotent() {
        let block = sample_block();
        let h1 = block.recompute_digest().unwrap();
        let h2 = block.recompute_digest().unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1, block.digest);
    }

    #[test]
    fn test_mine_meets_difficulty() {
        let mut block = sample_block();
        block.mine(2).unwrap();

        assert!(block.digest.as_str().starts_with("00"));
        assert!(block.has_consistent_digest().unwrap());
    }

    #[test]
    fn test_mine_is_deterministic() {
        let mut a = sample_block();
        let mut b = a.clone();
        a.mine(2).unwrap();
        b.mine(2).unwrap();
        assert_eq!(a.nonce, b.nonce);
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn test_mine_zero_difficulty_is_noop() {
        let mut block = sample_block();
        let before = block.digest.clone();
        block.mine(0).unwrap();
        assert_eq!(block.nonce, 0);
        assert_eq!(block.digest, before);
    }

    #[test]
    fn test_tampering_breaks_digest() {
        let mut block = sample_block();
        block.mine(1).unwrap();

        let mut tampered = block.clone();
        tampered.nonce += 1;
        assert!(!tampered.has_consistent_digest().unwrap());

        let mut tampered = block.clone();
        tampered.events[0].to_id = "456 Oak Ave".into();
        assert!(!tampered.has_consistent_digest().unwrap());

        let mut tampered = block;
        tampered.previous_digest = hash(b"elsewhere");
        assert!(!tampered.has_consistent_digest().unwrap());
    }

    #[test]
    fn test_block_json_field_names() {
        let block = sample_block();
        let json = serde_json::to_value(&block).unwrap();
        for key in ["index", "transactions", "timestamp", "previous_hash", "hash", "nonce"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
