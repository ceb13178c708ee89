//! The append-only ledger.
//!
//! Holds the mined blocks and the pending-event buffer. All "current state"
//! (ownership, balances) is derived by replaying the full history in chain
//! order; nothing is indexed.

use crate::pending::PendingEvents;
use chrono::Utc;
use landchain_consensus::{ChainValidator, ConsensusError, ProofOfWork, ValidationError};
use landchain_core::{Block, CodecError, Digest, Event};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("consensus error: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("ledger has no blocks")]
    EmptyChain,
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Leading zero hex digits required of a mined digest.
    pub difficulty: u32,
    /// Amount carried by each reward event.
    pub mining_reward: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: 2,
            mining_reward: 100,
        }
    }
}

/// An event tagged with the block that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Index of the containing block.
    pub block_index: u64,
    /// The event itself.
    #[serde(rename = "transaction")]
    pub event: Event,
    /// Digest of the containing block.
    #[serde(rename = "block_hash")]
    pub block_digest: Digest,
}

/// Ledger statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerStats {
    /// Index of the latest block.
    pub height: u64,
    /// Number of blocks including genesis.
    pub total_blocks: usize,
    /// Number of mined events.
    pub total_events: usize,
    /// Number of events awaiting mining.
    pub pending_events: usize,
    /// Digest of the latest block.
    pub latest_digest: Digest,
    /// Configured difficulty.
    pub difficulty: u32,
}

/// The ledger: mined blocks plus the pending buffer.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Mined blocks, genesis first. Never empty.
    blocks: Vec<Block>,
    /// Events waiting for the next mining round.
    pending: PendingEvents,
    /// Proof-of-work policy.
    pow: ProofOfWork,
    /// Configuration.
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger holding only a fresh genesis block.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        let pow = ProofOfWork::new(config.difficulty)?;
        let genesis = Self::genesis()?;

        Ok(Self {
            blocks: vec![genesis],
            pending: PendingEvents::new(),
            pow,
            config,
        })
    }

    /// Build the genesis block. It is not mined.
    pub fn genesis() -> Result<Block> {
        Ok(Block::genesis(Utc::now())?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Get the required difficulty.
    pub fn difficulty(&self) -> u32 {
        self.pow.difficulty()
    }

    /// Get all mined blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get the number of blocks including genesis.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: genesis is present from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the events waiting for the next mining round.
    pub fn pending(&self) -> &[Event] {
        self.pending.as_slice()
    }

    /// Get the latest block.
    pub fn latest(&self) -> Result<&Block> {
        self.blocks.last().ok_or(LedgerError::EmptyChain)
    }

    /// Append an event to the pending buffer. No semantic checks happen here.
    pub fn queue_event(&mut self, event: Event) {
        debug!(kind = ?event.kind, asset = ?event.asset_id, "event queued");
        self.pending.push(event);
    }

    /// Mine every pending event plus one reward event into a new block.
    ///
    /// The pending buffer is only cleared once the block has been mined and
    /// appended, so a failure leaves the ledger exactly as it was.
    pub fn mine_pending(&mut self, reward_recipient: &str) -> Result<&Block> {
        self.seal_pending(reward_recipient)?;
        self.latest()
    }

    /// Queue one event and mine it straight away.
    ///
    /// If mining fails the event is taken back out of the pending buffer, so
    /// a rejected event is never swept into a later block.
    pub fn mine_event(&mut self, event: Event, reward_recipient: &str) -> Result<&Block> {
        let queued_before = self.pending.len();
        self.queue_event(event);
        if let Err(e) = self.seal_pending(reward_recipient) {
            self.pending.truncate(queued_before);
            return Err(e);
        }
        self.latest()
    }

    fn seal_pending(&mut self, reward_recipient: &str) -> Result<()> {
        let reward = Event::reward(reward_recipient, self.config.mining_reward);
        let events = self.pending.snapshot_with(reward);
        let previous_digest = self.latest()?.digest.clone();

        let mut block = Block::new(self.blocks.len() as u64, events, Utc::now(), previous_digest)?;
        self.pow.seal(&mut block)?;

        self.blocks.push(block);
        self.pending.clear();
        Ok(())
    }

    fn events(&self) -> impl Iterator<Item = (&Block, &Event)> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.events.iter().map(move |event| (block, event)))
    }

    /// The `to_id` of the last register/transfer event for the asset.
    pub fn current_owner(&self, asset_id: &str) -> Option<&str> {
        self.events()
            .filter(|(_, event)| event.concerns(asset_id) && event.kind.is_ownership())
            .last()
            .map(|(_, event)| event.to_id.as_str())
    }

    /// Every event concerning the asset, in chain order.
    pub fn history(&self, asset_id: &str) -> Vec<HistoryRecord> {
        self.events()
            .filter(|(_, event)| event.concerns(asset_id))
            .map(|(block, event)| Self::record(block, event))
            .collect()
    }

    /// Every mined event, in chain order, tagged with its block.
    pub fn all_events(&self) -> Vec<HistoryRecord> {
        self.events()
            .map(|(block, event)| Self::record(block, event))
            .collect()
    }

    fn record(block: &Block, event: &Event) -> HistoryRecord {
        HistoryRecord {
            block_index: block.index,
            event: event.clone(),
            block_digest: block.digest.clone(),
        }
    }

    /// Net `amount` received by a holder across all events.
    ///
    /// Amounts may be integers or fractions of any magnitude, so the sum is
    /// kept as `f64`; it never overflows.
    pub fn balance(&self, holder_id: &str) -> f64 {
        self.events().fold(0.0, |mut balance, (_, event)| {
            if event.from_id.as_deref() == Some(holder_id) {
                balance -= event.amount();
            }
            if event.to_id == holder_id {
                balance += event.amount();
            }
            balance
        })
    }

    /// Check digest consistency and back-links of every block.
    pub fn is_valid(&self) -> bool {
        ChainValidator::is_valid(&self.blocks)
    }

    /// Like [`Ledger::is_valid`], also checking proof-of-work, and reporting
    /// the first violation found.
    pub fn audit(&self) -> std::result::Result<(), ValidationError> {
        ChainValidator::validate_chain_with_work(&self.blocks, &self.pow)
    }

    /// Get ledger statistics.
    pub fn stats(&self) -> Result<LedgerStats> {
        let latest = self.latest()?;
        Ok(LedgerStats {
            height: latest.index,
            total_blocks: self.blocks.len(),
            total_events: self.blocks.iter().map(Block::event_count).sum(),
            pending_events: self.pending.len(),
            latest_digest: latest.digest.clone(),
            difficulty: self.pow.difficulty(),
        })
    }
}
