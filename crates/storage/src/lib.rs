//! Best-effort snapshot persistence for landchain.
//!
//! The ledger is written as one JSON document after every successful
//! registry operation:
//!
//! ```text
//! {
//!   "chain": [ { "index", "transactions", "timestamp",
//!                "previous_hash", "hash", "nonce" }, ... ],
//!   "difficulty": 2,
//!   "pending_transactions": [ ... ]
//! }
//! ```
//!
//! Snapshots can be read back for inspection, but the ledger is never
//! rebuilt from them: every process starts from a fresh genesis block.

pub mod snapshot;

// Re-export commonly used types
pub use snapshot::{ChainSnapshot, Result, SnapshotStore, StorageError};
