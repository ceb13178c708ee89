//! Core ledger primitives for landchain.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Digests and the canonical block encoding they are computed over
//! - Ownership events (registration, transfer, mining reward)
//! - Blocks and the proof-of-work nonce search

pub mod block;
pub mod codec;
pub mod event;
pub mod hash;

// Re-export commonly used types at the crate root
pub use block::Block;
pub use codec::{block_digest, canonical_bytes, CodecError};
pub use event::{Details, Event, EventKind};
pub use hash::{hash, Digest, H256};
