//! Canonical block encoding.
//!
//! A block's five hashed fields are encoded as a JSON object whose keys are
//! emitted in sorted order. Event details are `BTreeMap`s and nested objects
//! are `serde_json::Map` (sorted without the `preserve_order` feature), so two
//! logically identical blocks always produce byte-identical encodings.

use crate::event::Event;
use crate::hash::{hash, Digest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while canonicalising a block.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// The hashed view of a block. Field order is alphabetical and fixed.
#[derive(Serialize)]
struct CanonicalBlock<'a> {
    index: u64,
    nonce: u64,
    previous_hash: &'a Digest,
    timestamp: &'a DateTime<Utc>,
    transactions: &'a [Event],
}

/// Encode a block's fields into their canonical byte form.
pub fn canonical_bytes(
    index: u64,
    events: &[Event],
    timestamp: &DateTime<Utc>,
    previous_digest: &Digest,
    nonce: u64,
) -> Result<Vec<u8>> {
    let canonical = CanonicalBlock {
        index,
        nonce,
        previous_hash: previous_digest,
        timestamp,
        transactions: events,
    };
    Ok(serde_json::to_vec(&canonical)?)
}

/// Compute the digest of a block's canonical form.
pub fn block_digest(
    index: u64,
    events: &[Event],
    timestamp: &DateTime<Utc>,
    previous_digest: &Digest,
    nonce: u64,
) -> Result<Digest> {
    let bytes = canonical_bytes(index, events, timestamp, previous_digest, nonce)?;
    Ok(hash(&bytes))
}
