//! Structured results returned to the boundary layer.
//!
//! Business-rule failures are reported through these types with `ok = false`
//! and a human-readable message; callers branch on the flag.

use crate::registry::RegistryError;
use landchain_chain::HistoryRecord;
use landchain_core::{Details, Digest};
use serde::Serialize;

/// Outcome of a successful register or transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Index of the block that sealed the event.
    pub block_index: u64,
    /// Digest of that block.
    pub block_digest: Digest,
    /// Set when the snapshot could not be written. The block stays mined.
    pub persistence_error: Option<String>,
}

/// Result of a register or transfer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryResponse {
    #[serde(rename = "success")]
    pub ok: bool,
    pub message: String,
    #[serde(rename = "transaction_hash", skip_serializing_if = "Option::is_none")]
    pub block_digest: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_error: Option<String>,
}

impl RegistryResponse {
    pub(crate) fn success(message: String, receipt: Receipt) -> Self {
        Self {
            ok: true,
            message,
            block_digest: Some(receipt.block_digest),
            persistence_error: receipt.persistence_error,
        }
    }

    pub(crate) fn failure(message: String) -> Self {
        Self {
            ok: false,
            message,
            block_digest: None,
            persistence_error: None,
        }
    }
}

impl From<&RegistryError> for RegistryResponse {
    fn from(err: &RegistryError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Current state and full history of one parcel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandInfo {
    pub land_id: String,
    pub current_owner: String,
    /// Details of the most recent register/transfer event.
    pub current_details: Details,
    pub transaction_count: usize,
    pub history: Vec<HistoryRecord>,
}

/// Result of a land-info query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandInfoResponse {
    #[serde(rename = "success")]
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub info: Option<LandInfo>,
}

impl From<Result<LandInfo, RegistryError>> for LandInfoResponse {
    fn from(result: Result<LandInfo, RegistryError>) -> Self {
        match result {
            Ok(info) => Self {
                ok: true,
                message: None,
                info: Some(info),
            },
            Err(err) => Self {
                ok: false,
                message: Some(err.to_string()),
                info: None,
            },
        }
    }
}

/// One row of the all-parcels summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandSummary {
    pub land_id: String,
    pub current_owner: String,
    pub registration_date: Option<String>,
    pub last_transfer_date: Option<String>,
    pub transaction_count: usize,
}

/// Aggregate counters over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_blocks: usize,
    pub total_transactions: usize,
    pub total_lands_registered: usize,
    pub total_transfers: usize,
    pub blockchain_valid: bool,
}
