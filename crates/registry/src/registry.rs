//! The registry facade.

use crate::config::RegistryConfig;
use crate::response::{
    LandInfo, LandInfoResponse, LandSummary, Receipt, RegistryResponse, RegistryStats,
};
use chrono::Utc;
use landchain_chain::{HistoryRecord, Ledger, LedgerError};
use landchain_core::{Details, Event, EventKind};
use landchain_storage::{ChainSnapshot, SnapshotStore};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Land {asset_id} is already registered to {owner}")]
    AlreadyRegistered { asset_id: String, owner: String },

    #[error("Land {0} is not registered")]
    NotRegistered(String),

    #[error("Only the current owner ({current_owner}) can transfer this land")]
    NotOwner {
        asset_id: String,
        current_owner: String,
    },

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Land registry on top of a ledger.
///
/// Every accepted intent is mined on its own, so the pending buffer is empty
/// between calls.
pub struct Registry {
    ledger: Ledger,
    store: Option<SnapshotStore>,
    system_id: String,
}

impl Registry {
    /// Create a registry with a fresh ledger.
    ///
    /// An existing snapshot is read and reported but not restored: history
    /// from a previous process is lost on restart.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let ledger = Ledger::new(config.ledger)?;
        let store = config.snapshot_path.map(SnapshotStore::new);

        if let Some(store) = &store {
            match store.load() {
                Ok(Some(previous)) => info!(
                    path = %store.path().display(),
                    blocks = previous.len(),
                    "previous snapshot found; history is not restored, starting from genesis"
                ),
                Ok(None) => {}
                Err(e) => warn!(
                    path = %store.path().display(),
                    error = %e,
                    "could not read previous snapshot"
                ),
            }
        }

        Ok(Self {
            ledger,
            store,
            system_id: config.system_id,
        })
    }

    /// Get the underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Get the system identity.
    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    /// Register a parcel to its first owner.
    pub fn try_register(
        &mut self,
        asset_id: &str,
        owner_name: &str,
        owner_address: &str,
        land_details: Value,
    ) -> Result<Receipt> {
        if let Some(owner) = self.ledger.current_owner(asset_id) {
            return Err(RegistryError::AlreadyRegistered {
                asset_id: asset_id.to_string(),
                owner: owner.to_string(),
            });
        }

        let mut details = Details::new();
        details.insert("owner_name".into(), Value::from(owner_name));
        details.insert("land_details".into(), land_details);
        details.insert("registration_date".into(), Value::from(Utc::now().to_rfc3339()));

        let event = Event::register(self.system_id.as_str(), owner_address, asset_id, details);
        self.commit(event)
    }

    /// Transfer a parcel from its current owner.
    pub fn try_transfer(
        &mut self,
        asset_id: &str,
        from_owner: &str,
        to_owner: &str,
        to_owner_name: &str,
        transfer_details: Value,
    ) -> Result<Receipt> {
        let current_owner = self
            .ledger
            .current_owner(asset_id)
            .ok_or_else(|| RegistryError::NotRegistered(asset_id.to_string()))?;

        if current_owner != from_owner {
            return Err(RegistryError::NotOwner {
                asset_id: asset_id.to_string(),
                current_owner: current_owner.to_string(),
            });
        }

        let mut details = Details::new();
        details.insert("new_owner_name".into(), Value::from(to_owner_name));
        details.insert("transfer_details".into(), transfer_details);
        details.insert("transfer_date".into(), Value::from(Utc::now().to_rfc3339()));

        let event = Event::transfer(from_owner, to_owner, asset_id, details);
        self.commit(event)
    }

    /// Mine a single event on its own and persist the ledger.
    fn commit(&mut self, event: Event) -> Result<Receipt> {
        let block = self.ledger.mine_event(event, &self.system_id)?;
        let (block_index, block_digest) = (block.index, block.digest.clone());

        Ok(Receipt {
            block_index,
            block_digest,
            persistence_error: self.persist(),
        })
    }

    /// Write the snapshot. A failure is logged and returned as text; it never
    /// undoes the mined block.
    fn persist(&self) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.save(&self.snapshot()) {
            Ok(()) => None,
            Err(e) => {
                warn!(path = %store.path().display(), error = %e, "failed to save snapshot");
                Some(e.to_string())
            }
        }
    }

    /// Capture the ledger in its persisted shape.
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot::new(
            self.ledger.blocks(),
            self.ledger.difficulty(),
            self.ledger.pending(),
        )
    }

    /// Register a parcel, reporting the outcome as a structured response.
    pub fn register(
        &mut self,
        asset_id: &str,
        owner_name: &str,
        owner_address: &str,
        land_details: Value,
    ) -> RegistryResponse {
        match self.try_register(asset_id, owner_name, owner_address, land_details) {
            Ok(receipt) => RegistryResponse::success(
                format!("Land {} successfully registered to {}", asset_id, owner_name),
                receipt,
            ),
            Err(e) => {
                warn!(asset = asset_id, error = %e, "registration rejected");
                RegistryResponse::from(&e)
            }
        }
    }

    /// Transfer a parcel, reporting the outcome as a structured response.
    pub fn transfer(
        &mut self,
        asset_id: &str,
        from_owner: &str,
        to_owner: &str,
        to_owner_name: &str,
        transfer_details: Value,
    ) -> RegistryResponse {
        match self.try_transfer(asset_id, from_owner, to_owner, to_owner_name, transfer_details) {
            Ok(receipt) => RegistryResponse::success(
                format!("Land {} successfully transferred to {}", asset_id, to_owner_name),
                receipt,
            ),
            Err(e) => {
                warn!(asset = asset_id, error = %e, "transfer rejected");
                RegistryResponse::from(&e)
            }
        }
    }

    /// Current owner, latest details and history of a parcel.
    pub fn try_land_info(&self, asset_id: &str) -> Result<LandInfo> {
        let current_owner = self
            .ledger
            .current_owner(asset_id)
            .ok_or_else(|| RegistryError::NotRegistered(asset_id.to_string()))?
            .to_string();

        let history = self.ledger.history(asset_id);
        let current_details = history
            .iter()
            .rev()
            .find(|record| record.event.kind.is_ownership())
            .map(|record| record.event.details.clone())
            .unwrap_or_default();

        Ok(LandInfo {
            land_id: asset_id.to_string(),
            current_owner,
            current_details,
            transaction_count: history.len(),
            history,
        })
    }

    /// Structured form of [`Registry::try_land_info`].
    pub fn land_info(&self, asset_id: &str) -> LandInfoResponse {
        LandInfoResponse::from(self.try_land_info(asset_id))
    }

    /// One summary row per registered parcel, in order of first registration.
    pub fn summary_all(&self) -> Vec<LandSummary> {
        let mut lands: Vec<LandSummary> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in self.ledger.all_events() {
            let event = &record.event;
            let land_id = match &event.asset_id {
                Some(id) if event.kind.is_ownership() => id,
                _ => continue,
            };

            let position = *positions.entry(land_id.clone()).or_insert_with(|| {
                lands.push(LandSummary {
                    land_id: land_id.clone(),
                    current_owner: event.to_id.clone(),
                    registration_date: None,
                    last_transfer_date: None,
                    transaction_count: 0,
                });
                lands.len() - 1
            });

            let land = &mut lands[position];
            land.current_owner = event.to_id.clone();
            land.transaction_count += 1;

            match event.kind {
                EventKind::Register => {
                    land.registration_date = Some(Self::event_date(event, "registration_date"));
                }
                EventKind::Transfer => {
                    land.last_transfer_date = Some(Self::event_date(event, "transfer_date"));
                }
                EventKind::Reward => {}
            }
        }

        lands
    }

    /// The date recorded in the event details, falling back to the event's own timestamp.
    fn event_date(event: &Event, key: &str) -> String {
        event
            .detail_str(key)
            .map(str::to_string)
            .unwrap_or_else(|| event.timestamp.to_rfc3339())
    }

    /// Aggregate counters over the whole ledger.
    pub fn stats(&self) -> RegistryStats {
        let events = self.ledger.all_events();
        let count = |kind: EventKind| events.iter().filter(|r| r.event.kind == kind).count();

        RegistryStats {
            total_blocks: self.ledger.len(),
            total_transactions: events.len(),
            total_lands_registered: count(EventKind::Register),
            total_transfers: count(EventKind::Transfer),
            blockchain_valid: self.verify(),
        }
    }

    /// Check the integrity of the whole chain.
    pub fn verify(&self) -> bool {
        self.ledger.is_valid()
    }

    /// Current owner of a parcel, if registered.
    pub fn current_owner(&self, asset_id: &str) -> Option<&str> {
        self.ledger.current_owner(asset_id)
    }

    /// Full history of a parcel in chain order.
    pub fn history(&self, asset_id: &str) -> Vec<HistoryRecord> {
        self.ledger.history(asset_id)
    }

    /// Net reward/amount balance of a holder.
    pub fn balance(&self, holder_id: &str) -> f64 {
        self.ledger.balance(holder_id)
    }
}
