//! Thread-safe handle for callers that share one registry.
//!
//! Each mutating call holds the lock for its whole queue-mine-save sequence,
//! so two callers can never have their events mined into the same block.

use crate::registry::Registry;
use crate::response::{LandInfoResponse, LandSummary, RegistryResponse, RegistryStats};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::error;

/// Cloneable, lock-protected registry.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// Wrap a registry for shared use.
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    // A panic mid-mining cannot leave a half-appended block behind, so a
    // poisoned lock still guards a consistent ledger.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only closure against the registry.
    pub fn with<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.lock())
    }

    /// See [`Registry::register`].
    pub fn register(
        &self,
        asset_id: &str,
        owner_name: &str,
        owner_address: &str,
        land_details: Value,
    ) -> RegistryResponse {
        self.lock()
            .register(asset_id, owner_name, owner_address, land_details)
    }

    /// See [`Registry::transfer`].
    pub fn transfer(
        &self,
        asset_id: &str,
        from_owner: &str,
        to_owner: &str,
        to_owner_name: &str,
        transfer_details: Value,
    ) -> RegistryResponse {
        self.lock()
            .transfer(asset_id, from_owner, to_owner, to_owner_name, transfer_details)
    }

    pub fn land_info(&self, asset_id: &str) -> LandInfoResponse {
        self.lock().land_info(asset_id)
    }

    pub fn summary_all(&self) -> Vec<LandSummary> {
        self.lock().summary_all()
    }

    pub fn stats(&self) -> RegistryStats {
        self.lock().stats()
    }

    pub fn verify(&self) -> bool {
        self.lock().verify()
    }

    /// Register on the blocking thread pool so proof-of-work does not stall
    /// the async runtime.
    pub async fn register_async(
        &self,
        asset_id: String,
        owner_name: String,
        owner_address: String,
        land_details: Value,
    ) -> RegistryResponse {
        let this = self.clone();
        let task = tokio::task::spawn_blocking(move || {
            this.register(&asset_id, &owner_name, &owner_address, land_details)
        });
        Self::join(task).await
    }

    /// Transfer on the blocking thread pool.
    pub async fn transfer_async(
        &self,
        asset_id: String,
        from_owner: String,
        to_owner: String,
        to_owner_name: String,
        transfer_details: Value,
    ) -> RegistryResponse {
        let this = self.clone();
        let task = tokio::task::spawn_blocking(move || {
            this.transfer(
                &asset_id,
                &from_owner,
                &to_owner,
                &to_owner_name,
                transfer_details,
            )
        });
        Self::join(task).await
    }

    async fn join(task: tokio::task::JoinHandle<RegistryResponse>) -> RegistryResponse {
        match task.await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "mining task failed");
                RegistryResponse::failure(format!("mining task failed: {}", e))
            }
        }
    }
}
