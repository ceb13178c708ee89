//! Land registry facade for landchain.
//!
//! Translates domain intents ("register parcel X to owner Y", "transfer
//! parcel X from A to B") into ledger events, enforcing the ownership rules
//! before anything is mined:
//!
//! ```text
//! Unregistered ──register──▶ Owned(X) ──transfer(from = X)──▶ Owned(Y)
//! ```
//!
//! Ownership is never stored; it is derived from the ledger on every call.
//!
//! # Example
//!
//! ```rust,no_run
//! use landchain_registry::{Registry, RegistryConfig};
//! use serde_json::json;
//!
//! let mut registry = Registry::new(RegistryConfig::in_memory()).unwrap();
//!
//! let response = registry.register("LAND001", "John Doe", "123 Main St", json!({"area": 2500}));
//! assert!(response.ok);
//!
//! let response = registry.transfer("LAND001", "123 Main St", "456 Oak Ave", "Jane Smith", json!({}));
//! assert!(response.ok);
//! assert_eq!(registry.current_owner("LAND001"), Some("456 Oak Ave"));
//! ```

pub mod config;
pub mod registry;
pub mod response;
pub mod shared;

// Re-export commonly used types
pub use config::RegistryConfig;
pub use registry::{Registry, RegistryError};
pub use response::{LandInfo, LandInfoResponse, LandSummary, Receipt, RegistryResponse, RegistryStats};
pub use shared::SharedRegistry;
