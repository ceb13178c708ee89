//! Ledger orchestration for landchain.
//!
//! This crate brings the primitives together into an append-only ledger:
//! - **Pending buffer**: events waiting for the next mining round
//! - **Ledger**: mining, integrity checks and history-derived queries
//!
//! # Example
//!
//! ```rust,no_run
//! use landchain_chain::{Ledger, LedgerConfig};
//! use landchain_core::{Details, Event};
//!
//! let mut ledger = Ledger::new(LedgerConfig::default()).unwrap();
//!
//! ledger.queue_event(Event::register("SYSTEM", "123 Main St", "LAND001", Details::new()));
//! ledger.mine_pending("SYSTEM").unwrap();
//!
//! assert_eq!(ledger.current_owner("LAND001"), Some("123 Main St"));
//! assert!(ledger.is_valid());
//! ```

pub mod ledger;
pub mod pending;

// Re-export commonly used types
pub use ledger::{HistoryRecord, Ledger, LedgerConfig, LedgerError, LedgerStats};
pub use pending::PendingEvents;
