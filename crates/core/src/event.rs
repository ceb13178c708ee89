//! Ownership events recorded on the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque event payload. Keys are kept sorted so the canonical encoding does
/// not depend on insertion order.
pub type Details = BTreeMap<String, Value>;

/// The kind of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// First registration of an asset.
    Register,
    /// Ownership change of a registered asset.
    Transfer,
    /// Synthetic reward appended by the miner.
    #[serde(rename = "mining_reward")]
    Reward,
}

impl EventKind {
    /// Register and transfer events decide ownership; rewards never do.
    pub fn is_ownership(&self) -> bool {
        matches!(self, EventKind::Register | EventKind::Transfer)
    }
}

/// A single recorded intent, included in exactly one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Previous holder (`None` for rewards).
    #[serde(rename = "from_address")]
    pub from_id: Option<String>,
    /// New holder.
    #[serde(rename = "to_address")]
    pub to_id: String,
    /// Asset identifier (`None` for rewards).
    #[serde(rename = "land_id")]
    pub asset_id: Option<String>,
    /// Event kind.
    #[serde(rename = "transaction_type")]
    pub kind: EventKind,
    /// Opaque payload.
    pub details: Details,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create a registration event.
    pub fn register(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        asset_id: impl Into<String>,
        details: Details,
    ) -> Self {
        Self {
            from_id: Some(from_id.into()),
            to_id: to_id.into(),
            asset_id: Some(asset_id.into()),
            kind: EventKind::Register,
            details,
            timestamp: Utc::now(),
        }
    }

    /// Create a transfer event.
    pub fn transfer(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        asset_id: impl Into<String>,
        details: Details,
    ) -> Self {
        Self {
            from_id: Some(from_id.into()),
            to_id: to_id.into(),
            asset_id: Some(asset_id.into()),
            kind: EventKind::Transfer,
            details,
            timestamp: Utc::now(),
        }
    }

    /// Create a mining reward event.
    pub fn reward(to_id: impl Into<String>, amount: u64) -> Self {
        let mut details = Details::new();
        details.insert("amount".to_string(), Value::from(amount));
        Self {
            from_id: None,
            to_id: to_id.into(),
            asset_id: None,
            kind: EventKind::Reward,
            details,
            timestamp: Utc::now(),
        }
    }

    /// Check whether this event concerns the given asset.
    pub fn concerns(&self, asset_id: &str) -> bool {
        self.asset_id.as_deref() == Some(asset_id)
    }

    /// The numeric `amount` detail (integer or fractional), or 0 when absent
    /// or not a number.
    pub fn amount(&self) -> f64 {
        self.details
            .get("amount")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Look up a string-valued detail.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_shape() {
        let reward = Event::reward("SYSTEM", 100);
        assert_eq!(reward.kind, EventKind::Reward);
        assert!(reward.from_id.is_none());
        assert!(reward.asset_id.is_none());
        assert_eq!(reward.amount(), 100.0);
        assert!(!reward.kind.is_ownership());
    }

    #[test]
    fn test_register_carries_asset() {
        let event = Event::register("SYSTEM", "123 Main St", "LAND001", Details::new());
        assert!(event.concerns("LAND001"));
        assert!(!event.concerns("LAND002"));
        assert!(event.kind.is_ownership());
        assert_eq!(event.amount(), 0.0);
    }

    #[test]
    fn test_amount_reads_any_number() {
        let with_amount = |amount: Value| {
            let mut details = Details::new();
            details.insert("amount".into(), amount);
            Event::transfer("a", "b", "COIN", details)
        };

        assert_eq!(with_amount(Value::from(12.5)).amount(), 12.5);
        assert_eq!(with_amount(Value::from(-3)).amount(), -3.0);
        assert_eq!(with_amount(Value::from(u64::MAX)).amount(), u64::MAX as f64);
        assert_eq!(with_amount(Value::from("100")).amount(), 0.0);
        assert_eq!(Event::reward("SYSTEM", u64::MAX).amount(), u64::MAX as f64);
    }

    #[test]
    fn test_serialized_field_names() {
        let event = Event::transfer("a", "b", "LAND001", Details::new());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["from_address"], "a");
        assert_eq!(json["to_address"], "b");
        assert_eq!(json["land_id"], "LAND001");
        assert_eq!(json["transaction_type"], "transfer");

        let reward = serde_json::to_value(Event::reward("SYSTEM", 1)).unwrap();
        assert_eq!(reward["transaction_type"], "mining_reward");
        assert!(reward["land_id"].is_null());
    }

    #[test]
    fn test_event_json_roundtrip() {
        let mut details = Details::new();
        details.insert("owner_name".into(), Value::from("John Doe"));
        let event = Event::register("SYSTEM", "123 Main St", "LAND001", details);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.detail_str("owner_name"), Some("John Doe"));
    }
}
