//! Registry configuration.

use landchain_chain::LedgerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = "blockchain_data.json";

/// Identity used as the `from` of registrations and as the reward recipient.
pub const DEFAULT_SYSTEM_ID: &str = "SYSTEM";

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Ledger configuration.
    pub ledger: LedgerConfig,
    /// Where to write the snapshot after each operation (`None` disables it).
    pub snapshot_path: Option<PathBuf>,
    /// System identity.
    pub system_id: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            snapshot_path: Some(PathBuf::from(DEFAULT_SNAPSHOT_FILE)),
            system_id: DEFAULT_SYSTEM_ID.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Default configuration without snapshot persistence.
    pub fn in_memory() -> Self {
        Self {
            snapshot_path: None,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.ledger.difficulty, 2);
        assert_eq!(config.ledger.mining_reward, 100);
        assert_eq!(config.system_id, "SYSTEM");
        assert_eq!(
            config.snapshot_path.as_deref(),
            Some(std::path::Path::new("blockchain_data.json"))
        );
        assert!(RegistryConfig::in_memory().snapshot_path.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"ledger": {"difficulty": 3}, "snapshot_path": null}"#).unwrap();
        assert_eq!(config.ledger.difficulty, 3);
        assert_eq!(config.ledger.mining_reward, 100);
        assert!(config.snapshot_path.is_none());
        assert_eq!(config.system_id, "SYSTEM");
    }
}
