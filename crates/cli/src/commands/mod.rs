//! CLI commands module.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use landchain_registry::{Registry, RegistryConfig};
use std::fs;
use std::path::PathBuf;

mod demo;
mod inspect;
mod run;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the sample registration scenario
    Demo(demo::DemoArgs),
    /// Apply registry operations from a JSON file
    Run(run::RunArgs),
    /// Print the blocks of a saved snapshot
    Inspect(inspect::InspectArgs),
}

pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Demo(args) => demo::run(args),
        Commands::Run(args) => run::run(args),
        Commands::Inspect(args) => inspect::run(args),
    }
}

/// Options shared by every command that opens a registry.
#[derive(Args, Debug, Default)]
pub struct RegistryArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the proof-of-work difficulty
    #[arg(short, long)]
    difficulty: Option<u32>,

    /// Override the snapshot file
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Do not write a snapshot
    #[arg(long, conflicts_with = "snapshot")]
    no_snapshot: bool,
}

impl RegistryArgs {
    /// Resolve the configuration: file first, then flag overrides.
    pub fn load(&self) -> Result<RegistryConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?
            }
            None => RegistryConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.ledger.difficulty = difficulty;
        }
        if let Some(snapshot) = &self.snapshot {
            config.snapshot_path = Some(snapshot.clone());
        }
        if self.no_snapshot {
            config.snapshot_path = None;
        }

        Ok(config)
    }

    /// Open a registry with the resolved configuration.
    pub fn open(&self) -> Result<Registry> {
        let config = self.load()?;
        Registry::new(config).context("Failed to create registry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"ledger": {"difficulty": 4, "mining_reward": 5}, "system_id": "REGISTRAR"}"#,
        )
        .unwrap();

        let args = RegistryArgs {
            config: Some(path),
            difficulty: Some(1),
            no_snapshot: true,
            ..RegistryArgs::default()
        };
        let config = args.load().unwrap();

        assert_eq!(config.ledger.difficulty, 1);
        assert_eq!(config.ledger.mining_reward, 5);
        assert_eq!(config.system_id, "REGISTRAR");
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_missing_config_file_errors() {
        let args = RegistryArgs {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..RegistryArgs::default()
        };
        assert!(args.load().is_err());
    }
}
