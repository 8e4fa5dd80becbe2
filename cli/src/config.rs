//! Run configuration with TOML file support.

use genesis_types::{GenesisPolicy, NetworkType};
use genesis_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for one `prepare-genesis` run.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Command-line flags override file values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareConfig {
    #[serde(default = "default_network")]
    pub network: NetworkType,

    /// Airdrop snapshot (`address,amount`).
    #[serde(default = "default_airdrop_csv")]
    pub airdrop_csv: PathBuf,

    /// Vesting grants (`address,amount`). No file means no vesting.
    #[serde(default = "default_vesting_csv", skip_serializing_if = "Option::is_none")]
    pub vesting_csv: Option<PathBuf>,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Replaces the network preset entirely when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<GenesisPolicy>,
}

fn default_network() -> NetworkType {
    NetworkType::Mainnet
}

fn default_airdrop_csv() -> PathBuf {
    PathBuf::from("./data/result.csv")
}

fn default_vesting_csv() -> Option<PathBuf> {
    Some(PathBuf::from("./data/vesting.csv"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PrepareConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// The configured policy, or the preset for `network`.
    pub fn policy_for(&self, network: NetworkType) -> GenesisPolicy {
        self.policy
            .clone()
            .unwrap_or_else(|| GenesisPolicy::for_network(network))
    }
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            airdrop_csv: default_airdrop_csv(),
            vesting_csv: default_vesting_csv(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            policy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = PrepareConfig::from_toml_str("").unwrap();
        assert_eq!(config, PrepareConfig::default());
        assert_eq!(config.airdrop_csv, PathBuf::from("./data/result.csv"));
        assert_eq!(config.vesting_csv, Some(PathBuf::from("./data/vesting.csv")));
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "testnet"
            airdrop_csv = "/snapshots/airdrop.csv"
            log_format = "json"
        "#;
        let config = PrepareConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.network, NetworkType::Testnet);
        assert_eq!(config.airdrop_csv, PathBuf::from("/snapshots/airdrop.csv"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn policy_table_replaces_preset() {
        let mut policy = GenesisPolicy::mainnet();
        policy.bond_denom = "ustake".into();
        let config = PrepareConfig {
            policy: Some(policy.clone()),
            ..PrepareConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = PrepareConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.policy_for(NetworkType::Mainnet), policy);
    }

    #[test]
    fn preset_used_without_policy_table() {
        let config = PrepareConfig::default();
        assert_eq!(
            config.policy_for(NetworkType::Testnet),
            GenesisPolicy::testnet()
        );
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prepare.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let config = PrepareConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = PrepareConfig::from_toml_file(Path::new("/nonexistent/prepare.toml"));
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }
}
