//! Network identifier.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which network a genesis is being prepared for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
}

impl NetworkType {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl FromStr for NetworkType {
    type Err = TypesError;

    /// Accepts the full name or its one-letter alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "mainnet" => Ok(Self::Mainnet),
            "t" | "testnet" => Ok(Self::Testnet),
            _ => Err(TypesError::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("m".parse::<NetworkType>().unwrap(), NetworkType::Mainnet);
        assert_eq!("Mainnet".parse::<NetworkType>().unwrap(), NetworkType::Mainnet);
        assert_eq!("T".parse::<NetworkType>().unwrap(), NetworkType::Testnet);
        assert_eq!("testnet".parse::<NetworkType>().unwrap(), NetworkType::Testnet);
    }

    #[test]
    fn rejects_unknown() {
        assert!(matches!(
            "devnet".parse::<NetworkType>(),
            Err(TypesError::UnknownNetwork(_))
        ));
    }
}
