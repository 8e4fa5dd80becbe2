//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bech32 account address in the network's canonical prefix.
///
/// The type does not decode its content; construction sites in
/// `genesis-crypto` are responsible for checksum and prefix validation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_and_orders_by_raw_string() {
        let a = AccountAddress::from("cre1aaa");
        let b = AccountAddress::from("cre1bbb".to_string());
        assert_eq!(a.to_string(), "cre1aaa");
        assert!(a < b);
    }
}
