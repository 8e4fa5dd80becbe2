//! Errors raised while constructing fundamental values.

use thiserror::Error;

/// Failures parsing or validating a fundamental value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid integer amount {0:?}: expected base-10 digits only")]
    InvalidAmount(String),

    #[error("invalid decimal {value:?}: {reason}")]
    InvalidDecimal { value: String, reason: String },

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("timestamp overflow adding {0}")]
    TimestampOverflow(String),

    #[error("unknown network type {0:?}: expected mainnet (m) or testnet (t)")]
    UnknownNetwork(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}
