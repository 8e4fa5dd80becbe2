use genesis_crypto::AddressError;
use genesis_types::{AccountAddress, Amount, TypesError};
use thiserror::Error;

/// Class of a preparation failure. Every class is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unreadable or unparsable input data.
    InputMalformation,
    /// Configuration that cannot produce a consistent genesis.
    PolicyDefect,
    /// Arithmetic that failed to conserve supply.
    ConservationViolation,
}

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: missing {field} column")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: invalid amount {value:?}")]
    InvalidAmount { row: usize, value: String },

    #[error("row {row}: invalid address {address:?}: {source}")]
    InvalidAddress {
        row: usize,
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("invalid policy: {0}")]
    InvalidPolicy(#[from] TypesError),

    #[error("invalid {label} address in policy: {source}")]
    InvalidPolicyAddress {
        label: String,
        #[source]
        source: AddressError,
    },

    #[error("vesting schedule for {address} has {computed} periods, expected {expected}")]
    VestingPeriodCount {
        address: AccountAddress,
        expected: usize,
        computed: usize,
    },

    #[error("vesting schedule for {address} lasts {computed}s, expected {expected}s")]
    VestingLength {
        address: AccountAddress,
        expected: u64,
        computed: u64,
    },

    #[error("{which} vesting length for {address} overflows u64 seconds")]
    VestingLengthOverflow {
        address: AccountAddress,
        which: &'static str,
    },

    #[error("vesting schedule for {address} releases {computed}, expected {expected}")]
    VestingAmount {
        address: AccountAddress,
        expected: Amount,
        computed: Amount,
    },

    #[error("address {address} appears in both {first} and {second}")]
    DuplicateAddress {
        address: AccountAddress,
        first: String,
        second: String,
    },

    #[error("{pool} holds {available} but {needed} is required")]
    InsufficientFunds {
        pool: String,
        needed: Amount,
        available: Amount,
    },

    #[error("invalid genesis account {address}: {reason}")]
    InvalidAccount {
        address: AccountAddress,
        reason: String,
    },

    #[error("initial release {initial} exceeds entitlement {entitlement}")]
    SplitExceedsEntitlement { entitlement: Amount, initial: Amount },

    #[error("claim grants total {claimable} but the airdrop pool only backs {available}")]
    UnbackedClaims { claimable: Amount, available: Amount },

    #[error("balance of {address} holds unexpected denom {denom}")]
    UnexpectedDenom {
        address: AccountAddress,
        denom: String,
    },

    #[error("supply mismatch: balances sum to {computed}, declared supply is {expected}")]
    SupplyMismatch { expected: Amount, computed: Amount },
}

impl GenesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. }
            | Self::Csv(_)
            | Self::MissingField { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidAddress { .. } => ErrorKind::InputMalformation,

            Self::InvalidPolicy(_)
            | Self::InvalidPolicyAddress { .. }
            | Self::VestingPeriodCount { .. }
            | Self::VestingLength { .. }
            | Self::VestingLengthOverflow { .. }
            | Self::VestingAmount { .. }
            | Self::DuplicateAddress { .. }
            | Self::InsufficientFunds { .. }
            | Self::InvalidAccount { .. } => ErrorKind::PolicyDefect,

            Self::SplitExceedsEntitlement { .. }
            | Self::UnbackedClaims { .. }
            | Self::UnexpectedDenom { .. }
            | Self::SupplyMismatch { .. } => ErrorKind::ConservationViolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let input = GenesisError::InvalidAmount {
            row: 3,
            value: "1.5".into(),
        };
        assert_eq!(input.kind(), ErrorKind::InputMalformation);

        let policy = GenesisError::VestingLength {
            address: "cre1x".into(),
            expected: 94_608_000,
            computed: 94_607_999,
        };
        assert_eq!(policy.kind(), ErrorKind::PolicyDefect);
        assert!(policy.to_string().contains("94607999"));

        let supply = GenesisError::SupplyMismatch {
            expected: Amount::from(10u64),
            computed: Amount::from(9u64),
        };
        assert_eq!(supply.kind(), ErrorKind::ConservationViolation);

        let split = GenesisError::SplitExceedsEntitlement {
            entitlement: Amount::from(4u64),
            initial: Amount::from(5u64),
        };
        assert_eq!(split.kind(), ErrorKind::ConservationViolation);
    }
}
