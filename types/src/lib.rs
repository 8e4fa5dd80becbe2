//! Fundamental types for genesis preparation.
//!
//! This crate defines the values shared across every other crate in the
//! workspace: exact amounts and decimal ratios, coins, account addresses,
//! timestamps, the network selector, and the immutable `GenesisPolicy`.

pub mod address;
pub mod amount;
pub mod coin;
pub mod condition;
pub mod dec;
pub mod error;
pub mod network;
pub mod params;
pub mod time;

pub use address::AccountAddress;
pub use amount::Amount;
pub use coin::{Coin, Coins};
pub use condition::ConditionType;
pub use dec::Dec;
pub use error::TypesError;
pub use network::NetworkType;
pub use params::{
    AirdropPolicy, ClaimAllocation, FixedAllocation, FoundationPolicy, GenesisPolicy,
    VestingPolicy,
};
pub use time::Timestamp;
