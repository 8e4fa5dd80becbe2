//! Genesis ledger preparation.
//!
//! Turns a policy and two `address,amount` snapshots (airdrop recipients and
//! vesting grants) into the initial balances, claim grants, vesting accounts
//! and reconciled supply of a new network.

pub mod airdrop;
pub mod allocation;
pub mod balance;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod pipeline;
pub mod supply;
pub mod vesting;

pub use airdrop::{split_entitlement, split_recipients, Airdrop, AirdropSplit, ClaimGrant};
pub use balance::Balance;
pub use error::{ErrorKind, GenesisError};
pub use ingest::{read_recipients, read_recipients_file, RecipientRecord};
pub use merge::{merge_balances, BalanceSource, GenesisAccount, MergedLedger};
pub use pipeline::{preflight, prepare_from_files, prepare_genesis, GenesisOutput};
pub use supply::{reconcile, SupplyComponents};
pub use vesting::{build_vesting_accounts, calc_periods, Period, VestingAccount, VestingSet};
