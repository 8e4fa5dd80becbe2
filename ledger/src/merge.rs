//! Balance merging and genesis account assembly.
//!
//! Liquid balances from every source are combined first; two sources naming
//! the same address is a policy defect. Vesting grants are then added on
//! top: an address that already holds a liquid balance has the grant added
//! to that balance, any other address gets a new balance of exactly the
//! grant.
//!
//! Account order is fixed: the foundation first, then one base account per
//! liquid balance without a grant, then every vesting account in input
//! order.

use crate::balance::Balance;
use crate::error::GenesisError;
use crate::vesting::{VestingAccount, VestingSet};
use genesis_crypto::validate_account_address;
use genesis_types::AccountAddress;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenesisAccount {
    Base { address: AccountAddress },
    PeriodicVesting(VestingAccount),
}

impl GenesisAccount {
    pub fn address(&self) -> &AccountAddress {
        match self {
            Self::Base { address } => address,
            Self::PeriodicVesting(account) => &account.address,
        }
    }

    pub fn is_vesting(&self) -> bool {
        matches!(self, Self::PeriodicVesting(_))
    }

    pub fn validate(&self, prefix: &str) -> Result<(), GenesisError> {
        validate_account_address(self.address(), prefix).map_err(|e| {
            GenesisError::InvalidAccount {
                address: self.address().clone(),
                reason: e.to_string(),
            }
        })?;
        match self {
            Self::Base { .. } => Ok(()),
            Self::PeriodicVesting(account) => account.validate(),
        }
    }
}

/// A named group of liquid balances.
#[derive(Clone, Copy, Debug)]
pub struct BalanceSource<'a> {
    pub label: &'a str,
    pub balances: &'a [Balance],
}

impl<'a> BalanceSource<'a> {
    pub fn new(label: &'a str, balances: &'a [Balance]) -> Self {
        Self { label, balances }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedLedger {
    pub balances: Vec<Balance>,
    pub accounts: Vec<GenesisAccount>,
}

pub fn merge_balances(
    sources: &[BalanceSource<'_>],
    foundation: &AccountAddress,
    vesting: &VestingSet,
    prefix: &str,
) -> Result<MergedLedger, GenesisError> {
    let mut balances: Vec<Balance> = Vec::new();
    let mut index: HashMap<AccountAddress, (usize, &str)> = HashMap::new();

    for source in sources {
        for balance in source.balances {
            if let Some((_, first)) = index.get(&balance.address) {
                return Err(GenesisError::DuplicateAddress {
                    address: balance.address.clone(),
                    first: (*first).to_string(),
                    second: source.label.to_string(),
                });
            }
            index.insert(balance.address.clone(), (balances.len(), source.label));
            balances.push(balance.clone());
        }
    }
    let liquid_len = balances.len();

    let mut vesting_only = Vec::new();
    for account in &vesting.accounts {
        match index.get(&account.address) {
            Some((i, label)) => {
                let existing = &mut balances[*i];
                tracing::info!(
                    address = %account.address,
                    source = %label,
                    existing = %existing.coins,
                    grant = %account.original_vesting,
                    "added vesting balance on existing account"
                );
                existing.coins.add(&account.original_vesting);
            }
            None => vesting_only.push(Balance::new(
                account.address.clone(),
                account.original_vesting.clone(),
            )),
        }
    }
    balances.extend(vesting_only);

    let vesting_addresses: HashSet<&AccountAddress> =
        vesting.accounts.iter().map(|a| &a.address).collect();

    let mut accounts = Vec::with_capacity(liquid_len + vesting.accounts.len());
    accounts.push(match vesting.get(foundation) {
        Some(account) => GenesisAccount::PeriodicVesting(account.clone()),
        None => GenesisAccount::Base {
            address: foundation.clone(),
        },
    });
    accounts.extend(
        balances[..liquid_len]
            .iter()
            .filter(|b| &b.address != foundation && !vesting_addresses.contains(&b.address))
            .map(|b| GenesisAccount::Base {
                address: b.address.clone(),
            }),
    );
    accounts.extend(
        vesting
            .accounts
            .iter()
            .filter(|a| &a.address != foundation)
            .cloned()
            .map(GenesisAccount::PeriodicVesting),
    );

    let mut seen = HashSet::new();
    for account in &accounts {
        account.validate(prefix)?;
        if !seen.insert(account.address()) {
            return Err(GenesisError::DuplicateAddress {
                address: account.address().clone(),
                first: "genesis accounts".into(),
                second: "genesis accounts".into(),
            });
        }
    }

    tracing::info!(
        balances = balances.len(),
        accounts = accounts.len(),
        vesting_accounts = accounts.iter().filter(|a| a.is_vesting()).count(),
        "balances merged"
    );
    Ok(MergedLedger { balances, accounts })
}
