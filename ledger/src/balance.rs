//! Genesis bank balances.

use genesis_types::{AccountAddress, Amount, Coin, Coins};
use serde::{Deserialize, Serialize};

/// Coins credited to one address at genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: AccountAddress,
    pub coins: Coins,
}

impl Balance {
    pub fn new(address: AccountAddress, coin: Coin) -> Self {
        Self {
            address,
            coins: Coins::from_coin(coin),
        }
    }

    pub fn amount_of(&self, denom: &str) -> Amount {
        self.coins.amount_of(denom)
    }

    /// Sum `denom` over a set of balances.
    pub fn total_of<'a>(balances: impl IntoIterator<Item = &'a Balance>, denom: &str) -> Amount {
        balances.into_iter().map(|b| b.amount_of(denom)).sum()
    }
}
