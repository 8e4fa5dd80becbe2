//! Denominated coins and coin sets.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An amount of a single denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins with unique denominations, kept in denom order.
///
/// Zero amounts are never stored, so an empty set and a set holding only
/// zero coins are the same value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coins(BTreeMap<String, Amount>);

impl Coins {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_coin(coin: Coin) -> Self {
        let mut coins = Self::new();
        coins.add(&coin);
        coins
    }

    /// Add a coin, merging with an existing entry of the same denom.
    pub fn add(&mut self, coin: &Coin) {
        if coin.amount.is_zero() {
            return;
        }
        *self.0.entry(coin.denom.clone()).or_default() += &coin.amount;
    }

    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0.get(denom).cloned().unwrap_or_default()
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.0
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), amount.clone()))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_same_denom() {
        let mut coins = Coins::new();
        coins.add(&Coin::new("ucre", Amount::from(5u64)));
        coins.add(&Coin::new("ucre", Amount::from(7u64)));
        coins.add(&Coin::new("ubcre", Amount::from(1u64)));
        assert_eq!(coins.amount_of("ucre"), Amount::from(12u64));
        assert_eq!(coins.amount_of("ubcre"), Amount::from(1u64));
        assert_eq!(coins.denoms().collect::<Vec<_>>(), vec!["ubcre", "ucre"]);
    }

    #[test]
    fn zero_coins_are_dropped() {
        let coins = Coins::from_coin(Coin::new("ucre", Amount::zero()));
        assert_eq!(coins, Coins::new());
        assert!(coins.amount_of("ucre").is_zero());
    }

    #[test]
    fn display_lists_denoms_in_order() {
        let mut coins = Coins::from_coin(Coin::new("ucre", Amount::from(3u64)));
        coins.add(&Coin::new("abc", Amount::from(1u64)));
        assert_eq!(coins.to_string(), "1abc,3ucre");
    }
}
