//! Supply reconciliation.
//!
//! The total supply is declared independently of the balances as
//! `dex-drop + boost-drop + foundation residual + fixed allocations +
//! vesting grants`. Balances in the bond denom must sum to exactly that.

use crate::airdrop::ClaimGrant;
use crate::balance::Balance;
use crate::error::GenesisError;
use genesis_types::{Amount, Coin};
use serde::{Deserialize, Serialize};

/// Independently known parts of the total supply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyComponents {
    pub dex_drop: Amount,
    pub boost_drop: Amount,
    pub foundation_residual: Amount,
    pub fixed_allocations: Amount,
    pub vesting_total: Amount,
}

impl SupplyComponents {
    pub fn declared_total(&self) -> Amount {
        [
            &self.dex_drop,
            &self.boost_drop,
            &self.foundation_residual,
            &self.fixed_allocations,
            &self.vesting_total,
        ]
        .into_iter()
        .sum()
    }
}

/// Check the balances against the declared supply and return it as a coin.
pub fn reconcile(
    balances: &[Balance],
    components: &SupplyComponents,
    denom: &str,
) -> Result<Coin, GenesisError> {
    if let Some((balance, foreign)) = balances
        .iter()
        .find_map(|b| b.coins.denoms().find(|d| *d != denom).map(|d| (b, d)))
    {
        return Err(GenesisError::UnexpectedDenom {
            address: balance.address.clone(),
            denom: foreign.to_string(),
        });
    }

    let computed = Balance::total_of(balances, denom);
    let expected = components.declared_total();
    if computed != expected {
        return Err(GenesisError::SupplyMismatch { expected, computed });
    }

    tracing::info!(
        dex_drop = %components.dex_drop,
        boost_drop = %components.boost_drop,
        foundation = %components.foundation_residual,
        fixed_allocations = %components.fixed_allocations,
        vesting = %components.vesting_total,
        total = %computed,
        "supply reconciled"
    );
    Ok(Coin::new(denom, computed))
}

/// Claimable coins must be covered by what the dex-drop pool keeps on the
/// airdrop source account.
pub fn check_claims_backed(
    grants: &[ClaimGrant],
    pool_remaining: &Amount,
) -> Result<Amount, GenesisError> {
    let claimable: Amount = grants.iter().map(|g| &g.claimable.amount).sum();
    if &claimable > pool_remaining {
        return Err(GenesisError::UnbackedClaims {
            claimable,
            available: pool_remaining.clone(),
        });
    }
    Ok(claimable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_types::AccountAddress;

    fn balance(address: &str, denom: &str, amount: u64) -> Balance {
        Balance::new(AccountAddress::new(address), Coin::new(denom, Amount::from(amount)))
    }

    fn components() -> SupplyComponents {
        SupplyComponents {
            dex_drop: Amount::from(50u64),
            boost_drop: Amount::from(50u64),
            foundation_residual: Amount::from(70u64),
            fixed_allocations: Amount::from(10u64),
            vesting_total: Amount::from(20u64),
        }
    }

    #[test]
    fn matching_supply_reconciles() {
        let balances = vec![
            balance("cre1a", "ucre", 120),
            balance("cre1b", "ucre", 80),
        ];
        let supply = reconcile(&balances, &components(), "ucre").unwrap();
        assert_eq!(supply, Coin::new("ucre", Amount::from(200u64)));
    }

    #[test]
    fn one_unit_off_is_fatal() {
        let balances = vec![balance("cre1a", "ucre", 199)];
        let err = reconcile(&balances, &components(), "ucre").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ConservationViolation);
        assert!(matches!(err, GenesisError::SupplyMismatch { .. }));
    }

    #[test]
    fn foreign_denom_is_fatal() {
        let balances = vec![balance("cre1a", "ucre", 200), balance("cre1b", "uatom", 1)];
        assert!(matches!(
            reconcile(&balances, &components(), "ucre"),
            Err(GenesisError::UnexpectedDenom { .. })
        ));
    }

    #[test]
    fn claims_must_be_backed() {
        let grant = ClaimGrant::new(1, "cre1a".into(), Coin::new("ucre", Amount::from(80u64)));
        let grants = vec![grant];
        assert_eq!(
            check_claims_backed(&grants, &Amount::from(80u64)).unwrap(),
            Amount::from(80u64)
        );
        assert!(matches!(
            check_claims_backed(&grants, &Amount::from(79u64)),
            Err(GenesisError::UnbackedClaims { .. })
        ));
    }
}
