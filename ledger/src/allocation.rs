//! Fixed policy allocations and the foundation residual.

use crate::balance::Balance;
use crate::error::GenesisError;
use genesis_types::{Amount, Coin, GenesisPolicy};

/// Balances for every fixed allocation, in policy order, with their total.
pub fn fixed_allocation_balances(policy: &GenesisPolicy) -> (Vec<Balance>, Amount) {
    let balances: Vec<Balance> = policy
        .fixed_allocations
        .iter()
        .map(|a| {
            tracing::debug!(
                label = %a.label,
                address = %a.address,
                amount = %a.amount,
                "fixed allocation"
            );
            Balance::new(
                a.address.clone(),
                Coin::new(&policy.bond_denom, a.amount.clone()),
            )
        })
        .collect();
    let total = policy.fixed_allocations.iter().map(|a| &a.amount).sum();
    (balances, total)
}

/// What the foundation keeps after funding fixed allocations and vesting
/// grants out of its allocation.
pub fn foundation_residual(
    policy: &GenesisPolicy,
    fixed_total: &Amount,
    vesting_total: &Amount,
) -> Result<Amount, GenesisError> {
    let allocation = &policy.foundation.allocation;
    let needed = fixed_total + vesting_total;
    allocation
        .checked_sub(&needed)
        .ok_or_else(|| GenesisError::InsufficientFunds {
            pool: "foundation allocation".into(),
            needed,
            available: allocation.clone(),
        })
}

/// The foundation's own liquid balance.
pub fn foundation_balance(policy: &GenesisPolicy, residual: Amount) -> Balance {
    Balance::new(
        policy.foundation.address.clone(),
        Coin::new(&policy.bond_denom, residual),
    )
}
