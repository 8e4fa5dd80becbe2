//! Airdrop splitting.
//!
//! Each entitlement `A` is split into `floor(A / divisor)`, credited as a
//! genesis balance, and the remainder, held in a claim grant until the
//! recipient completes the airdrop conditions. The two parts always sum
//! to `A`.

use crate::balance::Balance;
use crate::error::GenesisError;
use crate::ingest::RecipientRecord;
use genesis_types::{AccountAddress, Amount, Coin, ConditionType, GenesisPolicy, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The airdrop definition referenced by every claim grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airdrop {
    pub id: u64,
    pub source_address: AccountAddress,
    pub conditions: Vec<ConditionType>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl Airdrop {
    /// The airdrop opens at genesis and runs for the configured number of
    /// calendar months.
    pub fn from_policy(policy: &GenesisPolicy) -> Result<Self, GenesisError> {
        let start_time = policy.genesis_timestamp()?;
        let end_time = start_time.add_months(policy.airdrop.duration_months)?;
        Ok(Self {
            id: policy.airdrop.id,
            source_address: policy.airdrop.source_address.clone(),
            conditions: policy.airdrop.conditions.clone(),
            start_time,
            end_time,
        })
    }
}

/// Deferred part of an entitlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimGrant {
    pub airdrop_id: u64,
    pub recipient: AccountAddress,
    pub initial_claimable: Coin,
    pub claimable: Coin,
    pub claimed_conditions: BTreeSet<ConditionType>,
}

impl ClaimGrant {
    pub fn new(airdrop_id: u64, recipient: AccountAddress, amount: Coin) -> Self {
        Self {
            airdrop_id,
            recipient,
            initial_claimable: amount.clone(),
            claimable: amount,
            claimed_conditions: BTreeSet::new(),
        }
    }
}

/// Output of splitting every snapshot entitlement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AirdropSplit {
    pub balances: Vec<Balance>,
    pub grants: Vec<ClaimGrant>,
    pub total_initial: Amount,
    pub total_deferred: Amount,
}

/// Split one entitlement into `(initial, deferred)`.
pub fn split_entitlement(amount: &Amount, divisor: u64) -> Result<(Amount, Amount), GenesisError> {
    let initial = amount.div_floor_u64(divisor).ok_or_else(|| {
        GenesisError::InvalidPolicy(genesis_types::TypesError::InvalidPolicy(
            "airdrop immediate release divisor must be positive".into(),
        ))
    })?;
    let deferred = amount
        .checked_sub(&initial)
        .ok_or_else(|| GenesisError::SplitExceedsEntitlement {
            entitlement: amount.clone(),
            initial: initial.clone(),
        })?;
    Ok((initial, deferred))
}

/// Split every record, preserving input order.
pub fn split_recipients(
    records: &[RecipientRecord],
    airdrop: &Airdrop,
    policy: &GenesisPolicy,
) -> Result<AirdropSplit, GenesisError> {
    let denom = &policy.bond_denom;
    let divisor = policy.airdrop.immediate_release_divisor;
    let mut split = AirdropSplit::default();

    for record in records.iter().filter(|r| !r.amount.is_zero()) {
        let (initial, deferred) = split_entitlement(&record.amount, divisor)?;
        tracing::debug!(
            recipient = %record.address,
            initial = %initial,
            deferred = %deferred,
            "split entitlement"
        );

        split.total_initial += &initial;
        split.total_deferred += &deferred;
        split
            .balances
            .push(Balance::new(record.address.clone(), Coin::new(denom, initial)));
        split.grants.push(ClaimGrant::new(
            airdrop.id,
            record.address.clone(),
            Coin::new(denom, deferred),
        ));
    }

    tracing::info!(
        recipients = split.grants.len(),
        total_initial = %split.total_initial,
        total_deferred = %split.total_deferred,
        "airdrop split"
    );
    Ok(split)
}

/// Grants configured in the policy rather than read from the snapshot.
pub fn extra_claim_grants(airdrop: &Airdrop, policy: &GenesisPolicy) -> Vec<ClaimGrant> {
    policy
        .airdrop
        .extra_claims
        .iter()
        .filter(|c| !c.amount.is_zero())
        .map(|c| {
            ClaimGrant::new(
                airdrop.id,
                c.recipient.clone(),
                Coin::new(&policy.bond_denom, c.amount.clone()),
            )
        })
        .collect()
}

/// The airdrop source account: the dex-drop pool less everything credited
/// at genesis, plus the boost-drop pool.
pub fn source_balance(
    policy: &GenesisPolicy,
    total_initial: &Amount,
) -> Result<(Balance, Amount), GenesisError> {
    let dex_drop = &policy.airdrop.dex_drop_supply;
    let remaining = dex_drop
        .checked_sub(total_initial)
        .ok_or_else(|| GenesisError::InsufficientFunds {
            pool: "dex-drop supply".into(),
            needed: total_initial.clone(),
            available: dex_drop.clone(),
        })?;
    let amount = &remaining + &policy.airdrop.boost_drop_supply;
    let balance = Balance::new(
        policy.airdrop.source_address.clone(),
        Coin::new(&policy.bond_denom, amount),
    );
    Ok((balance, remaining))
}
