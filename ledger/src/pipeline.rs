//! The preparation pipeline.
//!
//! ingest -> split -> vesting -> merge -> reconcile
//!
//! Every stage returns new values and the run stops at the first error, so
//! a `GenesisOutput` only exists once supply has reconciled.

use crate::airdrop::{extra_claim_grants, source_balance, split_recipients, Airdrop, ClaimGrant};
use crate::allocation::{fixed_allocation_balances, foundation_balance, foundation_residual};
use crate::balance::Balance;
use crate::error::GenesisError;
use crate::ingest::{read_recipients_file, RecipientRecord};
use crate::merge::{merge_balances, BalanceSource, GenesisAccount};
use crate::supply::{check_claims_backed, reconcile, SupplyComponents};
use crate::vesting::{build_vesting_accounts, VestingAccount};
use genesis_crypto::{blake2b_256, validate_account_address};
use genesis_types::{AccountAddress, Coin, GenesisPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything handed to the genesis document assembler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisOutput {
    pub airdrop: Airdrop,
    pub balances: Vec<Balance>,
    pub claim_grants: Vec<ClaimGrant>,
    pub vesting_accounts: Vec<VestingAccount>,
    pub accounts: Vec<GenesisAccount>,
    pub supply: Coin,
    pub components: SupplyComponents,
}

impl GenesisOutput {
    /// Blake2b-256 of the bincode encoding. Identical inputs give identical
    /// digests.
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        let bytes = bincode::serialize(self)?;
        Ok(blake2b_256(&bytes))
    }

    pub fn digest_hex(&self) -> Result<String, bincode::Error> {
        Ok(hex::encode(self.digest()?))
    }
}

/// Policy checks that run before any input is read.
pub fn preflight(policy: &GenesisPolicy) -> Result<(), GenesisError> {
    policy.validate()?;

    let prefix = &policy.account_prefix;
    let check = |label: &str, address: &AccountAddress| {
        validate_account_address(address, prefix)
            .map(|_| ())
            .map_err(|source| GenesisError::InvalidPolicyAddress {
                label: label.to_string(),
                source,
            })
    };

    check("airdrop source", &policy.airdrop.source_address)?;
    check("foundation", &policy.foundation.address)?;
    for allocation in &policy.fixed_allocations {
        check(&allocation.label, &allocation.address)?;
    }
    for claim in &policy.airdrop.extra_claims {
        check("extra claim recipient", &claim.recipient)?;
    }
    Ok(())
}

/// Run every stage over already-ingested records.
pub fn prepare_genesis(
    policy: &GenesisPolicy,
    recipients: &[RecipientRecord],
    vesting: &[RecipientRecord],
) -> Result<GenesisOutput, GenesisError> {
    preflight(policy)?;
    run_stages(policy, recipients, vesting)
}

/// Split through reconcile. `policy` must already have passed `preflight`.
fn run_stages(
    policy: &GenesisPolicy,
    recipients: &[RecipientRecord],
    vesting: &[RecipientRecord],
) -> Result<GenesisOutput, GenesisError> {
    let denom = &policy.bond_denom;
    let airdrop = Airdrop::from_policy(policy)?;

    let (split, source, pool_remaining, claim_grants) = {
        let _span = tracing::info_span!("split", airdrop_id = airdrop.id).entered();
        let split = split_recipients(recipients, &airdrop, policy)?;
        let (source, pool_remaining) = source_balance(policy, &split.total_initial)?;

        let mut grants = split.grants.clone();
        grants.extend(extra_claim_grants(&airdrop, policy));
        let claimable = check_claims_backed(&grants, &pool_remaining)?;
        tracing::info!(
            grants = grants.len(),
            claimable = %claimable,
            source_balance = %source.coins,
            "claim grants backed"
        );
        (split, source, pool_remaining, grants)
    };
    tracing::debug!(pool_remaining = %pool_remaining, "dex-drop pool after genesis credit");

    let vesting_set = {
        let _span = tracing::info_span!("vesting").entered();
        build_vesting_accounts(vesting, policy)?
    };

    let (fixed_balances, fixed_total) = fixed_allocation_balances(policy);
    let residual = foundation_residual(policy, &fixed_total, &vesting_set.total)?;
    let foundation = [foundation_balance(policy, residual.clone())];

    let merged = {
        let _span = tracing::info_span!("merge").entered();
        let source = [source];
        merge_balances(
            &[
                BalanceSource::new("airdrop recipients", &split.balances),
                BalanceSource::new("airdrop source", &source),
                BalanceSource::new("fixed allocations", &fixed_balances),
                BalanceSource::new("foundation", &foundation),
            ],
            &policy.foundation.address,
            &vesting_set,
            &policy.account_prefix,
        )?
    };

    let components = SupplyComponents {
        dex_drop: policy.airdrop.dex_drop_supply.clone(),
        boost_drop: policy.airdrop.boost_drop_supply.clone(),
        foundation_residual: residual,
        fixed_allocations: fixed_total,
        vesting_total: vesting_set.total.clone(),
    };
    let supply = {
        let _span = tracing::info_span!("reconcile").entered();
        reconcile(&merged.balances, &components, denom)?
    };

    Ok(GenesisOutput {
        airdrop,
        balances: merged.balances,
        claim_grants,
        vesting_accounts: vesting_set.accounts,
        accounts: merged.accounts,
        supply,
        components,
    })
}

/// Read the snapshot files, then run the pipeline.
///
/// Without a vesting file no vesting grants are made.
pub fn prepare_from_files(
    policy: &GenesisPolicy,
    airdrop_csv: &Path,
    vesting_csv: Option<&Path>,
) -> Result<GenesisOutput, GenesisError> {
    preflight(policy)?;
    let prefix = &policy.account_prefix;

    let recipients = read_recipients_file(airdrop_csv, prefix)?;
    let vesting = match vesting_csv {
        Some(path) => read_recipients_file(path, prefix)?,
        None => {
            tracing::info!("no vesting file given, skipping vesting grants");
            Vec::new()
        }
    };

    run_stages(policy, &recipients, &vesting)
}
