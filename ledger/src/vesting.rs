//! Periodic vesting schedules.
//!
//! A grant of `T` unlocks in `1 + 2n` periods, where `n` is the number of
//! monthly periods per year:
//!
//! | period       | length | amount                       |
//! |--------------|--------|------------------------------|
//! | 1            | `C1`   | `floor(T · r1) + crumb`      |
//! | 2 ..= n+1    | `Cm`   | `floor(T · r2 / n)`          |
//! | n+2 ..= 2n+1 | `Cm`   | `floor(T · r3 / n)`          |
//!
//! `crumb` is whatever the three floors dropped, so the periods always sum
//! back to `T`. A period unlocks once the time elapsed since the start
//! reaches the cumulative length through that period.

use crate::error::GenesisError;
use crate::ingest::RecipientRecord;
use genesis_types::{AccountAddress, Amount, Coin, GenesisPolicy, Timestamp, VestingPolicy};
use genesis_utils::format_duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub length_secs: u64,
    pub amount: Coin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingAccount {
    pub address: AccountAddress,
    pub original_vesting: Coin,
    pub start_time: Timestamp,
    pub periods: Vec<Period>,
}

impl VestingAccount {
    /// Sum of all period lengths, or `None` on overflow.
    pub fn total_length(&self) -> Option<u64> {
        self.periods
            .iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.length_secs))
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.start_time.add_secs(self.total_length()?).ok()
    }

    /// Amount unlocked at `time`.
    pub fn vested_at(&self, time: Timestamp) -> Amount {
        let elapsed = i128::from(time.as_secs()) - i128::from(self.start_time.as_secs());
        let mut offset = 0i128;
        let mut vested = Amount::zero();
        for period in &self.periods {
            offset += i128::from(period.length_secs);
            if offset > elapsed {
                break;
            }
            vested += &period.amount.amount;
        }
        vested
    }

    /// Amount still locked at `time`.
    pub fn locked_at(&self, time: Timestamp) -> Amount {
        self.original_vesting
            .amount
            .checked_sub(&self.vested_at(time))
            .unwrap_or_default()
    }

    /// Structural checks a genesis vesting account must pass.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let invalid = |reason: String| GenesisError::InvalidAccount {
            address: self.address.clone(),
            reason,
        };

        if self.periods.is_empty() {
            return Err(invalid("vesting account has no periods".into()));
        }
        if let Some(i) = self.periods.iter().position(|p| p.length_secs == 0) {
            return Err(invalid(format!("period {i} has zero length")));
        }
        if let Some(p) = self
            .periods
            .iter()
            .find(|p| p.amount.denom != self.original_vesting.denom)
        {
            return Err(invalid(format!(
                "period denom {} differs from original vesting denom {}",
                p.amount.denom, self.original_vesting.denom
            )));
        }
        let end = self
            .end_time()
            .ok_or_else(|| invalid("vesting end time overflows".into()))?;
        if end <= self.start_time {
            return Err(invalid("vesting start time must be before end time".into()));
        }
        let released: Amount = self.periods.iter().map(|p| &p.amount.amount).sum();
        if released != self.original_vesting.amount {
            return Err(invalid(format!(
                "periods release {released}, original vesting is {}",
                self.original_vesting.amount
            )));
        }
        Ok(())
    }
}

/// Synthesize the unlock schedule for a grant of `total`.
pub fn calc_periods(
    address: &AccountAddress,
    total: &Amount,
    vesting: &VestingPolicy,
    denom: &str,
) -> Result<Vec<Period>, GenesisError> {
    let per_year = u64::from(vesting.monthly_periods_per_year);
    let [r1, r2, r3] = &vesting.year_ratios;
    let zero_divisor = || {
        GenesisError::InvalidPolicy(genesis_types::TypesError::InvalidPolicy(
            "vesting needs at least one monthly period per year".into(),
        ))
    };

    let first_year = r1.mul_floor(total);
    let second_monthly = r2.mul_floor_div(total, per_year).ok_or_else(zero_divisor)?;
    let third_monthly = r3.mul_floor_div(total, per_year).ok_or_else(zero_divisor)?;

    let monthly_total = &second_monthly.mul_u64(per_year) + &third_monthly.mul_u64(per_year);
    let scheduled = &first_year + &monthly_total;
    let crumb = total
        .checked_sub(&scheduled)
        .ok_or_else(|| GenesisError::VestingAmount {
            address: address.clone(),
            expected: total.clone(),
            computed: scheduled.clone(),
        })?;
    let first_year = &first_year + &crumb;

    let mut periods = Vec::with_capacity(vesting.expected_periods);
    periods.push(Period {
        length_secs: vesting.first_year_cliff_secs,
        amount: Coin::new(denom, first_year),
    });
    for monthly in [&second_monthly, &third_monthly] {
        for _ in 0..per_year {
            periods.push(Period {
                length_secs: vesting.monthly_cliff_secs,
                amount: Coin::new(denom, monthly.clone()),
            });
        }
    }

    check_schedule(address, total, vesting, &periods)?;
    Ok(periods)
}

fn check_schedule(
    address: &AccountAddress,
    total: &Amount,
    vesting: &VestingPolicy,
    periods: &[Period],
) -> Result<(), GenesisError> {
    if periods.len() != vesting.expected_periods {
        return Err(GenesisError::VestingPeriodCount {
            address: address.clone(),
            expected: vesting.expected_periods,
            computed: periods.len(),
        });
    }

    let overflow = |which| GenesisError::VestingLengthOverflow {
        address: address.clone(),
        which,
    };
    let expected_length = vesting
        .expected_total_length()
        .ok_or_else(|| overflow("expected"))?;
    let length = periods
        .iter()
        .try_fold(0u64, |acc, p| acc.checked_add(p.length_secs))
        .ok_or_else(|| overflow("computed"))?;
    if length != expected_length {
        return Err(GenesisError::VestingLength {
            address: address.clone(),
            expected: expected_length,
            computed: length,
        });
    }

    let released: Amount = periods.iter().map(|p| &p.amount.amount).sum();
    if &released != total {
        return Err(GenesisError::VestingAmount {
            address: address.clone(),
            expected: total.clone(),
            computed: released,
        });
    }
    Ok(())
}

/// Vesting accounts in input order, with their combined grant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VestingSet {
    pub accounts: Vec<VestingAccount>,
    pub total: Amount,
}

impl VestingSet {
    pub fn get(&self, address: &AccountAddress) -> Option<&VestingAccount> {
        self.accounts.iter().find(|a| &a.address == address)
    }
}

/// Build one vesting account per non-zero grant, all starting at genesis.
pub fn build_vesting_accounts(
    records: &[RecipientRecord],
    policy: &GenesisPolicy,
) -> Result<VestingSet, GenesisError> {
    let start_time = policy.genesis_timestamp()?;
    let mut seen: HashMap<&AccountAddress, usize> = HashMap::new();
    let mut set = VestingSet::default();

    for record in records.iter().filter(|r| !r.amount.is_zero()) {
        if let Some(first) = seen.insert(&record.address, record.row_index) {
            return Err(GenesisError::DuplicateAddress {
                address: record.address.clone(),
                first: format!("vesting row {first}"),
                second: format!("vesting row {}", record.row_index),
            });
        }

        let periods = calc_periods(
            &record.address,
            &record.amount,
            &policy.vesting,
            &policy.bond_denom,
        )?;
        tracing::debug!(
            address = %record.address,
            amount = %record.amount,
            first_period = %periods[0].amount,
            "vesting schedule synthesized"
        );

        set.total += &record.amount;
        set.accounts.push(VestingAccount {
            address: record.address.clone(),
            original_vesting: Coin::new(&policy.bond_denom, record.amount.clone()),
            start_time,
            periods,
        });
    }

    tracing::info!(
        accounts = set.accounts.len(),
        total = %set.total,
        first_cliff = %format_duration(policy.vesting.first_year_cliff_secs),
        monthly_cliff = %format_duration(policy.vesting.monthly_cliff_secs),
        "vesting accounts built"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 24 * 60 * 60;

    fn grant(total: u64) -> VestingAccount {
        let policy = GenesisPolicy::mainnet();
        let address = AccountAddress::new("cre1test");
        let total = Amount::from(total);
        let periods = calc_periods(&address, &total, &policy.vesting, "ucre").unwrap();
        VestingAccount {
            address,
            original_vesting: Coin::new("ucre", total),
            start_time: policy.genesis_timestamp().unwrap(),
            periods,
        }
    }

    fn at(account: &VestingAccount, offset_secs: u64) -> Timestamp {
        account.start_time.add_secs(offset_secs).unwrap()
    }

    #[test]
    fn hundred_million_schedule() {
        let account = grant(100_000_000);
        assert_eq!(account.periods.len(), 25);
        assert_eq!(account.periods[0].amount.amount, Amount::from(34_000_012u64));
        assert_eq!(account.periods[1].amount.amount, Amount::from(2_833_333u64));
        assert_eq!(account.periods[13].amount.amount, Amount::from(2_666_666u64));
        assert_eq!(account.total_length(), Some(94_608_000));
        account.validate().unwrap();
    }

    #[test]
    fn lock_evaluation_over_three_years() {
        let account = grant(100_000_000);
        let locked = |secs| account.locked_at(at(&account, secs));

        assert_eq!(account.locked_at(account.start_time), Amount::from(100_000_000u64));
        assert_eq!(locked(364 * DAY), Amount::from(100_000_000u64));
        assert_eq!(locked(365 * DAY), Amount::from(65_999_988u64));
        assert_eq!(
            account.vested_at(at(&account, 365 * DAY)),
            Amount::from(34_000_012u64)
        );
        assert_eq!(locked(396 * DAY), Amount::from(65_999_988u64 - 2_833_333));
        assert_eq!(locked(3 * 365 * DAY - 1), Amount::from(2_666_666u64));
        assert!(locked(3 * 365 * DAY).is_zero());
        assert_eq!(
            account.vested_at(at(&account, 3 * 365 * DAY)),
            Amount::from(100_000_000u64)
        );
    }

    #[test]
    fn before_start_everything_is_locked() {
        let account = grant(1_000);
        let before = Timestamp::new(account.start_time.as_secs() - 10);
        assert_eq!(account.locked_at(before), Amount::from(1_000u64));
    }

    #[test]
    fn small_grants_fold_into_first_period() {
        let account = grant(11);
        // floor(11 * 0.34) = 3, floor(11 * 0.34 / 12) = 0, floor(11 * 0.32 / 12) = 0
        assert_eq!(account.periods[0].amount.amount, Amount::from(11u64));
        assert!(account.periods[1..].iter().all(|p| p.amount.amount.is_zero()));
        account.validate().unwrap();
    }

    #[test]
    fn drifted_length_is_reported() {
        let mut vesting = GenesisPolicy::mainnet().vesting;
        vesting.expected_periods = 24;
        let err = calc_periods(&"cre1x".into(), &Amount::from(100u64), &vesting, "ucre")
            .unwrap_err();
        assert!(matches!(
            err,
            GenesisError::VestingPeriodCount {
                expected: 24,
                computed: 25,
                ..
            }
        ));
    }

    #[test]
    fn overflowing_length_is_reported_as_overflow() {
        let mut vesting = GenesisPolicy::mainnet().vesting;
        vesting.monthly_cliff_secs = u64::MAX / 4;
        let err = calc_periods(&"cre1x".into(), &Amount::from(100u64), &vesting, "ucre")
            .unwrap_err();
        assert!(matches!(
            err,
            GenesisError::VestingLengthOverflow {
                which: "expected",
                ..
            }
        ));
        assert_eq!(err.kind(), crate::error::ErrorKind::PolicyDefect);
    }

    #[test]
    fn over_unity_ratios_are_reported() {
        let mut vesting = GenesisPolicy::mainnet().vesting;
        vesting.year_ratios[0] = "0.9".parse().unwrap();
        let err = calc_periods(&"cre1x".into(), &Amount::from(100u64), &vesting, "ucre")
            .unwrap_err();
        assert!(matches!(err, GenesisError::VestingAmount { .. }));
    }

    #[test]
    fn validate_rejects_broken_accounts() {
        let mut account = grant(1_000);
        account.periods[3].length_secs = 0;
        assert!(account.validate().is_err());

        let mut account = grant(1_000);
        account.original_vesting.amount = Amount::from(999u64);
        assert!(account.validate().is_err());
    }

    #[test]
    fn duplicate_vesting_rows_rejected() {
        let policy = GenesisPolicy::mainnet();
        let rows = vec![
            RecipientRecord {
                address: "cre1dup".into(),
                amount: Amount::from(10u64),
                row_index: 1,
            },
            RecipientRecord {
                address: "cre1dup".into(),
                amount: Amount::from(20u64),
                row_index: 2,
            },
        ];
        let err = build_vesting_accounts(&rows, &policy).unwrap_err();
        assert!(matches!(err, GenesisError::DuplicateAddress { .. }));
    }

    #[test]
    fn set_totals_grants() {
        let policy = GenesisPolicy::mainnet();
        let rows: Vec<_> = ["cre1a", "cre1b"]
            .iter()
            .enumerate()
            .map(|(i, a)| RecipientRecord {
                address: (*a).into(),
                amount: Amount::from(100_000_000u64),
                row_index: i + 1,
            })
            .collect();
        let set = build_vesting_accounts(&rows, &policy).unwrap();
        assert_eq!(set.total, Amount::from(200_000_000u64));
        assert_eq!(set.accounts.len(), 2);
        assert!(set.get(&"cre1b".into()).is_some());
    }
}
