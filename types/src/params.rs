//! Genesis policy: every constant the preparation run depends on.
//!
//! A `GenesisPolicy` is built once (from a preset or a TOML table) and passed
//! by reference into every pipeline stage. No stage reads ambient state.

use crate::address::AccountAddress;
use crate::amount::Amount;
use crate::condition::ConditionType;
use crate::dec::{sums_to_one, Dec};
use crate::error::TypesError;
use crate::network::NetworkType;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// One year of 365 days, in seconds.
pub const YEAR_SECS: u64 = 60 * 60 * 24 * 365;

/// All policy inputs of a genesis preparation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPolicy {
    /// Network time origin, RFC 3339.
    pub genesis_time: String,
    /// Canonical bech32 account prefix (e.g. `cre`).
    pub account_prefix: String,
    /// Canonical bond denomination (e.g. `ucre`).
    pub bond_denom: String,
    pub airdrop: AirdropPolicy,
    pub vesting: VestingPolicy,
    pub foundation: FoundationPolicy,
    /// Fixed liquid allocations funded out of the foundation allocation
    /// (validator bonuses and similar).
    #[serde(default)]
    pub fixed_allocations: Vec<FixedAllocation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropPolicy {
    pub id: u64,
    /// Pool account holding the undistributed airdrop supply.
    pub source_address: AccountAddress,
    /// `1 / divisor` of every entitlement is credited at genesis.
    pub immediate_release_divisor: u64,
    pub conditions: Vec<ConditionType>,
    /// Claim window length in calendar months from genesis.
    pub duration_months: u32,
    /// Endowment backing the snapshot entitlements.
    pub dex_drop_supply: Amount,
    /// Endowment parked on the source account for later boost rounds.
    pub boost_drop_supply: Amount,
    /// Claim grants configured directly rather than read from the snapshot.
    #[serde(default)]
    pub extra_claims: Vec<ClaimAllocation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAllocation {
    pub recipient: AccountAddress,
    pub amount: Amount,
}

/// Three-year periodic vesting: one yearly cliff followed by monthly unlocks
/// during years two and three.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingPolicy {
    pub first_year_cliff_secs: u64,
    pub monthly_cliff_secs: u64,
    /// Share of the grant unlocked in years one, two and three.
    pub year_ratios: [Dec; 3],
    pub monthly_periods_per_year: u32,
    /// Period count every synthesized schedule must have.
    pub expected_periods: usize,
}

impl VestingPolicy {
    /// `C1 + 2 · periods_per_year · Cm`, or `None` on overflow.
    pub fn expected_total_length(&self) -> Option<u64> {
        let monthly = u64::from(self.monthly_periods_per_year)
            .checked_mul(2)?
            .checked_mul(self.monthly_cliff_secs)?;
        self.first_year_cliff_secs.checked_add(monthly)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundationPolicy {
    pub address: AccountAddress,
    /// Total foundation allocation before fixed allocations and vesting
    /// grants are carved out of it.
    pub allocation: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAllocation {
    pub label: String,
    pub address: AccountAddress,
    pub amount: Amount,
}

impl GenesisPolicy {
    pub fn for_network(network: NetworkType) -> Self {
        match network {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
        }
    }

    pub fn genesis_timestamp(&self) -> Result<Timestamp, TypesError> {
        Timestamp::parse_rfc3339(&self.genesis_time)
    }

    /// Structural checks that do not need address decoding.
    pub fn validate(&self) -> Result<(), TypesError> {
        let fail = |msg: String| Err(TypesError::InvalidPolicy(msg));

        self.genesis_timestamp()?;
        if self.account_prefix.is_empty() {
            return fail("account prefix is empty".into());
        }
        if self.bond_denom.is_empty() {
            return fail("bond denom is empty".into());
        }
        if self.airdrop.immediate_release_divisor == 0 {
            return fail("airdrop immediate release divisor must be positive".into());
        }
        if self.airdrop.duration_months == 0 {
            return fail("airdrop duration must be at least one month".into());
        }

        let vesting = &self.vesting;
        if vesting.first_year_cliff_secs == 0 || vesting.monthly_cliff_secs == 0 {
            return fail("vesting cliff lengths must be positive".into());
        }
        if vesting.monthly_periods_per_year == 0 {
            return fail("vesting needs at least one monthly period per year".into());
        }
        if !sums_to_one(&vesting.year_ratios) {
            return fail(format!(
                "vesting year ratios {}, {}, {} do not sum to 1",
                vesting.year_ratios[0], vesting.year_ratios[1], vesting.year_ratios[2]
            ));
        }
        let derived = 1 + 2 * vesting.monthly_periods_per_year as usize;
        if vesting.expected_periods != derived {
            return fail(format!(
                "expected {} vesting periods but the schedule shape yields {derived}",
                vesting.expected_periods
            ));
        }
        if vesting.expected_total_length().is_none() {
            return fail("vesting total length overflows".into());
        }
        Ok(())
    }

    /// Mainnet launch policy.
    pub fn mainnet() -> Self {
        let validators = [
            "cre17muws0zgrd0vzh37guea7960ym7aqf2j8c6sn6",
            "cre1ls9w867xu0q5zjze5vrakfa2zluahtv4huwunw",
            "cre10rdgqczxyp69x9llq62cc3xs4w8w0k7ph7x2l2",
            "cre1dad8evf6vw72seljuzhjgurq48egaqfn0cq72x",
            "cre1zuucyy5v49lwnrdupqqafqdu29qy6wgnlewe3k",
            "cre1qvdyzetkqq6rt4xu234xpvee5wt45a75pl2jyn",
            "cre18zvtvhzrqq5ny2jpmlc6new9k4c4uzzhclcxvp",
            "cre1pxexdsms050v35zu0vc07dk4ml647lsrsafm8z",
        ];

        Self {
            genesis_time: "2022-04-13T00:00:00Z".into(),
            account_prefix: "cre".into(),
            bond_denom: "ucre".into(),
            airdrop: AirdropPolicy {
                id: 1,
                source_address: "cre1rq9dzurree0ruj4xvuss33ysfus3lkneg3jnfdsy4ah8gxjta3mqlr2sax"
                    .into(),
                immediate_release_divisor: 5, // 20% at genesis
                conditions: ConditionType::ALL.to_vec(),
                duration_months: 6,
                dex_drop_supply: Amount::from(50_000_000_000_000u64), // 50mil
                boost_drop_supply: Amount::from(50_000_000_000_000u64), // 50mil
                extra_claims: Vec::new(),
            },
            vesting: default_vesting(),
            foundation: FoundationPolicy {
                address: "cre1u9jxn6l7seq5jjej4w6etpdxufphwfuunljr4e".into(), // multisig
                allocation: Amount::from(100_000_000_000_000u64), // 100mil
            },
            fixed_allocations: validator_bonuses(&validators, 1_000_000),
        }
    }

    /// Public testnet policy.
    ///
    /// The foundation allocation is sized so the foundation keeps a full
    /// 100mil after the helper, faucet and validator accounts are funded.
    pub fn testnet() -> Self {
        let validators = [
            "cre1s96rxwvhrv4zn39v8haulhexflvjjp50sq943z",
            "cre1jwjph8k3933uuejyhvnptmnxf4afve87ccnfhu",
            "cre1ckn4wlv5repm4lj62y9nwyvyvk63ydrxzl5yh2",
            "cre1g7lz8463vkmdjtzj2a8s4lwz2xksfnk399803r",
            "cre1fksh8k3dhggajvm2mm433c2dr0jeq8ku3qe04z",
            "cre1scdg75uqv3j5kcsh089ksqmyx590mjz43pewg6",
            "cre10tzu9srek0masgefjsgqpyyvm5jywgwwsnnp5e",
            "cre1x5wgh6vwye60wv3dtshs9dmqggwfx2ldhgluez",
        ];

        let mut fixed_allocations = vec![
            FixedAllocation {
                label: "multisig-helper".into(),
                address: "cre1arpj30n7z09hk27uzc54eg0nk8tzjk68pa6sfp".into(),
                amount: Amount::from(1_000_000u64),
            },
            FixedAllocation {
                label: "faucet".into(),
                address: "cre1lp3kkuasafcqn8ryp4k6tm393x0aasfpwnt9d4".into(),
                amount: Amount::from(1_000_000_000_000u64),
            },
        ];
        fixed_allocations.extend(validator_bonuses(&validators, 1_000_000));

        let carved_out: Amount = fixed_allocations.iter().map(|a| &a.amount).sum();
        let foundation_allocation = Amount::from(100_000_000_000_000u64) + carved_out;

        Self {
            genesis_time: "2022-03-18T14:00:00Z".into(),
            account_prefix: "cre".into(),
            bond_denom: "ucre".into(),
            airdrop: AirdropPolicy {
                id: 1,
                source_address: "cre1rq9dzurree0ruj4xvuss33ysfus3lkneg3jnfdsy4ah8gxjta3mqlr2sax"
                    .into(),
                immediate_release_divisor: 5,
                conditions: ConditionType::ALL.to_vec(),
                duration_months: 6,
                dex_drop_supply: Amount::from(50_000_000_000_000u64),
                boost_drop_supply: Amount::from(50_000_000_000_000u64),
                extra_claims: vec![
                    ClaimAllocation {
                        recipient: "cre1xs32ega2zw5hcn8wpgnxla8sueuqehxxphkped".into(),
                        amount: Amount::from(50_000_000_000u64),
                    },
                    ClaimAllocation {
                        recipient: "cre1pckvh2n0hngd5gt7lp2xwk3hqdrdzcvfnhxqc8".into(),
                        amount: Amount::from(66_666_666_667u64),
                    },
                ],
            },
            vesting: default_vesting(),
            foundation: FoundationPolicy {
                address: "cre1y4a8y4005ch3cx23f8alxpykuvtwh5stfcgutt".into(),
                allocation: foundation_allocation,
            },
            fixed_allocations,
        }
    }
}

fn default_vesting() -> VestingPolicy {
    VestingPolicy {
        first_year_cliff_secs: YEAR_SECS,   // 31,536,000
        monthly_cliff_secs: YEAR_SECS / 12, // 2,628,000
        year_ratios: [Dec::from_percent(34), Dec::from_percent(34), Dec::from_percent(32)],
        monthly_periods_per_year: 12,
        expected_periods: 25,
    }
}

fn validator_bonuses(addresses: &[&str], amount: u64) -> Vec<FixedAllocation> {
    addresses
        .iter()
        .enumerate()
        .map(|(i, addr)| FixedAllocation {
            label: format!("validator-{}", i + 1),
            address: AccountAddress::new(*addr),
            amount: Amount::from(amount),
        })
        .collect()
}

/// Default is the mainnet policy.
impl Default for GenesisPolicy {
    fn default() -> Self {
        Self::mainnet()
    }
}
