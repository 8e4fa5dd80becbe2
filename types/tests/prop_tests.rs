use proptest::prelude::*;

use genesis_types::{Amount, Coin, Coins, Dec};

proptest! {
    /// Any run of digits parses to the integer it spells.
    #[test]
    fn amount_parse_matches_u128(v in any::<u128>()) {
        let parsed = Amount::parse(&v.to_string()).unwrap();
        prop_assert_eq!(parsed, Amount::from(v));
    }

    /// Checked subtraction either underflows or undoes addition exactly.
    #[test]
    fn amount_sub_undoes_add(a in any::<u64>(), b in any::<u64>()) {
        let sum = Amount::from(a) + Amount::from(b);
        prop_assert_eq!(sum.checked_sub(&Amount::from(b)), Some(Amount::from(a)));
        prop_assert_eq!(
            Amount::from(a).checked_sub(&Amount::from(b)).is_some(),
            a >= b
        );
    }

    /// `mul_floor` by a percentage agrees with integer arithmetic.
    #[test]
    fn dec_percent_floor(total in any::<u64>(), pct in 0u64..=100) {
        let expected = (total as u128) * (pct as u128) / 100;
        prop_assert_eq!(
            Dec::from_percent(pct).mul_floor(&Amount::from(total)),
            Amount::from(expected)
        );
    }

    /// `mul_floor_div` is the single floor of the exact quotient.
    #[test]
    fn dec_floor_div_is_single_floor(total in any::<u64>(), pct in 0u64..=100, n in 1u64..1000) {
        let expected = (total as u128) * (pct as u128) / (100 * n as u128);
        prop_assert_eq!(
            Dec::from_percent(pct).mul_floor_div(&Amount::from(total), n),
            Some(Amount::from(expected))
        );
    }

    /// Coin sets hold the sum of everything added per denom.
    #[test]
    fn coins_accumulate(values in prop::collection::vec(0u64..1_000_000, 0..20)) {
        let mut coins = Coins::new();
        for v in &values {
            coins.add(&Coin::new("ucre", Amount::from(*v)));
        }
        let total: u128 = values.iter().map(|v| *v as u128).sum();
        prop_assert_eq!(coins.amount_of("ucre"), Amount::from(total));
        prop_assert_eq!(coins.denoms().next().is_none(), total == 0);
    }
}
