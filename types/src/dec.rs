//! Exact fixed-point decimals for policy ratios.
//!
//! A `Dec` stores `value * 10^18` as an unbounded integer, so ratios such as
//! `0.34` are represented exactly and products with amounts truncate the same
//! way on every machine.

use crate::amount::Amount;
use crate::error::TypesError;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Number of fractional decimal digits carried by [`Dec`].
pub const DEC_PRECISION: usize = 18;

fn precision_multiplier() -> BigUint {
    BigUint::from(10u32).pow(DEC_PRECISION as u32)
}

/// A non-negative decimal with 18 fractional digits.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec {
    raw: BigUint,
}

impl Dec {
    pub fn zero() -> Self {
        Self {
            raw: BigUint::zero(),
        }
    }

    pub fn one() -> Self {
        Self {
            raw: precision_multiplier(),
        }
    }

    /// `percent / 100`.
    pub fn from_percent(percent: u64) -> Self {
        Self {
            raw: precision_multiplier() / 100u32 * percent,
        }
    }

    /// `floor(amount * self)`.
    pub fn mul_floor(&self, amount: &Amount) -> Amount {
        Amount::new(amount.raw() * &self.raw / precision_multiplier())
    }

    /// `floor(amount * self / divisor)`, computed without intermediate rounding.
    ///
    /// Returns `None` when `divisor` is zero.
    pub fn mul_floor_div(&self, amount: &Amount, divisor: u64) -> Option<Amount> {
        if divisor == 0 {
            return None;
        }
        let denominator = precision_multiplier() * divisor;
        Some(Amount::new(amount.raw() * &self.raw / denominator))
    }
}

impl Add for Dec {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            raw: self.raw + rhs.raw,
        }
    }
}

impl FromStr for Dec {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypesError::InvalidDecimal {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() {
            return Err(invalid("missing integer part"));
        }
        if s.contains('.') && frac_part.is_empty() {
            return Err(invalid("missing fractional digits"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected unsigned base-10 digits"));
        }
        if frac_part.len() > DEC_PRECISION {
            return Err(invalid("more than 18 fractional digits"));
        }

        let padded = format!("{int_part}{frac_part:0<width$}", width = DEC_PRECISION);
        let raw = BigUint::parse_bytes(padded.as_bytes(), 10)
            .ok_or_else(|| invalid("expected unsigned base-10 digits"))?;
        Ok(Self { raw })
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let multiplier = precision_multiplier();
        let int_part = &self.raw / &multiplier;
        let frac_part = &self.raw % &multiplier;
        write!(f, "{int_part}.{frac_part:0>width$}", width = DEC_PRECISION)
    }
}

impl Default for Dec {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct DecVisitor;

impl<'de> Visitor<'de> for DecVisitor {
    type Value = Dec;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string such as \"0.34\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Dec, E> {
        Dec::from_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DecVisitor)
    }
}

/// `true` when the ratios add up to exactly one.
pub fn sums_to_one(ratios: &[Dec]) -> bool {
    let total = ratios.iter().cloned().fold(Dec::zero(), |acc, r| acc + r);
    total == Dec::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(dec("0.34").to_string(), "0.340000000000000000");
        assert_eq!(dec("1").to_string(), "1.000000000000000000");
        assert_eq!(dec("0.000000000000000001").to_string(), "0.000000000000000001");
    }

    #[test]
    fn from_percent_matches_parse() {
        assert_eq!(Dec::from_percent(34), dec("0.34"));
        assert_eq!(Dec::from_percent(100), Dec::one());
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", ".5", "5.", "-0.1", "0.1.2", "1e-3", "0.0000000000000000001", "abc"] {
            assert!(bad.parse::<Dec>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn mul_floor_truncates() {
        let total = Amount::from(100_000_000u64);
        assert_eq!(dec("0.34").mul_floor(&total), Amount::from(34_000_000u64));
        assert_eq!(dec("0.333").mul_floor(&Amount::from(10u64)), Amount::from(3u64));
    }

    #[test]
    fn mul_floor_div_has_no_intermediate_rounding() {
        let total = Amount::from(100_000_000u64);
        assert_eq!(
            dec("0.34").mul_floor_div(&total, 12),
            Some(Amount::from(2_833_333u64))
        );
        assert_eq!(
            dec("0.32").mul_floor_div(&total, 12),
            Some(Amount::from(2_666_666u64))
        );
        assert_eq!(dec("0.5").mul_floor_div(&total, 0), None);
    }

    #[test]
    fn sum_to_one_is_exact() {
        assert!(sums_to_one(&[dec("0.34"), dec("0.34"), dec("0.32")]));
        assert!(!sums_to_one(&[dec("0.34"), dec("0.34"), dec("0.31")]));
        assert!(!sums_to_one(&[dec("0.5"), dec("0.5"), dec("0.000000000000000001")]));
    }

    #[test]
    fn toml_float_is_rejected() {
        #[derive(Deserialize)]
        struct Holder {
            #[allow(dead_code)]
            ratio: Dec,
        }
        assert!(toml::from_str::<Holder>("ratio = 0.34").is_err());
        assert!(toml::from_str::<Holder>("ratio = \"0.34\"").is_ok());
    }
}
