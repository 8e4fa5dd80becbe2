//! Arbitrary-precision token amounts.
//!
//! Amounts are unbounded non-negative integers of the smallest denomination
//! unit. Every arithmetic path is exact: subtraction is checked, division is
//! explicit floor division, and nothing ever passes through floating point.

use crate::error::TypesError;
use num_bigint::BigUint;
use num_traits::{CheckedSub, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A non-negative integer token amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn new(raw: BigUint) -> Self {
        Self(raw)
    }

    /// Parse a base-10 integer literal.
    ///
    /// Surrounding whitespace is ignored and an empty field is zero. Signs,
    /// digit separators, radix prefixes and fractional parts are rejected.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::zero());
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        BigUint::parse_bytes(trimmed.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| TypesError::InvalidAmount(s.to_string()))
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(&other.0).map(Self)
    }

    /// `self * n`.
    pub fn mul_u64(&self, n: u64) -> Self {
        Self(&self.0 * n)
    }

    /// `floor(self / n)`. Returns `None` when `n` is zero.
    pub fn div_floor_u64(&self, n: u64) -> Option<Self> {
        if n == 0 {
            return None;
        }
        Some(Self(&self.0 / n))
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<u128> for Amount {
    fn from(v: u128) -> Self {
        Self(BigUint::from(v))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;
    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, a| {
            acc += a;
            acc
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Serde ──────────────────────────────────────────────────────────────
//
// Serialised as a decimal string so values beyond 64 bits survive TOML and
// JSON. Plain non-negative integers are accepted on input for readability
// of hand-written configuration.

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative base-10 integer or string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        if v.trim().is_empty() {
            return Err(E::custom("empty amount"));
        }
        Amount::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        u64::try_from(v)
            .map(Amount::from)
            .map_err(|_| E::custom(format!("negative amount {v}")))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
