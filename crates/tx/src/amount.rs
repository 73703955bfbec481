//! Exact decimal currency amounts, and their conversion to integer base units (satoshis).
//!
//! Amounts are held as an `i128` mantissa and a decimal scale, so `0.0001` is exactly
//! `1 * 10^-4`. No binary floating point is used for arithmetic. Floats handed to us (e.g. JSON
//! numbers) are converted through their shortest round-trip decimal representation.
//!
//! ```
//! use escrow_tx::amount::Amount;
//!
//! let inputs: Amount = "5.0".parse().unwrap();
//! let spent = "2".parse::<Amount>().unwrap()
//!     .checked_add("0.02".parse().unwrap()).unwrap()
//!     .checked_add("0.0001".parse().unwrap()).unwrap();
//! let change = inputs.checked_sub(spent).unwrap();
//!
//! assert_eq!(change.to_string(), "2.9799");
//! assert_eq!(change.to_base_units().unwrap(), 297_990_000);
//! ```

use std::{convert::TryFrom, fmt, str::FromStr};

use serde::de::{self, Visitor};
use thiserror::Error;

/// The number of decimal places between the display unit and the base unit.
pub const BASE_UNIT_DECIMALS: u32 = 8;

/// The number of base units in one display unit.
pub const COIN: u64 = 100_000_000;

/// The maximum number of decimal places an `Amount` may carry.
pub const MAX_SCALE: u32 = 28;

/// Errors produced while parsing or converting amounts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input string was empty.
    #[error("Empty amount")]
    Empty,

    /// The input contained something other than a sign, digits, and one decimal point.
    #[error("Invalid character in amount: {0:?}")]
    InvalidCharacter(char),

    /// The input contained no digits, e.g. `"-"` or `"."`.
    #[error("Amount has no digits")]
    MissingDigits,

    /// More decimal places than `MAX_SCALE`.
    #[error("Amount has more than {} decimal places", MAX_SCALE)]
    TooPrecise,

    /// The amount does not fit the target representation.
    #[error("Amount out of range")]
    Overflow,

    /// A negative amount was used where a wire value is required.
    #[error("Amount is negative: {0}")]
    Negative(Amount),

    /// A float input was NaN or infinite.
    #[error("Amount is not a finite number")]
    NotFinite,
}

/// Type alias for amount results
pub type AmountResult<T> = Result<T, AmountError>;

/// An exact decimal amount, denominated in the display unit (BTC).
///
/// The representation is kept normalized (no trailing zeros in the fraction), so derived
/// equality is numeric equality: `"2.0"` and `"2"` are the same `Amount`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Amount {
    mantissa: i128,
    scale: u32,
}

fn pow10(exp: u32) -> AmountResult<i128> {
    10i128.checked_pow(exp).ok_or(AmountError::Overflow)
}

fn rescale(mantissa: i128, by: u32) -> AmountResult<i128> {
    pow10(by)?
        .checked_mul(mantissa)
        .ok_or(AmountError::Overflow)
}

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount {
        mantissa: 0,
        scale: 0,
    };

    fn normalized(mut mantissa: i128, mut scale: u32) -> Self {
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    /// Instantiate `mantissa * 10^-scale`.
    pub fn new(mantissa: i128, scale: u32) -> AmountResult<Self> {
        if scale > MAX_SCALE {
            return Err(AmountError::TooPrecise);
        }
        Ok(Self::normalized(mantissa, scale))
    }

    /// Instantiate an amount from a number of base units.
    pub fn from_base_units(units: u64) -> Self {
        Self::normalized(units as i128, BASE_UNIT_DECIMALS)
    }

    /// True if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Bring both amounts to a common scale.
    fn aligned(self, other: Self) -> AmountResult<(i128, i128, u32)> {
        let scale = std::cmp::max(self.scale, other.scale);
        Ok((
            rescale(self.mantissa, scale - self.scale)?,
            rescale(other.mantissa, scale - other.scale)?,
            scale,
        ))
    }

    /// Exact addition. Errors on overflow.
    pub fn checked_add(self, rhs: Self) -> AmountResult<Self> {
        let (a, b, scale) = self.aligned(rhs)?;
        let mantissa = a.checked_add(b).ok_or(AmountError::Overflow)?;
        Ok(Self::normalized(mantissa, scale))
    }

    /// Exact subtraction. Errors on overflow. The result may be negative.
    pub fn checked_sub(self, rhs: Self) -> AmountResult<Self> {
        let (a, b, scale) = self.aligned(rhs)?;
        let mantissa = a.checked_sub(b).ok_or(AmountError::Overflow)?;
        Ok(Self::normalized(mantissa, scale))
    }

    /// Exact sum of an iterator of amounts.
    pub fn checked_sum<I>(amounts: I) -> AmountResult<Self>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Convert to base units: multiply by 10^8 and truncate toward zero. Sub-satoshi
    /// precision is discarded, never rounded up.
    ///
    /// Errors if the amount is negative, or too large for a `u64`.
    pub fn to_base_units(&self) -> AmountResult<u64> {
        if self.is_negative() {
            return Err(AmountError::Negative(*self));
        }
        let units = if self.scale <= BASE_UNIT_DECIMALS {
            rescale(self.mantissa, BASE_UNIT_DECIMALS - self.scale)?
        } else {
            self.mantissa / pow10(self.scale - BASE_UNIT_DECIMALS)?
        };
        u64::try_from(units).map_err(|_| AmountError::Overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (int, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int, frac)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> AmountResult<Self> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let mut mantissa: i128 = 0;
        let mut scale = 0u32;
        let mut seen_point = false;
        let mut seen_digit = false;
        for c in digits.chars() {
            match c {
                '0'..='9' => {
                    mantissa = mantissa
                        .checked_mul(10)
                        .and_then(|m| m.checked_add((c as u8 - b'0') as i128))
                        .ok_or(AmountError::Overflow)?;
                    seen_digit = true;
                    if seen_point {
                        scale += 1;
                        if scale > MAX_SCALE {
                            return Err(AmountError::TooPrecise);
                        }
                    }
                }
                '.' if !seen_point => seen_point = true,
                c => return Err(AmountError::InvalidCharacter(c)),
            }
        }
        if !seen_digit {
            return Err(AmountError::MissingDigits);
        }
        if negative {
            mantissa = -mantissa;
        }
        Ok(Self::normalized(mantissa, scale))
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> AmountResult<Self> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        // `Display` for f64 is the shortest string that round-trips, and never uses exponents
        value.to_string().parse()
    }
}

impl serde::Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal amount, as a number or a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::try_from(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::normalized(v as i128, 0))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::normalized(v as i128, 0))
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}
