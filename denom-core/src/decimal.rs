//! Exact decimal numbers built on dashu-int
//!
//! A `Decimal` is a sign, an arbitrary precision digit magnitude (`UBig`)
//! and a scale: value = ±magnitude × 10^(-scale).
//! Shifting by a power of ten only moves the scale, so conversions between
//! power-of-ten denominations never lose a digit and never touch a float.

use std::fmt;
use std::str::FromStr;

use dashu_int::UBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ConversionError;

/// How to drop fractional digits beyond a configured cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Discard the extra digits (round toward zero)
    #[default]
    Truncate,
    /// Round to nearest, ties away from zero
    HalfUp,
    /// Round to nearest, ties to the even neighbour
    HalfEven,
}

impl RoundingMode {
    pub fn name(&self) -> &'static str {
        match self {
            RoundingMode::Truncate => "truncate",
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfEven => "half_even",
        }
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" | "down" => Ok(RoundingMode::Truncate),
            "half_up" | "half-up" => Ok(RoundingMode::HalfUp),
            "half_even" | "half-even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(format!(
                "unknown rounding mode '{}'. Valid: truncate, half_up, half_even",
                other
            )),
        }
    }
}

/// Exact signed decimal
#[derive(Debug, Clone)]
pub struct Decimal {
    negative: bool,
    magnitude: UBig,
    scale: i64,
}

fn ten_pow(exp: u64) -> UBig {
    UBig::from(10u8).pow(exp as usize)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Decimal {
    // ========== Construction ==========

    pub fn zero() -> Self {
        Self { negative: false, magnitude: UBig::ZERO, scale: 0 }
    }

    /// Parse a plain decimal string.
    ///
    /// Accepted grammar (after trimming surrounding whitespace):
    /// an optional `-`, one or more ASCII digits, then optionally a single
    /// `.` followed by one or more digits. No `+`, no exponent, no grouping.
    pub fn parse(s: &str) -> Result<Self, ConversionError> {
        let invalid = || ConversionError::InvalidNumber(s.to_string());
        let trimmed = s.trim();

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        if !is_digits(int_part) {
            return Err(invalid());
        }
        if body.contains('.') && !is_digits(frac_part) {
            return Err(invalid());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let magnitude: UBig = digits.parse().map_err(|_| invalid())?;
        let negative = negative && magnitude != UBig::ZERO;

        Ok(Self {
            negative,
            magnitude,
            scale: frac_part.len() as i64,
        })
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.magnitude == UBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of fractional digits in the canonical rendering
    pub fn fraction_digits(&self) -> u64 {
        self.normalized().scale.max(0) as u64
    }

    // ========== Scaling ==========

    /// Multiply by 10^places (negative places divide). Always exact.
    pub fn shift(&self, places: i64) -> Self {
        Self {
            negative: self.negative,
            magnitude: self.magnitude.clone(),
            scale: self.scale - places,
        }
    }

    /// Keep at most `max_digits` fractional digits, rounding the rest away
    pub fn round_fraction(&self, max_digits: u32, mode: RoundingMode) -> Self {
        let max_digits = max_digits as i64;
        if self.scale <= max_digits {
            return self.clone();
        }

        let divisor = ten_pow((self.scale - max_digits) as u64);
        let quotient = &self.magnitude / &divisor;
        let remainder = &self.magnitude % &divisor;
        let twice = &remainder + &remainder;

        let round_up = match mode {
            RoundingMode::Truncate => false,
            RoundingMode::HalfUp => twice >= divisor,
            RoundingMode::HalfEven => {
                twice > divisor
                    || (twice == divisor && &quotient % &UBig::from(2u8) == UBig::ONE)
            }
        };

        let magnitude = if round_up { quotient + UBig::ONE } else { quotient };
        let negative = self.negative && magnitude != UBig::ZERO;

        Self { negative, magnitude, scale: max_digits }
    }

    /// Strip trailing zeros from the magnitude; zero gets scale 0
    pub fn normalized(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }

        let digits = self.magnitude.to_string();
        let stripped = (digits.len() - digits.trim_end_matches('0').len()) as u64;
        if stripped == 0 {
            return self.clone();
        }

        Self {
            negative: self.negative,
            magnitude: &self.magnitude / &ten_pow(stripped),
            scale: self.scale - stripped as i64,
        }
    }

    // ========== Display ==========

    /// Canonical plain rendering: no exponent, no superfluous zeros, no `-0`
    pub fn to_plain_string(&self) -> String {
        let value = self.normalized();
        if value.is_zero() {
            return "0".to_string();
        }

        let digits = value.magnitude.to_string();
        let body = if value.scale <= 0 {
            let mut s = digits;
            s.extend(std::iter::repeat('0').take((-value.scale) as usize));
            s
        } else {
            let scale = value.scale as usize;
            let padded = if digits.len() <= scale {
                format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
            } else {
                digits
            };
            let split = padded.len() - scale;
            format!("{}.{}", &padded[..split], &padded[split..])
        };

        if value.negative {
            format!("-{}", body)
        } else {
            body
        }
    }
}

// ========== Trait Implementations ==========

impl FromStr for Decimal {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.negative == b.negative && a.scale == b.scale && a.magnitude == b.magnitude
    }
}

impl Eq for Decimal {}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_plain_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
