//! Fixed-point asset amounts. An `Asset` is an arbitrary-precision significand scaled by `10^precision` and tagged with an uppercase symbol (fiat codes like USD, coins like BTC or BIP).
//!
//! **Canonical zero:** a zero significand always carries precision 0. Every construction path and every arithmetic result re-establishes this.
//!
//! **Equality is structural:** `3.10` (310, precision 2) and `3.1` (31, precision 1) are different assets.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

use crate::error::ExchangeError;

/// Maximum number of fractional digits an asset can carry.
///
/// 18 lets a coin keep at least one integer digit next to a full fractional part, e.g. `0.999999999999999999`.
pub const MAX_ASSET_PRECISION: u32 = 18;

/// Maximum length of a natural (decimal string) amount accepted by [`Asset::from_natural`], sign and point included.
pub const MAX_NATURAL_LENGTH: usize = 18;

/// Grammar of a natural amount: optional sign, integer digits, optional point followed by at least one digit.
pub const NATURAL_PATTERN: &str = r"^[+-]?[0-9]+(\.[0-9]+)?$";

static NATURAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(NATURAL_PATTERN).expect("natural amount pattern is a valid regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Zero value amount cannot have precision: {0}")]
    InvalidPrecision(u32),

    #[error("Precision overflow. Max value: {max}, got: {got}")]
    PrecisionOverflow { max: u32, got: u32 },

    #[error("Amount length is too big. Max length: {max}. Got: {got}")]
    StringTooLong { max: usize, got: usize },

    #[error("Invalid amount format: \"{0}\"")]
    InvalidFormat(String),

    #[error("Precision mismatch error: {0} and {1}")]
    PrecisionMismatch(u32, u32),

    #[error("Symbol mismatch error: {0} and {1}")]
    SymbolMismatch(String, String),

    #[error("Amount {value} does not fit in {target}")]
    Overflow { value: String, target: &'static str },
}

impl From<AssetError> for ExchangeError {
    fn from(err: AssetError) -> Self {
        ExchangeError::Asset(err.to_string())
    }
}

/// Uppercases a symbol. This is the only normalization symbols get; the charset is not checked.
pub(crate) fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase()
}

/// An immutable fixed-point amount of a single asset.
///
/// # Examples
/// ```
/// use exchange_core::Asset;
///
/// let price = Asset::from_natural("3.14", "usd").unwrap();
/// assert_eq!(price.amount(), 314);
/// assert_eq!(price.precision(), 2);
/// assert_eq!(price.symbol(), "USD");
/// assert_eq!(price.natural(), "3.14");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Value multiplied by `10^precision`.
    significand: BigInt,
    /// INVARIANT: 0 when `significand` is zero, never above `MAX_ASSET_PRECISION`.
    precision: u32,
    symbol: String,
}

impl Asset {
    /// Creates an asset from its significand and precision.
    ///
    /// Fails with `InvalidPrecision` when a zero significand carries a fractional scale and with `PrecisionOverflow` when `precision` exceeds [`MAX_ASSET_PRECISION`]. The significand is kept as given, never rescaled.
    pub fn new(significand: BigInt, precision: u32, symbol: &str) -> Result<Self, AssetError> {
        if significand.is_zero() && precision != 0 {
            return Err(AssetError::InvalidPrecision(precision));
        }

        if precision > MAX_ASSET_PRECISION {
            return Err(AssetError::PrecisionOverflow {
                max: MAX_ASSET_PRECISION,
                got: precision,
            });
        }

        Ok(Self {
            significand,
            precision,
            symbol: normalize_symbol(symbol),
        })
    }

    /// Parses an asset from its natural representation, e.g. `"14.0003"`.
    ///
    /// The precision is the number of digits after the point, so `"3.10"` keeps precision 2. A zero with fractional digits (`"0.000"`) is rejected rather than normalized.
    pub fn from_natural(natural: &str, symbol: &str) -> Result<Self, AssetError> {
        if natural.len() > MAX_NATURAL_LENGTH {
            return Err(AssetError::StringTooLong {
                max: MAX_NATURAL_LENGTH,
                got: natural.len(),
            });
        }

        if !NATURAL_REGEX.is_match(natural) {
            return Err(AssetError::InvalidFormat(natural.to_string()));
        }

        let precision = natural
            .find('.')
            .map_or(0, |point_idx| natural.len() - point_idx - 1);

        let joined: String = natural.chars().filter(|c| *c != '.').collect();
        let significand: BigInt = joined
            .strip_prefix('+')
            .unwrap_or(&joined)
            .parse()
            .map_err(|_| AssetError::InvalidFormat(natural.to_string()))?;

        // Length ceiling keeps the fractional part well below MAX_ASSET_PRECISION.
        Self::new(significand, precision as u32, symbol)
    }

    /// Significand truncated to its low 64 bits, sign applied.
    ///
    /// Exact for every significand that fits in an `i64`. Use [`Asset::significand`] or [`Asset::to_i128`] when the full value matters.
    pub fn amount(&self) -> i64 {
        let low = self
            .significand
            .magnitude()
            .iter_u64_digits()
            .next()
            .unwrap_or(0) as i64;

        if self.significand.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Full-precision significand.
    pub fn significand(&self) -> &BigInt {
        &self.significand
    }

    /// Significand as an `i128`, failing with `Overflow` instead of truncating.
    pub fn to_i128(&self) -> Result<i128, AssetError> {
        self.significand.to_i128().ok_or_else(|| AssetError::Overflow {
            value: self.significand.to_string(),
            target: "i128",
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.significand.is_negative()
    }

    /// Natural representation: the exact inverse of [`Asset::from_natural`] up to canonical form (no leading `+`, no redundant leading zeros).
    pub fn natural(&self) -> String {
        let digits = self.significand.magnitude().to_string();
        let sign = if self.significand.is_negative() { "-" } else { "" };
        let precision = self.precision as usize;

        if precision == 0 {
            return format!("{}{}", sign, digits);
        }

        if digits.len() > precision {
            let point_idx = digits.len() - precision;
            format!("{}{}.{}", sign, &digits[..point_idx], &digits[point_idx..])
        } else {
            format!("{}0.{}{}", sign, "0".repeat(precision - digits.len()), digits)
        }
    }

    /// Adds `other` to this asset. Both must share precision and symbol.
    pub fn checked_add(&self, other: &Asset) -> Result<Asset, AssetError> {
        self.ensure_compatible(other)?;
        Ok(self.with_significand(&self.significand + &other.significand))
    }

    /// Subtracts `other` from this asset. Both must share precision and symbol.
    pub fn checked_sub(&self, other: &Asset) -> Result<Asset, AssetError> {
        self.ensure_compatible(other)?;
        Ok(self.with_significand(&self.significand - &other.significand))
    }

    /// Multiplies the asset by an integer scalar. Multiplying by 0 yields canonical zero.
    pub fn checked_mul(&self, multiplier: i64) -> Result<Asset, AssetError> {
        Ok(self.with_significand(&self.significand * BigInt::from(multiplier)))
    }

    fn ensure_compatible(&self, other: &Asset) -> Result<(), AssetError> {
        if self.precision != other.precision {
            return Err(AssetError::PrecisionMismatch(self.precision, other.precision));
        }

        if self.symbol != other.symbol {
            return Err(AssetError::SymbolMismatch(
                self.symbol.clone(),
                other.symbol.clone(),
            ));
        }

        Ok(())
    }

    /// Builds a sibling asset with the same symbol, dropping the scale when the result is zero.
    fn with_significand(&self, significand: BigInt) -> Asset {
        let precision = if significand.is_zero() { 0 } else { self.precision };
        Asset {
            significand,
            precision,
            symbol: self.symbol.clone(),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.natural(), self.symbol)
    }
}
