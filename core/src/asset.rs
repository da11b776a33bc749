//! # Asset — Fixed-Point Quantities
//!
//! An [`Asset`] is a signed fixed-point amount bound to one [`Symbol`].
//! The amount is stored in smallest units: `"123.4500 XAK"` with precision
//! 4 is the integer `1234500`. The protocol never divides — the precision
//! exists so that parsing and display agree on where the point sits.
//!
//! Arithmetic is available only between assets of the *same* symbol.
//! A symbol mismatch is a bug in the caller, so those paths panic rather
//! than return an error the caller would have to invent a meaning for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::symbol::{Symbol, SymbolCode, SymbolError, MAX_PRECISION};

/// Largest magnitude an asset amount may take, positive or negative.
///
/// One bit of the `i64` is deliberately left unused so that intermediate
/// sums of two in-range amounts can never wrap the native integer.
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced when constructing, parsing, or combining assets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The amount falls outside `-MAX_AMOUNT..=MAX_AMOUNT`.
    #[error("amount {0} is outside the representable range")]
    AmountOutOfRange(i64),

    /// An addition or subtraction left the representable range.
    #[error("arithmetic overflow: {current} combined with {delta}")]
    Overflow {
        /// Left-hand amount.
        current: i64,
        /// Amount that was being applied.
        delta: i64,
    },

    /// The textual form did not match `"<amount> <CODE>"`.
    #[error("malformed asset string '{0}', expected '<amount> <CODE>'")]
    Malformed(String),

    /// The symbol part failed validation.
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A signed fixed-point quantity of one token type.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Amount in smallest units (fixed-point, `symbol.precision()` digits).
    pub amount: i64,
    /// The token type this quantity is denominated in.
    pub symbol: Symbol,
}

impl Asset {
    /// Builds an asset, rejecting amounts outside the representable range.
    pub fn new(amount: i64, symbol: Symbol) -> Result<Self, AssetError> {
        if !amount_in_range(amount) {
            return Err(AssetError::AmountOutOfRange(amount));
        }
        Ok(Self { amount, symbol })
    }

    /// The zero quantity of a token type.
    pub fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// The ticker code of this asset's symbol.
    pub fn code(&self) -> SymbolCode {
        self.symbol.code()
    }

    /// Whether the amount sits inside the representable range.
    ///
    /// Constructed assets are always valid; this re-check exists because
    /// the fields are public and records may arrive from a host boundary.
    pub fn is_valid(&self) -> bool {
        amount_in_range(self.amount)
    }

    /// Whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Adds another quantity of the same token type.
    ///
    /// # Panics
    ///
    /// Panics if the symbols differ. Callers must have already matched
    /// the operands against one registered symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Overflow`] if the sum leaves the range.
    pub fn checked_add(&self, other: Asset) -> Result<Asset, AssetError> {
        assert_eq!(
            self.symbol, other.symbol,
            "asset symbol mismatch: {} vs {}",
            self.symbol, other.symbol
        );
        // Both operands are bounded by 2^62 - 1, so the native add is safe;
        // only the ledger range can be exceeded.
        let amount = self.amount + other.amount;
        if !amount_in_range(amount) {
            return Err(AssetError::Overflow {
                current: self.amount,
                delta: other.amount,
            });
        }
        Ok(Asset {
            amount,
            symbol: self.symbol,
        })
    }

    /// Subtracts another quantity of the same token type.
    ///
    /// # Panics
    ///
    /// Panics if the symbols differ.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Overflow`] if the difference leaves the range.
    pub fn checked_sub(&self, other: Asset) -> Result<Asset, AssetError> {
        assert_eq!(
            self.symbol, other.symbol,
            "asset symbol mismatch: {} vs {}",
            self.symbol, other.symbol
        );
        let amount = self.amount - other.amount;
        if !amount_in_range(amount) {
            return Err(AssetError::Overflow {
                current: self.amount,
                delta: -other.amount,
            });
        }
        Ok(Asset {
            amount,
            symbol: self.symbol,
        })
    }
}

fn amount_in_range(amount: i64) -> bool {
    (-MAX_AMOUNT..=MAX_AMOUNT).contains(&amount)
}

impl fmt::Display for Asset {
    /// Renders with exactly `precision` fractional digits: `"-3.0500 XAK"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision();
        if precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol.code());
        }
        let scale = 10_i64.pow(precision as u32);
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let integral = magnitude / scale as u64;
        let fraction = magnitude % scale as u64;
        write!(
            f,
            "{sign}{integral}.{fraction:0width$} {code}",
            width = precision as usize,
            code = self.symbol.code()
        )
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset({self})")
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    /// Parses `"<amount> <CODE>"`, deriving the precision from the digit
    /// count after the decimal point: `"123.4500 XAK"` becomes amount
    /// `1234500` under symbol `"4,XAK"`, `"7 XAK"` becomes `7` under
    /// `"0,XAK"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AssetError::Malformed(s.to_string());

        let mut parts = s.split_whitespace();
        let number = parts.next().ok_or_else(malformed)?;
        let code = parts.next().ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (integral, fraction) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if fraction.len() > MAX_PRECISION as usize {
            return Err(SymbolError::PrecisionOutOfRange(fraction.len() as u8).into());
        }

        // Accumulate in a wider type so the offending value survives into
        // the error message instead of wrapping first.
        let mut wide: i128 = 0;
        for b in integral.bytes().chain(fraction.bytes()) {
            wide = wide * 10 + (b - b'0') as i128;
            if wide > MAX_AMOUNT as i128 {
                return Err(AssetError::AmountOutOfRange(
                    wide.min(i64::MAX as i128) as i64
                ));
            }
        }
        let mut amount = wide as i64;
        if negative {
            amount = -amount;
        }

        let symbol = Symbol::parse(code, fraction.len() as u8)?;
        Asset::new(amount, symbol)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn xak4(amount: i64) -> Asset {
        Asset::new(amount, Symbol::parse("XAK", 4).unwrap()).unwrap()
    }

    #[test]
    fn parse_with_fraction() {
        let asset: Asset = "123.4500 XAK".parse().unwrap();
        assert_eq!(asset.amount, 1_234_500);
        assert_eq!(asset.symbol, Symbol::parse("XAK", 4).unwrap());
    }

    #[test]
    fn parse_whole_number_has_precision_zero() {
        let asset: Asset = "7 XAK".parse().unwrap();
        assert_eq!(asset.amount, 7);
        assert_eq!(asset.symbol.precision(), 0);
    }

    #[test]
    fn parse_negative() {
        let asset: Asset = "-3.05 USD".parse().unwrap();
        assert_eq!(asset.amount, -305);
        assert_eq!(asset.symbol.precision(), 2);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["XAK", "1.5", "1..5 XAK", "1.5 xak", "a.b XAK", "1 2 XAK"] {
            assert!(bad.parse::<Asset>().is_err(), "should reject {bad:?}");
        }
    }

    #[test]
    fn parse_rejects_overlong_precision() {
        let s = format!("0.{} XAK", "1".repeat(19));
        assert!(s.parse::<Asset>().is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_amount() {
        // 2^62 exceeds MAX_AMOUNT by one.
        assert!("4611686018427387904 BIG".parse::<Asset>().is_err());
        assert!("4611686018427387903 BIG".parse::<Asset>().is_ok());
    }

    #[test]
    fn display_roundtrip() {
        for s in ["123.4500 XAK", "-3.05 USD", "7 XAK", "0.0000 XAK"] {
            let asset: Asset = s.parse().unwrap();
            assert_eq!(asset.to_string(), s);
        }
    }

    #[test]
    fn display_pads_fraction() {
        assert_eq!(xak4(50).to_string(), "0.0050 XAK");
        assert_eq!(xak4(-1).to_string(), "-0.0001 XAK");
    }

    #[test]
    fn checked_add_and_sub() {
        let sum = xak4(1_000).checked_add(xak4(234)).unwrap();
        assert_eq!(sum.amount, 1_234);
        let diff = xak4(1_000).checked_sub(xak4(1_500)).unwrap();
        assert_eq!(diff.amount, -500);
    }

    #[test]
    fn add_overflow_rejected() {
        let result = xak4(MAX_AMOUNT).checked_add(xak4(1));
        assert!(matches!(result, Err(AssetError::Overflow { .. })));
        let result = xak4(-MAX_AMOUNT).checked_sub(xak4(1));
        assert!(matches!(result, Err(AssetError::Overflow { .. })));
    }

    #[test]
    #[should_panic(expected = "asset symbol mismatch")]
    fn mismatched_symbols_panic() {
        let usd = Asset::new(100, Symbol::parse("USD", 4).unwrap()).unwrap();
        let _ = xak4(100).checked_add(usd);
    }

    #[test]
    fn new_rejects_out_of_range() {
        let sym = Symbol::parse("XAK", 4).unwrap();
        assert!(Asset::new(MAX_AMOUNT, sym).is_ok());
        assert!(Asset::new(MAX_AMOUNT + 1, sym).is_err());
        assert!(Asset::new(-MAX_AMOUNT - 1, sym).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let asset = xak4(1_234_500);
        let json = serde_json::to_string(&asset).expect("serialize");
        let back: Asset = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(asset, back);
    }
}
