//! # Symbol — Token Type Identifiers
//!
//! A token type on the ledger is identified by a [`Symbol`]: a short
//! uppercase ticker code plus a decimal precision. Two symbols are the
//! same token type only when *both* parts match — `"4,XAK"` and `"2,XAK"`
//! are distinct, and mixing them is rejected everywhere.
//!
//! The code part is packed into a single `u64` ([`SymbolCode`]) so it is
//! `Copy`, cheap to compare, and usable directly as an ordered table key.
//! One byte per character, little-end first, zero padding on the right.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum decimal precision a symbol may declare.
///
/// 18 covers every fiat and crypto denomination we care about (wei is
/// exactly 18). Raising this would overflow the fixed-point range long
/// before the extra digits became useful.
pub const MAX_PRECISION: u8 = 18;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced when constructing or parsing symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The code part was empty.
    #[error("symbol code is empty")]
    EmptyCode,

    /// The code part exceeded [`SymbolCode::MAX_LEN`] characters.
    #[error("symbol code '{0}' is longer than {max} characters", max = SymbolCode::MAX_LEN)]
    CodeTooLong(String),

    /// The code part contained something other than A–Z.
    #[error("symbol code contains invalid character '{0}' (only A-Z allowed)")]
    InvalidChar(char),

    /// The precision part was above [`MAX_PRECISION`].
    #[error("symbol precision {0} exceeds maximum of {max}", max = MAX_PRECISION)]
    PrecisionOutOfRange(u8),

    /// The textual form did not match `"<precision>,<CODE>"`.
    #[error("malformed symbol string '{0}', expected '<precision>,<CODE>'")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// SymbolCode
// ---------------------------------------------------------------------------

/// A ticker code of 1–7 uppercase ASCII letters, packed into a `u64`.
///
/// The packing places the first character in the least significant byte,
/// so codes sort in byte order and distinct codes always produce distinct
/// raw values. The raw value is the ledger's table key for everything
/// scoped by token type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolCode(u64);

impl SymbolCode {
    /// Maximum number of characters in a code.
    pub const MAX_LEN: usize = 7;

    /// Validates and packs a ticker code.
    ///
    /// # Errors
    ///
    /// Rejects empty input, input longer than [`Self::MAX_LEN`], and any
    /// character outside A–Z.
    pub fn new(code: &str) -> Result<Self, SymbolError> {
        if code.is_empty() {
            return Err(SymbolError::EmptyCode);
        }
        if code.len() > Self::MAX_LEN {
            return Err(SymbolError::CodeTooLong(code.to_string()));
        }

        let mut raw: u64 = 0;
        for (i, ch) in code.chars().enumerate() {
            if !ch.is_ascii_uppercase() {
                return Err(SymbolError::InvalidChar(ch));
            }
            raw |= (ch as u64) << (8 * i);
        }
        Ok(Self(raw))
    }

    /// Returns the packed representation.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Reconstructs a code from its packed representation.
    ///
    /// # Errors
    ///
    /// Rejects raw values that do not unpack to a valid code (wrong
    /// alphabet, embedded zero bytes, or more than seven characters).
    pub fn from_raw(raw: u64) -> Result<Self, SymbolError> {
        let mut bytes = raw;
        let mut seen_end = false;
        for _ in 0..8 {
            let b = (bytes & 0xFF) as u8;
            bytes >>= 8;
            if b == 0 {
                seen_end = true;
            } else if seen_end {
                // Zero byte in the middle of the code.
                return Err(SymbolError::Malformed(format!("{raw:#x}")));
            } else if !b.is_ascii_uppercase() {
                return Err(SymbolError::InvalidChar(b as char));
            }
        }
        if raw == 0 {
            return Err(SymbolError::EmptyCode);
        }
        if raw >> (8 * Self::MAX_LEN) != 0 {
            return Err(SymbolError::Malformed(format!("{raw:#x}")));
        }
        Ok(Self(raw))
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = self.0;
        while raw > 0 {
            write!(f, "{}", (raw & 0xFF) as u8 as char)?;
            raw >>= 8;
        }
        Ok(())
    }
}

impl fmt::Debug for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolCode({self})")
    }
}

impl FromStr for SymbolCode {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// A token type identifier: ticker code plus decimal precision.
///
/// The precision declares how many fractional digits a quantity of this
/// token carries. It is part of the identity — arithmetic and transfers
/// require an exact match, never a silent precision coercion.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    code: SymbolCode,
    precision: u8,
}

impl Symbol {
    /// Builds a symbol from a validated code and a precision in `0..=18`.
    pub fn new(code: SymbolCode, precision: u8) -> Result<Self, SymbolError> {
        if precision > MAX_PRECISION {
            return Err(SymbolError::PrecisionOutOfRange(precision));
        }
        Ok(Self { code, precision })
    }

    /// Parses and builds a symbol in one step, e.g. `Symbol::parse("XAK", 4)`.
    pub fn parse(code: &str, precision: u8) -> Result<Self, SymbolError> {
        Self::new(SymbolCode::new(code)?, precision)
    }

    /// The ticker code.
    pub fn code(&self) -> SymbolCode {
        self.code
    }

    /// Number of fractional digits quantities of this token carry.
    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({self})")
    }
}

impl FromStr for Symbol {
    /// Parses the `"<precision>,<CODE>"` form, e.g. `"4,XAK"`.
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prec, code) = s
            .split_once(',')
            .ok_or_else(|| SymbolError::Malformed(s.to_string()))?;
        let precision: u8 = prec
            .parse()
            .map_err(|_| SymbolError::Malformed(s.to_string()))?;
        Self::new(SymbolCode::new(code)?, precision)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrips_through_display() {
        for code in ["X", "XAK", "ABCDEFG"] {
            let sc = SymbolCode::new(code).unwrap();
            assert_eq!(sc.to_string(), code);
        }
    }

    #[test]
    fn code_rejects_bad_input() {
        assert_eq!(SymbolCode::new(""), Err(SymbolError::EmptyCode));
        assert!(matches!(
            SymbolCode::new("TOOLONGX"),
            Err(SymbolError::CodeTooLong(_))
        ));
        assert_eq!(SymbolCode::new("xak"), Err(SymbolError::InvalidChar('x')));
        assert_eq!(SymbolCode::new("XA1"), Err(SymbolError::InvalidChar('1')));
    }

    #[test]
    fn distinct_codes_have_distinct_raw_values() {
        let a = SymbolCode::new("XAK").unwrap();
        let b = SymbolCode::new("XAKT").unwrap();
        let c = SymbolCode::new("KAX").unwrap();
        assert_ne!(a.raw(), b.raw());
        assert_ne!(a.raw(), c.raw());
    }

    #[test]
    fn raw_roundtrip() {
        let sc = SymbolCode::new("USD").unwrap();
        assert_eq!(SymbolCode::from_raw(sc.raw()).unwrap(), sc);
    }

    #[test]
    fn from_raw_rejects_garbage() {
        assert!(SymbolCode::from_raw(0).is_err());
        // 'a' is outside the alphabet.
        assert!(SymbolCode::from_raw(b'a' as u64).is_err());
        // Zero byte between two letters.
        let gap = (b'B' as u64) << 16 | (b'A' as u64);
        assert!(SymbolCode::from_raw(gap).is_err());
    }

    #[test]
    fn symbol_equality_requires_code_and_precision() {
        let a = Symbol::parse("XAK", 4).unwrap();
        let b = Symbol::parse("XAK", 4).unwrap();
        let c = Symbol::parse("XAK", 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn symbol_precision_bound() {
        assert!(Symbol::parse("XAK", 18).is_ok());
        assert_eq!(
            Symbol::parse("XAK", 19),
            Err(SymbolError::PrecisionOutOfRange(19))
        );
    }

    #[test]
    fn symbol_string_roundtrip() {
        let sym: Symbol = "4,XAK".parse().unwrap();
        assert_eq!(sym.precision(), 4);
        assert_eq!(sym.code().to_string(), "XAK");
        assert_eq!(sym.to_string(), "4,XAK");
    }

    #[test]
    fn symbol_parse_rejects_malformed() {
        assert!("XAK".parse::<Symbol>().is_err());
        assert!("x,XAK".parse::<Symbol>().is_err());
        assert!("4,".parse::<Symbol>().is_err());
        assert!("4,xak".parse::<Symbol>().is_err());
    }

    #[test]
    fn symbol_serde_roundtrip() {
        let sym = Symbol::parse("XAK", 4).unwrap();
        let json = serde_json::to_string(&sym).expect("serialize");
        let back: Symbol = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(sym, back);
    }
}
