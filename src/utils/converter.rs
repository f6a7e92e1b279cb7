//! Symbol-to-bits conversion.
//!
//! The cipher does not work on characters directly: every symbol of the
//! working alphabet is replaced by the binary form of its position in that
//! alphabet. B6 is the 64-symbol scheme (lower case, upper case, digits,
//! `.` and space), so each symbol is exactly 6 bits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdesError;
use crate::utils::bits::BitString;

/// The B6 alphabet, in code order.
const B6_BASE: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789. ";

/// Symbol encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Encoding {
    /// 64 symbols, 6 bits each.
    #[default]
    B6,
}

impl Encoding {
    /// The ordered alphabet of the scheme.
    pub fn base(&self) -> &'static str {
        match self {
            Encoding::B6 => B6_BASE,
        }
    }

    /// Number of bits per encoded symbol.
    pub fn symbol_width(&self) -> usize {
        match self {
            Encoding::B6 => 6,
        }
    }

    /// Returns `true` if `c` belongs to the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.base().contains(c)
    }

    /// Encodes one symbol as its alphabet position.
    ///
    /// # Errors
    /// Returns [`SdesError::SymbolNotInAlphabet`] for symbols outside the scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdes::utils::converter::Encoding;
    ///
    /// assert_eq!(Encoding::B6.encode('O').unwrap().to_string(), "101000");
    /// assert!(Encoding::B6.encode('#').is_err());
    /// ```
    pub fn encode(&self, c: char) -> Result<BitString, SdesError> {
        let index = self
            .base()
            .chars()
            .position(|symbol| symbol == c)
            .ok_or(SdesError::SymbolNotInAlphabet(c))?;
        BitString::new(index as u64, self.symbol_width())
    }

    /// Decodes one symbol-width group back to its symbol.
    ///
    /// # Errors
    /// Returns [`SdesError::LengthMismatch`] if `bits` is not exactly one
    /// symbol wide.
    pub fn decode(&self, bits: &BitString) -> Result<char, SdesError> {
        let width = self.symbol_width();
        if bits.len() != width {
            return Err(SdesError::LengthMismatch {
                expected: width,
                actual: bits.len(),
            });
        }
        self.base()
            .chars()
            .nth(bits.value() as usize)
            .ok_or(SdesError::InvalidBinary)
    }
}

impl FromStr for Encoding {
    type Err = SdesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B6" => Ok(Encoding::B6),
            other => Err(SdesError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::B6 => write!(f, "B6"),
        }
    }
}
