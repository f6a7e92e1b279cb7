//! Fixed-width bit strings.
//!
//! The cipher works on short binary numbers whose width matters as much as
//! their value (`"0011"` and `"11"` are different inputs). [`BitString`]
//! keeps both: up to 64 bits stored in a `u64` together with an explicit
//! width. Index 0 is the most significant (leftmost) bit, matching the
//! textual form used by tables and test vectors.

use std::fmt;
use std::str::FromStr;

use crate::error::SdesError;

/// Maximum number of bits a [`BitString`] can hold.
pub const MAX_BITS: usize = 64;

/// A binary number with an explicit width of 1 to 64 bits.
///
/// # Examples
///
/// ```
/// use sdes::utils::bits::BitString;
///
/// let a: BitString = "0110".parse().unwrap();
/// let b: BitString = "1100".parse().unwrap();
/// assert_eq!(a.xor(&b).unwrap().to_string(), "1010");
/// assert_eq!(a.rotate_left(1).to_string(), "1100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitString {
    value: u64,
    len: usize,
}

fn mask(len: usize) -> u64 {
    if len >= MAX_BITS {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

/// Returns the number of bits required to represent the given number.
fn bits_required(num: u64) -> usize {
    (u64::BITS - num.leading_zeros()) as usize
}

impl BitString {
    /// Creates a bit string of width `len` holding `value`.
    ///
    /// # Errors
    /// - [`SdesError::InvalidBinary`] if `len` is 0.
    /// - [`SdesError::BitStringTooLong`] if `len > 64`.
    /// - [`SdesError::LengthMismatch`] if `value` does not fit in `len` bits.
    pub fn new(value: u64, len: usize) -> Result<Self, SdesError> {
        if len == 0 {
            return Err(SdesError::InvalidBinary);
        }
        if len > MAX_BITS {
            return Err(SdesError::BitStringTooLong);
        }
        if value & !mask(len) != 0 {
            return Err(SdesError::LengthMismatch {
                expected: len,
                actual: bits_required(value),
            });
        }
        Ok(BitString { value, len })
    }

    /// Keeps the low `len` bits of `value`. `len` must be in `1..=64`.
    pub(crate) fn truncated(value: u64, len: usize) -> Self {
        debug_assert!((1..=MAX_BITS).contains(&len));
        BitString {
            value: value & mask(len),
            len,
        }
    }

    /// Builds a bit string from individual bits, most significant first.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidBinary`] for an empty sequence and
    /// [`SdesError::BitStringTooLong`] for more than 64 bits.
    pub fn from_bits<I>(bits: I) -> Result<Self, SdesError>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut value = 0u64;
        let mut len = 0usize;
        for bit in bits {
            if len == MAX_BITS {
                return Err(SdesError::BitStringTooLong);
            }
            value = (value << 1) | bit as u64;
            len += 1;
        }
        Self::new(value, len)
    }

    /// Numeric value of the bits.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Width in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a bit string holds at least one bit.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bit at `index`, counting from the most significant bit.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.value >> (self.len - 1 - index)) & 1 == 1)
    }

    /// Iterates over the bits, most significant first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.value >> (self.len - 1 - i)) & 1 == 1)
    }

    /// Bitwise exclusive or of two equal-width strings.
    ///
    /// # Errors
    /// Returns [`SdesError::LengthMismatch`] if the widths differ.
    pub fn xor(&self, other: &BitString) -> Result<BitString, SdesError> {
        if self.len != other.len {
            return Err(SdesError::LengthMismatch {
                expected: self.len,
                actual: other.len,
            });
        }
        Ok(BitString {
            value: self.value ^ other.value,
            len: self.len,
        })
    }

    /// Appends `other` after `self`.
    ///
    /// # Errors
    /// Returns [`SdesError::BitStringTooLong`] if the result exceeds 64 bits.
    pub fn concat(&self, other: &BitString) -> Result<BitString, SdesError> {
        let len = self.len + other.len;
        if len > MAX_BITS {
            return Err(SdesError::BitStringTooLong);
        }
        Ok(BitString {
            value: (self.value << other.len) | other.value,
            len,
        })
    }

    /// Returns the `count` most significant bits.
    ///
    /// # Errors
    /// Returns [`SdesError::LengthMismatch`] if `count` is 0 or wider than `self`.
    pub fn take(&self, count: usize) -> Result<BitString, SdesError> {
        if count == 0 || count > self.len {
            return Err(SdesError::LengthMismatch {
                expected: self.len,
                actual: count,
            });
        }
        Ok(BitString::truncated(self.value >> (self.len - count), count))
    }

    /// Splits into consecutive groups of `width` bits, most significant first.
    ///
    /// # Errors
    /// Returns [`SdesError::LengthMismatch`] if `width` is 0 or does not
    /// divide the length.
    pub fn chunks(&self, width: usize) -> Result<Vec<BitString>, SdesError> {
        if width == 0 || !self.len.is_multiple_of(width) {
            return Err(SdesError::LengthMismatch {
                expected: self.len,
                actual: width,
            });
        }
        let count = self.len / width;
        let chunks = (0..count)
            .map(|i| BitString::truncated(self.value >> (self.len - (i + 1) * width), width))
            .collect();
        Ok(chunks)
    }

    /// Splits into left (most significant) and right halves.
    ///
    /// # Errors
    /// Returns [`SdesError::OddLength`] if the width is odd.
    pub fn split_halves(&self) -> Result<(BitString, BitString), SdesError> {
        if !self.len.is_multiple_of(2) {
            return Err(SdesError::OddLength);
        }
        let half = self.len / 2;
        let left = BitString::truncated(self.value >> half, half);
        let right = BitString::truncated(self.value, half);
        Ok((left, right))
    }

    /// Exchanges the two halves: `L || R` becomes `R || L`.
    ///
    /// # Errors
    /// Returns [`SdesError::OddLength`] if the width is odd.
    pub fn swap_halves(&self) -> Result<BitString, SdesError> {
        let (left, right) = self.split_halves()?;
        right.concat(&left)
    }

    /// Rotates left by `shift` positions (circular, modulo the width).
    pub fn rotate_left(&self, shift: usize) -> BitString {
        let shift = shift % self.len;
        if shift == 0 {
            return *self;
        }
        let rotated = (self.value << shift) | (self.value >> (self.len - shift));
        BitString::truncated(rotated, self.len)
    }

    /// Rotates right by `shift` positions (circular, modulo the width).
    pub fn rotate_right(&self, shift: usize) -> BitString {
        let shift = shift % self.len;
        self.rotate_left(self.len - shift)
    }
}

impl FromStr for BitString {
    type Err = SdesError;

    /// Parses a string of `0` and `1` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(SdesError::InvalidBinary),
            }
        }
        BitString::from_bits(bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.len)
    }
}
