//! Feistel round engine.
//!
//! A block `L || R` is transformed one round at a time:
//!
//! ```text
//! L' = R
//! R' = L xor F(R, k)
//! F(R, k) = SBOX1(hi) || SBOX2(lo)   where hi || lo = expand(R) xor k
//! ```
//!
//! After the last round the halves are swapped once more, so a full
//! encipherment emits `R_final || L_final`. Running the same rounds with the
//! subkeys in reverse order undoes it, since `F` is only ever re-evaluated,
//! never inverted.

use crate::error::SdesError;
use crate::sbox::SBox;
use crate::utils::bits::BitString;

/// Expands an even-width string by two bits.
///
/// With the middle pair at positions `m` and `m + 1`, the result is
/// `R[..m] || R(m+1) R(m) R(m+1) R(m) || R[m+2..]`.
///
/// # Errors
/// Returns [`SdesError::OddLength`] for odd widths and
/// [`SdesError::BitStringTooLong`] if the result would exceed 64 bits.
///
/// # Examples
///
/// ```
/// use sdes::feistel::expand;
///
/// let r = "011001".parse().unwrap();
/// assert_eq!(expand(&r).unwrap().to_string(), "01010101");
/// ```
pub fn expand(r: &BitString) -> Result<BitString, SdesError> {
    if !r.len().is_multiple_of(2) {
        return Err(SdesError::OddLength);
    }
    let bits: Vec<bool> = r.bits().collect();
    let mid = bits.len() / 2 - 1;
    let mut out = Vec::with_capacity(bits.len() + 2);
    out.extend_from_slice(&bits[..mid]);
    out.extend_from_slice(&[bits[mid + 1], bits[mid], bits[mid + 1], bits[mid]]);
    out.extend_from_slice(&bits[mid + 2..]);
    BitString::from_bits(out)
}

/// Round function and round driver over a pair of substitution tables.
#[derive(Debug, Clone, Copy)]
pub struct FeistelNetwork<'a> {
    sbox1: &'a SBox,
    sbox2: &'a SBox,
}

impl<'a> FeistelNetwork<'a> {
    /// Creates a network substituting through `sbox1` (high half) and
    /// `sbox2` (low half).
    pub fn new(sbox1: &'a SBox, sbox2: &'a SBox) -> Self {
        FeistelNetwork { sbox1, sbox2 }
    }

    /// The round function `F(Ri, ki)`.
    ///
    /// # Errors
    /// - [`SdesError::LengthMismatch`] unless `ki` is two bits wider than `ri`.
    /// - [`SdesError::OddLength`] if `ri` has odd width.
    /// - Any substitution error from the SBOXes.
    pub fn f(&self, ri: &BitString, ki: &BitString) -> Result<BitString, SdesError> {
        if ki.len() != ri.len() + 2 {
            return Err(SdesError::LengthMismatch {
                expected: ri.len() + 2,
                actual: ki.len(),
            });
        }
        let mixed = expand(ri)?.xor(ki)?;
        let (high, low) = mixed.split_halves()?;
        let s1 = self.sbox1.substitute(&high)?;
        let s2 = self.sbox2.substitute(&low)?;
        s1.concat(&s2)
    }

    /// One Feistel round: `L || R` becomes `R || (L xor F(R, ki))`.
    ///
    /// # Errors
    /// Returns [`SdesError::LengthMismatch`] unless `ki` is
    /// `block.len() / 2 + 2` bits wide, or [`SdesError::OddLength`] for an
    /// odd block.
    pub fn round(&self, block: &BitString, ki: &BitString) -> Result<BitString, SdesError> {
        if !block.len().is_multiple_of(2) {
            return Err(SdesError::OddLength);
        }
        if block.len() / 2 + 2 != ki.len() {
            return Err(SdesError::LengthMismatch {
                expected: block.len() / 2 + 2,
                actual: ki.len(),
            });
        }
        let (left, right) = block.split_halves()?;
        let new_right = left.xor(&self.f(&right, ki)?)?;
        right.concat(&new_right)
    }

    /// Applies one round per subkey in the given order, then swaps the halves.
    fn run<'k, I>(&self, block: &BitString, subkeys: I) -> Result<BitString, SdesError>
    where
        I: Iterator<Item = &'k BitString>,
    {
        let mut state = *block;
        for ki in subkeys {
            state = self.round(&state, ki)?;
        }
        state.swap_halves()
    }

    /// Enciphers a block with `subkeys[0]` as round 1.
    pub fn encipher(
        &self,
        block: &BitString,
        subkeys: &[BitString],
    ) -> Result<BitString, SdesError> {
        self.run(block, subkeys.iter())
    }

    /// Deciphers a block by running the rounds with the subkeys reversed.
    pub fn decipher(
        &self,
        block: &BitString,
        subkeys: &[BitString],
    ) -> Result<BitString, SdesError> {
        self.run(block, subkeys.iter().rev())
    }
}
