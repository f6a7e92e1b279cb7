//! Cipher parameters.
//!
//! Every field has its own validated setter. A rejected value leaves the
//! parameters unchanged and is reported both as an error and as a `warn!`
//! record. `key_length` has no setter; it follows `block_size`.

use log::warn;
use serde::Serialize;

use crate::error::SdesError;
use crate::modular;
use crate::utils::converter::Encoding;

/// Default number of Feistel rounds.
pub const DEFAULT_ROUNDS: u32 = 2;

/// Default block size in bits (two B6 symbols).
pub const DEFAULT_BLOCK_SIZE: usize = 12;

/// Default first Blum prime.
pub const DEFAULT_P: u64 = 103;

/// Default second Blum prime.
pub const DEFAULT_Q: u64 = 199;

/// Default padding symbol.
pub const DEFAULT_PAD: char = 'Q';

/// Key length derived from a block size: half a block plus three bits.
fn key_length_for(block_size: usize) -> usize {
    block_size / 2 + 3
}

/// Strongly-typed cipher configuration.
///
/// # Examples
///
/// ```
/// use sdes::params::CipherParameters;
///
/// let mut params = CipherParameters::default();
/// assert_eq!(params.key_length(), 9);
/// assert!(params.set_rounds(1).is_err());
/// assert_eq!(params.rounds(), 2);
/// params.set_p(683).unwrap();
/// assert_eq!(params.p(), 683);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CipherParameters {
    rounds: u32,
    block_size: usize,
    key_length: usize,
    encoding: Encoding,
    p: u64,
    q: u64,
    pad: char,
}

impl Default for CipherParameters {
    fn default() -> Self {
        CipherParameters {
            rounds: DEFAULT_ROUNDS,
            block_size: DEFAULT_BLOCK_SIZE,
            key_length: key_length_for(DEFAULT_BLOCK_SIZE),
            encoding: Encoding::default(),
            p: DEFAULT_P,
            q: DEFAULT_Q,
            pad: DEFAULT_PAD,
        }
    }
}

impl CipherParameters {
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Width of the BBS key, always `block_size / 2 + 3`.
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn pad(&self) -> char {
        self.pad
    }

    /// Sets the number of rounds.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidRounds`] unless `rounds > 1`.
    pub fn set_rounds(&mut self, rounds: u32) -> Result<(), SdesError> {
        if rounds <= 1 {
            warn!("rejected rounds={}: must be greater than 1", rounds);
            return Err(SdesError::InvalidRounds);
        }
        self.rounds = rounds;
        Ok(())
    }

    /// Sets the block size and recomputes the key length.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidBlockSize`] unless the size is even, at
    /// least 4, and exactly two symbols of the active encoding.
    pub fn set_block_size(&mut self, block_size: usize) -> Result<(), SdesError> {
        if !Self::block_size_fits(block_size, self.encoding) {
            warn!(
                "rejected block_size={}: must be {} for {}",
                block_size,
                2 * self.encoding.symbol_width(),
                self.encoding
            );
            return Err(SdesError::InvalidBlockSize);
        }
        self.block_size = block_size;
        self.key_length = key_length_for(block_size);
        Ok(())
    }

    /// Switches the symbol encoding.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidPad`] if the current pad is not a symbol
    /// of `encoding`, or [`SdesError::InvalidBlockSize`] if the current block
    /// size does not hold two of its symbols.
    pub fn set_encoding(&mut self, encoding: Encoding) -> Result<(), SdesError> {
        if !encoding.contains(self.pad) {
            warn!("rejected encoding={}: pad {:?} not in alphabet", encoding, self.pad);
            return Err(SdesError::InvalidPad);
        }
        if !Self::block_size_fits(self.block_size, encoding) {
            warn!(
                "rejected encoding={}: block_size {} does not fit",
                encoding, self.block_size
            );
            return Err(SdesError::InvalidBlockSize);
        }
        self.encoding = encoding;
        Ok(())
    }

    /// Sets `p`.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidP`] unless `p` is a prime congruent to 3 mod 4.
    pub fn set_p(&mut self, p: u64) -> Result<(), SdesError> {
        if !modular::is_blum_prime(p) {
            warn!("rejected p={}: not a prime congruent to 3 mod 4", p);
            return Err(SdesError::InvalidP);
        }
        self.p = p;
        Ok(())
    }

    /// Sets `q`.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidQ`] unless `q` is a prime congruent to 3 mod 4.
    pub fn set_q(&mut self, q: u64) -> Result<(), SdesError> {
        if !modular::is_blum_prime(q) {
            warn!("rejected q={}: not a prime congruent to 3 mod 4", q);
            return Err(SdesError::InvalidQ);
        }
        self.q = q;
        Ok(())
    }

    /// Sets the padding symbol.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidPad`] if `pad` is outside the alphabet.
    pub fn set_pad(&mut self, pad: char) -> Result<(), SdesError> {
        if !self.encoding.contains(pad) {
            warn!("rejected pad={:?}: not in the {} alphabet", pad, self.encoding);
            return Err(SdesError::InvalidPad);
        }
        self.pad = pad;
        Ok(())
    }

    fn block_size_fits(block_size: usize, encoding: Encoding) -> bool {
        block_size >= 4 && block_size.is_multiple_of(2) && block_size == 2 * encoding.symbol_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CipherParameters::default();
        assert_eq!(params.rounds(), 2);
        assert_eq!(params.block_size(), 12);
        assert_eq!(params.key_length(), 9);
        assert_eq!(params.encoding(), Encoding::B6);
        assert_eq!(params.p(), 103);
        assert_eq!(params.q(), 199);
        assert_eq!(params.pad(), 'Q');
    }

    #[test]
    fn test_set_rounds() {
        let mut params = CipherParameters::default();
        assert_eq!(params.set_rounds(0), Err(SdesError::InvalidRounds));
        assert_eq!(params.set_rounds(1), Err(SdesError::InvalidRounds));
        assert_eq!(params.rounds(), 2);
        params.set_rounds(4).unwrap();
        assert_eq!(params.rounds(), 4);
    }

    #[test]
    fn test_set_block_size() {
        let mut params = CipherParameters::default();
        for bad in [0, 2, 7, 10, 16] {
            assert_eq!(
                params.set_block_size(bad),
                Err(SdesError::InvalidBlockSize),
                "block size {} accepted",
                bad
            );
        }
        assert_eq!(params.block_size(), 12);
        params.set_block_size(12).unwrap();
        assert_eq!(params.key_length(), 9);
    }

    #[test]
    fn test_set_primes() {
        let mut params = CipherParameters::default();
        assert_eq!(params.set_p(13), Err(SdesError::InvalidP));
        assert_eq!(params.set_p(899), Err(SdesError::InvalidP));
        assert_eq!(params.set_q(384), Err(SdesError::InvalidQ));
        assert_eq!((params.p(), params.q()), (103, 199));
        params.set_p(27691).unwrap();
        params.set_q(11).unwrap();
        assert_eq!((params.p(), params.q()), (27691, 11));
    }

    #[test]
    fn test_set_pad() {
        let mut params = CipherParameters::default();
        assert_eq!(params.set_pad('#'), Err(SdesError::InvalidPad));
        assert_eq!(params.set_pad('-'), Err(SdesError::InvalidPad));
        assert_eq!(params.pad(), 'Q');
        params.set_pad('.').unwrap();
        assert_eq!(params.pad(), '.');
        params.set_pad(' ').unwrap();
        assert_eq!(params.pad(), ' ');
    }

    #[test]
    fn test_set_encoding_keeps_state() {
        let mut params = CipherParameters::default();
        params.set_encoding(Encoding::B6).unwrap();
        assert_eq!(params, CipherParameters::default());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(CipherParameters::default()).unwrap();
        assert_eq!(json["rounds"], 2);
        assert_eq!(json["key_length"], 9);
        assert_eq!(json["encoding"], "B6");
        assert_eq!(json["pad"], "Q");
    }
}
