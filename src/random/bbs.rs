//! Blum Blum Shub bit generator.
//!
//! `n = p * q` with `p` and `q` primes congruent to 3 mod 4. The seed is the
//! n-th prime of a [`PrimeSource`]; while it shares a factor with `n` the
//! next prime is taken instead. Starting from `x0 = s^2 mod n`, every step
//! squares `x` modulo `n` and emits its low bit.
//!
//! The sequence is fully determined by `(p, q)` and the prime source, so it
//! can be regenerated whenever key material is needed instead of stored.

use log::debug;

use crate::error::SdesError;
use crate::modular;
use crate::random::prime_source::PrimeSource;
use crate::utils::bits::{BitString, MAX_BITS};

/// Infinite stream of Blum Blum Shub output bits.
///
/// # Examples
///
/// ```
/// use sdes::random::bbs::BlumBlumShub;
/// use sdes::random::prime_source::SievePrimes;
///
/// let bits: String = BlumBlumShub::new(11, 19, &SievePrimes::new())
///     .unwrap()
///     .take(8)
///     .map(|b| if b { '1' } else { '0' })
///     .collect();
/// assert_eq!(bits, "11100110");
/// ```
#[derive(Debug, Clone)]
pub struct BlumBlumShub {
    n: u64,
    x: u64,
}

impl BlumBlumShub {
    /// Seeds a generator from `p`, `q` and the given prime source.
    ///
    /// # Errors
    /// - [`SdesError::InvalidP`] / [`SdesError::InvalidQ`] if the parameter is
    ///   not a prime congruent to 3 mod 4.
    /// - [`SdesError::SeedUnavailable`] if the prime source ends before a
    ///   usable seed is found.
    pub fn new(p: u64, q: u64, primes: &dyn PrimeSource) -> Result<Self, SdesError> {
        if !modular::is_blum_prime(p) {
            return Err(SdesError::InvalidP);
        }
        if !modular::is_blum_prime(q) {
            return Err(SdesError::InvalidQ);
        }
        // Both factors fit in i64, so only the product can overflow.
        let signed_n = i64::try_from(p)
            .ok()
            .and_then(|p| p.checked_mul(q as i64))
            .ok_or(SdesError::SeedUnavailable(usize::MAX))?;
        let n = signed_n as u64;
        let n_index = usize::try_from(n).map_err(|_| SdesError::SeedUnavailable(usize::MAX))?;

        let mut index = n_index;
        let seed = loop {
            let candidate = primes
                .nth_prime(index)
                .ok_or(SdesError::SeedUnavailable(index))?;
            let relatively_prime = i64::try_from(candidate)
                .is_ok_and(|c| modular::is_relatively_prime(signed_n, c));
            if relatively_prime {
                break candidate;
            }
            index += 1;
        };

        debug!("bbs seeded: n={} seed position={} seed={}", n, index, seed);
        Ok(BlumBlumShub {
            n,
            x: Self::square_mod(seed % n, n),
        })
    }

    /// Computes `v^2 mod n` without overflow.
    fn square_mod(v: u64, n: u64) -> u64 {
        ((v as u128 * v as u128) % n as u128) as u64
    }
}

impl Iterator for BlumBlumShub {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.x = Self::square_mod(self.x, self.n);
        Some(self.x % 2 == 1)
    }
}

/// Generates `bits` Blum Blum Shub bits, first-generated bit most significant.
///
/// # Errors
/// - [`SdesError::InvalidP`], [`SdesError::InvalidQ`] as for [`BlumBlumShub::new`].
/// - [`SdesError::InvalidBits`] if `bits` is 0.
/// - [`SdesError::BitStringTooLong`] if `bits` exceeds 64.
///
/// # Examples
///
/// ```
/// use sdes::error::SdesError;
/// use sdes::random::bbs::blum_blum_shub;
/// use sdes::random::prime_source::SievePrimes;
///
/// let primes = SievePrimes::new();
/// assert_eq!(blum_blum_shub(11, 19, 8, &primes).unwrap().to_string(), "11100110");
/// assert_eq!(blum_blum_shub(384, 503, 1, &primes), Err(SdesError::InvalidP));
/// ```
pub fn blum_blum_shub(
    p: u64,
    q: u64,
    bits: usize,
    primes: &dyn PrimeSource,
) -> Result<BitString, SdesError> {
    if !modular::is_blum_prime(p) {
        return Err(SdesError::InvalidP);
    }
    if !modular::is_blum_prime(q) {
        return Err(SdesError::InvalidQ);
    }
    if bits == 0 {
        return Err(SdesError::InvalidBits);
    }
    if bits > MAX_BITS {
        return Err(SdesError::BitStringTooLong);
    }
    let generator = BlumBlumShub::new(p, q, primes)?;
    BitString::from_bits(generator.take(bits))
}
