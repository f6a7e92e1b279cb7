//! Prime sources used to seed the Blum Blum Shub generator.
//!
//! The generator takes its seed from a public, ordered list of primes
//! (1-indexed). [`PrimeTable`] reads that list from text; [`SievePrimes`]
//! computes the same list on demand, so no data file is required.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::SdesError;

/// Trait for ordered prime sequences addressed by 1-based position.
///
/// Implementations must be deterministic: the same index always yields the
/// same prime.
pub trait PrimeSource {
    /// Returns the prime at 1-based `index`, or `None` if the source does not
    /// reach that far. Index 0 is always `None`.
    fn nth_prime(&self, index: usize) -> Option<u64>;
}

/// A prime list loaded from whitespace-separated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimeTable {
    primes: Vec<u64>,
}

impl PrimeTable {
    /// Wraps an already ordered list of primes.
    pub fn new(primes: Vec<u64>) -> Self {
        PrimeTable { primes }
    }

    /// Parses whitespace-separated decimal primes.
    ///
    /// # Errors
    /// Returns [`SdesError::MalformedPrimeTable`] for any token that is not
    /// an unsigned integer.
    pub fn parse(text: &str) -> Result<Self, SdesError> {
        let primes = text
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u64>()
                    .map_err(|_| SdesError::MalformedPrimeTable(format!("bad entry {:?}", token)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PrimeTable { primes })
    }

    /// Reads and parses a prime table file.
    ///
    /// # Errors
    /// Returns [`SdesError::Io`] if the file cannot be read, or
    /// [`SdesError::MalformedPrimeTable`] if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdesError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SdesError::io(path, e))?;
        let table = Self::parse(&text)?;
        info!("loaded {} primes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Number of primes in the table.
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// Returns `true` if the table holds no primes.
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }
}

impl PrimeSource for PrimeTable {
    fn nth_prime(&self, index: usize) -> Option<u64> {
        index.checked_sub(1).and_then(|i| self.primes.get(i).copied())
    }
}

/// Computes the n-th prime with an odd-only sieve of Eratosthenes.
///
/// Nothing is cached between calls. Indices above [`max_index`](Self::max_index)
/// are refused to bound memory use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SievePrimes {
    max_index: usize,
}

/// Default largest index served by [`SievePrimes`] (about 11 MiB of sieve).
const DEFAULT_MAX_INDEX: usize = 10_000_000;

impl Default for SievePrimes {
    fn default() -> Self {
        Self::new()
    }
}

impl SievePrimes {
    /// Creates a sieve serving indices up to 10,000,000.
    pub fn new() -> Self {
        SievePrimes {
            max_index: DEFAULT_MAX_INDEX,
        }
    }

    /// Creates a sieve with a custom index ceiling.
    pub fn with_max_index(max_index: usize) -> Self {
        SievePrimes { max_index }
    }

    /// Largest index this source will compute.
    pub fn max_index(&self) -> usize {
        self.max_index
    }

    /// Upper bound for the n-th prime (Rosser's theorem, n >= 6).
    fn upper_bound(index: usize) -> u64 {
        if index < 6 {
            return 15;
        }
        let n = index as f64;
        (n * (n.ln() + n.ln().ln())).ceil() as u64 + 3
    }
}

impl PrimeSource for SievePrimes {
    fn nth_prime(&self, index: usize) -> Option<u64> {
        if index == 0 || index > self.max_index {
            return None;
        }
        if index == 1 {
            return Some(2);
        }

        // Slot i stands for the odd number 2i + 1.
        let limit = Self::upper_bound(index);
        let slots = (limit / 2 + 1) as usize;
        let mut composite = vec![0u64; slots.div_ceil(64)];
        let mut count = 1usize;

        for i in 1..slots {
            if (composite[i / 64] >> (i % 64)) & 1 == 1 {
                continue;
            }
            let p = 2 * i as u64 + 1;
            count += 1;
            if count == index {
                return Some(p);
            }
            let mut j = (p * p / 2) as usize;
            while j < slots {
                composite[j / 64] |= 1u64 << (j % 64);
                j += p as usize;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sieve_first_primes() {
        let sieve = SievePrimes::new();
        let first: Vec<u64> = (1..=10).filter_map(|i| sieve.nth_prime(i)).collect();
        assert_eq!(first, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_sieve_known_positions() {
        let sieve = SievePrimes::new();
        assert_eq!(sieve.nth_prime(209), Some(1289));
        assert_eq!(sieve.nth_prime(1000), Some(7919));
        assert_eq!(sieve.nth_prime(10_000), Some(104_729));
    }

    #[test]
    fn test_sieve_bounds() {
        let sieve = SievePrimes::with_max_index(100);
        assert_eq!(sieve.nth_prime(0), None);
        assert_eq!(sieve.nth_prime(100), Some(541));
        assert_eq!(sieve.nth_prime(101), None);
        assert_eq!(sieve.max_index(), 100);
    }

    #[test]
    fn test_table_parse_and_index() {
        let table = PrimeTable::parse("2 3 5\n7\t11\n").unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.nth_prime(0), None);
        assert_eq!(table.nth_prime(1), Some(2));
        assert_eq!(table.nth_prime(5), Some(11));
        assert_eq!(table.nth_prime(6), None);
    }

    #[test]
    fn test_table_parse_rejects_garbage() {
        assert!(matches!(
            PrimeTable::parse("2 3 five"),
            Err(SdesError::MalformedPrimeTable(_))
        ));
    }

    #[test]
    fn test_table_matches_sieve() {
        let table = PrimeTable::new(vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31]);
        let sieve = SievePrimes::new();
        for i in 1..=table.len() {
            assert_eq!(table.nth_prime(i), sieve.nth_prime(i));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = PrimeTable::load("does/not/exist/primes.txt");
        assert!(matches!(result, Err(SdesError::Io { .. })));
    }
}
