//! Error types for the SDES library.

use std::fmt;

/// Errors produced by the SDES library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdesError {
    /// A bit string was empty or contained characters other than `0` and `1`.
    InvalidBinary,
    /// A bit string is longer than the 64 bits a [`BitString`](crate::utils::bits::BitString) holds.
    BitStringTooLong,
    /// Two bit strings (or a bit string and a table) disagree on width.
    LengthMismatch { expected: usize, actual: usize },
    /// The operation needs an even number of bits.
    OddLength,
    /// Number of rounds must be greater than 1.
    InvalidRounds,
    /// Block size must be even, at least 4 and hold two encoded symbols.
    InvalidBlockSize,
    /// Pad must be a single symbol of the working alphabet.
    InvalidPad,
    /// An SBOX supplied to the cipher has no rows.
    EmptySBox,
    /// SBOX text could not be parsed.
    MalformedSBox(String),
    /// An SBOX column index is outside the table.
    ColumnOutOfRange(usize),
    /// Prime table text could not be parsed.
    MalformedPrimeTable(String),
    /// The prime source cannot supply the requested seed position.
    SeedUnavailable(usize),
    /// `p` must be a prime congruent to 3 mod 4.
    InvalidP,
    /// `q` must be a prime congruent to 3 mod 4.
    InvalidQ,
    /// Requested bit count must be positive.
    InvalidBits,
    /// Non-positive operand passed to a modular arithmetic routine.
    InvalidOperand,
    /// Subkey indices start at 1.
    InvalidSubkeyIndex(i64),
    /// Only the ECB and CBC modes are implemented.
    UnsupportedMode(String),
    /// Only the B6 encoding scheme is implemented.
    UnsupportedEncoding(String),
    /// The character has no code in the active encoding.
    SymbolNotInAlphabet(char),
    /// Reading a table or configuration file failed.
    Io { path: String, reason: String },
    /// Configuration text could not be parsed.
    Config(String),
}

impl fmt::Display for SdesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdesError::InvalidBinary => write!(f, "Input is not a valid binary number"),
            SdesError::BitStringTooLong => {
                write!(f, "Bit string exceeds the maximum width of 64 bits")
            }
            SdesError::LengthMismatch { expected, actual } => {
                write!(f, "Size mismatch: expected {} bits, got {}", expected, actual)
            }
            SdesError::OddLength => write!(f, "Bit string length must be even"),
            SdesError::InvalidRounds => write!(f, "Number of rounds must be greater than 1"),
            SdesError::InvalidBlockSize => {
                write!(f, "Block size must be even, at least 4 and fit two symbols")
            }
            SdesError::InvalidPad => {
                write!(f, "Pad must be a single symbol of the working alphabet")
            }
            SdesError::EmptySBox => write!(f, "SBOX is empty"),
            SdesError::MalformedSBox(reason) => write!(f, "Malformed SBOX: {}", reason),
            SdesError::ColumnOutOfRange(col) => {
                write!(f, "SBOX column {} is outside the table", col)
            }
            SdesError::MalformedPrimeTable(reason) => {
                write!(f, "Malformed prime table: {}", reason)
            }
            SdesError::SeedUnavailable(index) => {
                write!(f, "Prime source has no prime at position {}", index)
            }
            SdesError::InvalidP => write!(f, "Invalid p"),
            SdesError::InvalidQ => write!(f, "Invalid q"),
            SdesError::InvalidBits => write!(f, "Invalid bits"),
            SdesError::InvalidOperand => write!(f, "Invalid input"),
            SdesError::InvalidSubkeyIndex(i) => write!(f, "Invalid subkey index {}", i),
            SdesError::UnsupportedMode(mode) => write!(f, "Undefined mode {:?}", mode),
            SdesError::UnsupportedEncoding(name) => {
                write!(f, "Unsupported encoding {:?}", name)
            }
            SdesError::SymbolNotInAlphabet(c) => {
                write!(f, "Symbol {:?} is not part of the alphabet", c)
            }
            SdesError::Io { path, reason } => write!(f, "Cannot read {}: {}", path, reason),
            SdesError::Config(reason) => write!(f, "Invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for SdesError {}

impl SdesError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        SdesError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_bbs_parameters_are_distinct() {
        let p = format!("{}", SdesError::InvalidP);
        let q = format!("{}", SdesError::InvalidQ);
        let bits = format!("{}", SdesError::InvalidBits);
        assert_eq!(p, "Invalid p");
        assert_eq!(q, "Invalid q");
        assert_eq!(bits, "Invalid bits");
    }

    #[test]
    fn test_display_length_mismatch() {
        let err = SdesError::LengthMismatch {
            expected: 8,
            actual: 7,
        };
        assert_eq!(format!("{}", err), "Size mismatch: expected 8 bits, got 7");
    }

    #[test]
    fn test_display_unsupported_mode() {
        let err = SdesError::UnsupportedMode("OFB".to_string());
        assert_eq!(format!("{}", err), "Undefined mode \"OFB\"");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = SdesError::io(
            std::path::Path::new("missing.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(
            err,
            SdesError::Io {
                path: "missing.txt".to_string(),
                reason: "not found".to_string()
            }
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(SdesError::InvalidRounds, SdesError::InvalidRounds);
        assert_ne!(SdesError::InvalidP, SdesError::InvalidQ);
    }

    #[test]
    fn test_error_clone() {
        let err = SdesError::SymbolNotInAlphabet('#');
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
