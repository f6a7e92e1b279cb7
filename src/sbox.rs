//! Substitution boxes.
//!
//! An SBOX is a two-row lookup table mapping a `size`-bit input to a
//! `(size - 1)`-bit output: the first input bit selects the row and the
//! remaining bits are the column index.
//!
//! The text form is two lines of hyphen-separated binary entries:
//!
//! ```text
//! 101-010-001-110-011-100-111-000
//! 001-100-110-010-000-111-101-011
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::info;

use crate::error::SdesError;
use crate::utils::bits::BitString;

/// Output width of the built-in tables.
const DEFAULT_OUTPUT_BITS: usize = 3;

/// First table of the classic 12-bit simplified DES.
const SBOX1_ROWS: [[u64; 8]; 2] = [
    [0b101, 0b010, 0b001, 0b110, 0b011, 0b100, 0b111, 0b000],
    [0b001, 0b100, 0b110, 0b010, 0b000, 0b111, 0b101, 0b011],
];

/// Second table of the classic 12-bit simplified DES.
const SBOX2_ROWS: [[u64; 8]; 2] = [
    [0b100, 0b000, 0b110, 0b101, 0b111, 0b001, 0b011, 0b010],
    [0b101, 0b011, 0b000, 0b111, 0b110, 0b010, 0b001, 0b100],
];

/// Two-row substitution table.
///
/// An empty table (no rows) is a valid value meaning "not configured";
/// every substitution through it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SBox {
    rows: [Vec<BitString>; 2],
    size: usize,
}

impl SBox {
    /// Creates the empty, unconfigured table.
    pub fn empty() -> Self {
        SBox::default()
    }

    /// Builds a table from two rows of equal length and uniform entry width.
    ///
    /// Two empty rows give the empty table.
    ///
    /// # Errors
    /// Returns [`SdesError::MalformedSBox`] if the rows differ in length or
    /// the entries differ in width.
    pub fn from_rows(row0: Vec<BitString>, row1: Vec<BitString>) -> Result<Self, SdesError> {
        if row0.len() != row1.len() {
            return Err(SdesError::MalformedSBox(format!(
                "rows have {} and {} entries",
                row0.len(),
                row1.len()
            )));
        }
        let Some(first) = row0.first() else {
            return Ok(SBox::empty());
        };
        let width = first.len();
        if row0.iter().chain(row1.iter()).any(|e| e.len() != width) {
            return Err(SdesError::MalformedSBox(
                "entries differ in width".to_string(),
            ));
        }
        Ok(SBox {
            rows: [row0, row1],
            size: width + 1,
        })
    }

    /// Reads a table file in the two-line text form.
    ///
    /// # Errors
    /// Returns [`SdesError::Io`] if the file cannot be read, or
    /// [`SdesError::MalformedSBox`] if it is not a valid table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdesError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SdesError::io(path, e))?;
        let sbox: SBox = text.parse()?;
        info!("loaded SBOX({}) from {}", sbox.size, path.display());
        Ok(sbox)
    }

    /// First built-in table (4-bit input, 3-bit output).
    pub fn default_sbox1() -> Self {
        Self::from_constants(&SBOX1_ROWS)
    }

    /// Second built-in table (4-bit input, 3-bit output).
    pub fn default_sbox2() -> Self {
        Self::from_constants(&SBOX2_ROWS)
    }

    fn from_constants(rows: &[[u64; 8]; 2]) -> Self {
        let row = |r: &[u64; 8]| -> Vec<BitString> {
            r.iter()
                .map(|&v| BitString::truncated(v, DEFAULT_OUTPUT_BITS))
                .collect()
        };
        SBox {
            rows: [row(&rows[0]), row(&rows[1])],
            size: DEFAULT_OUTPUT_BITS + 1,
        }
    }

    /// Returns `true` if both rows are empty.
    pub fn is_empty(&self) -> bool {
        self.rows[0].is_empty() && self.rows[1].is_empty()
    }

    /// Input width in bits (0 for the empty table).
    pub fn size(&self) -> usize {
        self.size
    }

    /// The two rows of output values.
    pub fn rows(&self) -> &[Vec<BitString>; 2] {
        &self.rows
    }

    /// Maps a `size`-bit input to its `(size - 1)`-bit output.
    ///
    /// # Errors
    /// - [`SdesError::EmptySBox`] if the table is empty.
    /// - [`SdesError::LengthMismatch`] if `value` is not `size` bits wide.
    /// - [`SdesError::ColumnOutOfRange`] if the row has no such column.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdes::sbox::SBox;
    ///
    /// let sbox = SBox::default_sbox1();
    /// let out = sbox.substitute(&"1101".parse().unwrap()).unwrap();
    /// assert_eq!(out.to_string(), "111");
    /// ```
    pub fn substitute(&self, value: &BitString) -> Result<BitString, SdesError> {
        if self.is_empty() {
            return Err(SdesError::EmptySBox);
        }
        if value.len() != self.size {
            return Err(SdesError::LengthMismatch {
                expected: self.size,
                actual: value.len(),
            });
        }
        let row = usize::from(value.bit(0).unwrap_or(false));
        let column = (value.value() & ((1u64 << (self.size - 1)) - 1)) as usize;
        self.rows[row]
            .get(column)
            .copied()
            .ok_or(SdesError::ColumnOutOfRange(column))
    }
}

impl FromStr for SBox {
    type Err = SdesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.split_whitespace().collect();
        if lines.len() != 2 {
            return Err(SdesError::MalformedSBox(format!(
                "expected 2 rows, found {}",
                lines.len()
            )));
        }
        let parse_row = |line: &str| -> Result<Vec<BitString>, SdesError> {
            line.split('-')
                .map(|entry| {
                    entry.parse::<BitString>().map_err(|_| {
                        SdesError::MalformedSBox(format!("bad entry {:?}", entry))
                    })
                })
                .collect()
        };
        SBox::from_rows(parse_row(lines[0])?, parse_row(lines[1])?)
    }
}

impl fmt::Display for SBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |row: &[BitString]| -> String {
            let entries: Vec<String> = row.iter().map(|e| e.to_string()).collect();
            format!("[{}]", entries.join(", "))
        };
        write!(
            f,
            "SBOX({}):\n{}\n{}",
            self.size,
            render(&self.rows[0]),
            render(&self.rows[1])
        )
    }
}
