//! Board coordinates and their `C5`-style text form.

use core::fmt;
use core::str::FromStr;

use crate::common::BoardError;

/// Highest row index expressible with a single letter (`Z`).
pub const MAX_ROW_INDEX: usize = 25;

/// A (row, column) cell position, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Whether this coordinate fits on a `size`×`size` grid.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Parse a row letter followed by a 1-based column number, e.g. `c5`.
    ///
    /// The letter is case-insensitive and surrounding whitespace is ignored.
    /// No board size is assumed; callers bound-check against their own
    /// board.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let text = text.trim();
        let mut chars = text.chars();
        let letter = chars.next().ok_or(BoardError::InvalidFormat)?;
        if !letter.is_ascii_alphabetic() {
            return Err(BoardError::InvalidFormat);
        }
        let row = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BoardError::InvalidFormat);
        }
        let number: usize = digits.parse().map_err(|_| BoardError::InvalidFormat)?;
        if number == 0 {
            return Err(BoardError::InvalidFormat);
        }
        Ok(Self::new(row, number - 1))
    }
}

impl FromStr for Coordinate {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row <= MAX_ROW_INDEX {
            write!(f, "{}{}", (b'A' + self.row as u8) as char, self.col + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
