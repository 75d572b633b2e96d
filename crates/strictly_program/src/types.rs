//! Core domain types: identities, marks and the board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Identity of a participant, as handed to the program by its host.
///
/// Stands in for an account public key: 32 opaque bytes compared by
/// equality only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerKey([u8; 32]);

impl PlayerKey {
    /// Wraps raw key bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives a stable key from a human-readable label (SHA-256 of the label).
    pub fn from_label(label: &str) -> Self {
        let digest = Sha256::digest(label.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_hex(f, &self.0)
    }
}

impl std::fmt::Debug for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlayerKey({})", self)
    }
}

/// Error parsing a hex-encoded 32-byte key.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid key '{}': expected 64 hex characters", input)]
pub struct ParseKeyError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for PlayerKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self).ok_or_else(|| ParseKeyError {
            input: s.to_string(),
        })
    }
}

pub(crate) fn write_hex(f: &mut std::fmt::Formatter<'_>, bytes: &[u8]) -> std::fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

pub(crate) fn decode_hex32(s: &str) -> Option<[u8; 32]> {
    let s = s.trim();
    if s.len() != 64 || !s.is_ascii() {
        return None;
    }
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(out)
}

/// Mark placed by a player. X belongs to the first seat and moves on odd turns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Mark {
    /// First player's mark.
    X,
    /// Second player's mark.
    O,
}

impl Mark {
    /// Mark owned by the player seated at `index` (0 or 1).
    pub fn for_seat(index: usize) -> Self {
        if index % 2 == 0 { Mark::X } else { Mark::O }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Not yet set.
    #[default]
    Empty,
    /// Holds a player's mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// 3x3 board, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff both coordinates lie in `[0, 2]`.
    pub fn is_in_bounds(row: i32, column: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&column)
    }

    /// Gets the square at the given cell, `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<Square> {
        self.squares.get(row).and_then(|r| r.get(column)).copied()
    }

    /// True iff the cell holds a mark.
    ///
    /// Callers check bounds first; an out-of-bounds cell reports `false`.
    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        matches!(self.get(row, column), Some(Square::Occupied(_)))
    }

    /// Sets the cell to `mark`.
    ///
    /// Bounds and emptiness are the caller's responsibility.
    pub fn place(&mut self, row: usize, column: usize, mark: Mark) {
        debug_assert!(!self.is_occupied(row, column), "cell ({row}, {column}) overwritten");
        if let Some(square) = self.squares.get_mut(row).and_then(|r| r.get_mut(column)) {
            *square = Square::Occupied(mark);
        }
    }

    /// Overwrites a square without any checks.
    #[cfg(test)]
    pub(crate) fn force(&mut self, row: usize, column: usize, square: Square) {
        self.squares[row][column] = square;
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[[Square; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }

    /// Iterates over every square in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares().filter(|s| *s == Square::Occupied(mark)).count()
    }

    /// Number of occupied squares.
    pub fn filled(&self) -> usize {
        self.squares().filter(|s| *s != Square::Empty).count()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (r, row) in self.squares.iter().enumerate() {
            for (c, square) in row.iter().enumerate() {
                let symbol = match square {
                    Square::Empty => ".".to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if c < BOARD_SIZE - 1 {
                    result.push('|');
                }
            }
            if r < BOARD_SIZE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
