//! Board square representation on a 0x88 grid.
//!
//! A square index is `row * 16 + file`. Row 0 is Black's back rank (rank 8)
//! and row 7 is White's back rank (rank 1); file 0 is the a-file. Every index
//! with `index & 0x88 != 0` lies off the board, which makes bounds checks a
//! single AND.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mask whose AND with an index is non-zero exactly for off-board cells.
pub const OFF_BOARD: u8 = 0x88;
/// Mask selecting the row bits of an index.
pub const MASK_ROW: u8 = 0x70;
/// Mask selecting the file bits of an index.
pub const MASK_FILE: u8 = 0x07;
/// Number of cells in a 0x88 grid, sentinels included.
pub const GRID_SIZE: usize = 128;

/// Returns true if the raw index names a square on the board.
#[inline]
pub const fn on_board(index: u8) -> bool {
    index & OFF_BOARD == 0
}

/// Error returned when parsing a square from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square '{0}': expected a file a-h followed by a rank 1-8")]
    InvalidAlgebraic(String),
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c >= 'a' && c <= 'h' {
            Self::from_index(c as u8 - b'a')
        } else {
            None
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0 for rank 1, 7 for rank 8).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        if c >= '1' && c <= '8' {
            Self::from_index(c as u8 - b'1')
        } else {
            None
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the 0x88 row this rank occupies.
    #[inline]
    pub const fn row(self) -> u8 {
        7 - self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An on-board square, stored as its 0x88 index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.row() * 16 + file.index())
    }

    /// Creates a square from a raw 0x88 index. Returns `None` off the board.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if on_board(index) {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from a tile number (`file + 8 * row`, 0-63).
    #[inline]
    pub const fn from_tile(tile: u8) -> Option<Self> {
        if tile < 64 {
            Some(Square((tile % 8) + (tile / 8) * 16))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the raw 0x88 index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the index as a grid offset.
    #[inline]
    pub const fn cell(self) -> usize {
        self.0 as usize
    }

    /// Returns the tile number (`file + 8 * row`).
    #[inline]
    pub const fn tile(self) -> u8 {
        self.file_index() + 8 * self.row_index()
    }

    /// Returns the file bits (0-7, a-h).
    #[inline]
    pub const fn file_index(self) -> u8 {
        self.0 & MASK_FILE
    }

    /// Returns the row (0-7, rank 8 down to rank 1).
    #[inline]
    pub const fn row_index(self) -> u8 {
        (self.0 >> 4) & 7
    }

    /// Returns the row bits (`index & 0x70`).
    #[inline]
    pub const fn row_bits(self) -> u8 {
        self.0 & MASK_ROW
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[self.file_index() as usize]
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(7 - self.row_index()) as usize]
    }

    /// Returns the square `delta` cells away, if it is on the board.
    #[inline]
    pub const fn offset(self, delta: i16) -> Option<Self> {
        let target = self.0 as i16 + delta;
        if target < 0 || target > 0x77 {
            return None;
        }
        Self::from_index(target as u8)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    // Common squares
    pub const A1: Square = Square(0x70);
    pub const B1: Square = Square(0x71);
    pub const C1: Square = Square(0x72);
    pub const D1: Square = Square(0x73);
    pub const E1: Square = Square(0x74);
    pub const F1: Square = Square(0x75);
    pub const G1: Square = Square(0x76);
    pub const H1: Square = Square(0x77);
    pub const A8: Square = Square(0x00);
    pub const B8: Square = Square(0x01);
    pub const C8: Square = Square(0x02);
    pub const D8: Square = Square(0x03);
    pub const E8: Square = Square(0x04);
    pub const F8: Square = Square(0x05);
    pub const G8: Square = Square(0x06);
    pub const H8: Square = Square(0x07);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| SquareError::InvalidAlgebraic(s.to_string()))
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_algebraic()
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {:#04x})", self.to_algebraic(), self.0)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
