//! Player color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players in chess.
///
/// The discriminants are the color bit of a piece code, so `color as u8`
/// can be OR-ed straight into a [`Piece`](crate::Piece) code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 8,
}

impl Color {
    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the color bit (0 for White, 8 for Black).
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Extracts the color from the color bit of a piece code.
    #[inline]
    pub const fn from_bit(code: u8) -> Self {
        if code & 0x8 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        (self as usize) >> 3
    }

    /// Returns the shift that selects this side's pair of castle bits.
    #[inline]
    pub const fn castle_shift(self) -> u8 {
        self.bit() >> 2
    }

    /// Returns the 0x88 row offset of this color's back rank.
    ///
    /// White sits on row `0x70`, Black on row `0x00`.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 0x70,
            Color::Black => 0x00,
        }
    }

    /// Returns the 0x88 row offset pawns of this color start on.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 0x60,
            Color::Black => 0x10,
        }
    }

    /// Returns the signed 0x88 step of a single pawn push.
    ///
    /// White pawns move toward lower indices.
    #[inline]
    pub const fn pawn_step(self) -> i16 {
        match self {
            Color::White => -16,
            Color::Black => 16,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
