//! Chess piece representation.
//!
//! A piece is a single byte: bit 3 is the color, bits 0-2 the kind. Kinds
//! are numbered so that bit 2 marks the sliding pieces.

use std::fmt;
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::Color;

/// Mask selecting the color bit of a piece code.
pub const MASK_COLOR: u8 = 0x8;
/// Mask selecting the kind bits of a piece code.
pub const MASK_KIND: u8 = 0x7;
/// Mask selecting the sliding bit of a piece code.
pub const MASK_SLIDE: u8 = 0x4;

/// The six kinds of chess pieces, numbered by their piece code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    King = 3,
    Bishop = 5,
    Rook = 6,
    Queen = 7,
}

impl PieceKind {
    /// All piece kinds in code order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Decodes the kind bits of a piece code.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code & MASK_KIND {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::King),
            5 => Some(PieceKind::Bishop),
            6 => Some(PieceKind::Rook),
            7 => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns the kind bits.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns true for bishops, rooks and queens.
    #[inline]
    pub const fn slides(self) -> bool {
        self.code() & MASK_SLIDE != 0
    }

    /// Returns the lowercase FEN letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::King => 'k',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::King => "King",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
        };
        write!(f, "{}", name)
    }
}

/// The pieces a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    #[default]
    Queen,
}

impl Promotion {
    /// All promotion choices, queen last.
    pub const ALL: [Promotion; 4] = [
        Promotion::Knight,
        Promotion::Bishop,
        Promotion::Rook,
        Promotion::Queen,
    ];

    /// Returns the piece kind this promotion produces.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Queen => PieceKind::Queen,
        }
    }

    /// Parses a promotion letter (`n`, `b`, `r`, `q`, either case).
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(Promotion::Knight),
            'b' => Some(Promotion::Bishop),
            'r' => Some(Promotion::Rook),
            'q' => Some(Promotion::Queen),
            _ => None,
        }
    }

    /// Returns the lowercase UCI letter.
    #[inline]
    pub const fn to_char(self) -> char {
        self.kind().letter()
    }
}

/// A colored piece, stored as its one-byte code.
///
/// The code is never zero, so `Option<Piece>` is still one byte and `None`
/// plays the role of the empty cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(NonZeroU8);

impl Piece {
    /// Creates a piece from color and kind.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        match NonZeroU8::new(color.bit() | kind.code()) {
            Some(code) => Piece(code),
            // kind codes are never zero
            None => unreachable!(),
        }
    }

    /// Decodes a raw piece code. Returns `None` for 0 and for unused codes.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        if code > (MASK_COLOR | MASK_KIND) {
            return None;
        }
        match PieceKind::from_code(code) {
            Some(kind) => Some(Piece::new(Color::from_bit(code), kind)),
            None => None,
        }
    }

    /// Returns the raw code.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0.get()
    }

    /// Returns the color of this piece.
    #[inline]
    pub const fn color(self) -> Color {
        Color::from_bit(self.code())
    }

    /// Returns the kind of this piece.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match PieceKind::from_code(self.code()) {
            Some(kind) => kind,
            None => unreachable!(),
        }
    }

    /// Returns true if this piece moves along rays.
    #[inline]
    pub const fn slides(self) -> bool {
        self.code() & MASK_SLIDE != 0
    }

    /// Returns true if this piece has the given color and kind.
    #[inline]
    pub const fn is(self, color: Color, kind: PieceKind) -> bool {
        self.code() == (color.bit() | kind.code())
    }

    /// Returns the same-colored piece of another kind.
    #[inline]
    pub const fn with_kind(self, kind: PieceKind) -> Self {
        Piece::new(self.color(), kind)
    }

    /// Returns the FEN character (uppercase for White).
    pub const fn to_fen_char(self) -> char {
        let c = self.kind().letter();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'k' => PieceKind::King,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            _ => return None,
        };
        Some(Piece::new(color, kind))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({} {}, {:#x})", self.color(), self.kind(), self.code())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color(), self.kind())
    }
}
