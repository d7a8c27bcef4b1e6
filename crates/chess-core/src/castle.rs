//! Castling rights.

use std::fmt;

use crate::{Color, Square};

/// The two castling wings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastleSide {
    /// Long castling, toward the a-file rook.
    Queenside = 0,
    /// Short castling, toward the h-file rook.
    Kingside = 1,
}

impl CastleSide {
    /// Both wings, queenside first.
    pub const ALL: [CastleSide; 2] = [CastleSide::Queenside, CastleSide::Kingside];

    /// Returns the wing a king move from `from` to `to` castles toward.
    #[inline]
    pub const fn of_king_move(from: Square, to: Square) -> Self {
        if to.index() < from.index() {
            CastleSide::Queenside
        } else {
            CastleSide::Kingside
        }
    }

    /// Returns the starting corner of this wing's rook for `color`.
    #[inline]
    pub const fn rook_home(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Queenside => 0,
            CastleSide::Kingside => 7,
        };
        match Square::from_index(color.back_row() | file) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the wing whose rook starts on `sq`, if `sq` is a corner of
    /// `color`'s back rank.
    pub const fn from_rook_home(sq: Square, color: Color) -> Option<Self> {
        if sq.row_bits() != color.back_row() {
            return None;
        }
        match sq.file_index() {
            0 => Some(CastleSide::Queenside),
            7 => Some(CastleSide::Kingside),
            _ => None,
        }
    }
}

/// Four castle bits, two per side.
///
/// The pair belonging to a side is selected by shifting by
/// [`Color::castle_shift`]; within a pair bit 0 is queenside and bit 1 is
/// kingside.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// Creates rights from raw bits (upper bits are discarded).
    #[inline]
    pub const fn new(bits: u8) -> Self {
        CastleRights(bits & 0b1111)
    }

    #[inline]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        1 << (color.castle_shift() + side as u8)
    }

    /// Returns true if `color` may still castle toward `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Removes one wing for a color.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes both wings for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(0b11 << color.castle_shift());
    }

    /// Returns true if no bits remain set that are not also set in `earlier`.
    #[inline]
    pub const fn is_subset_of(self, earlier: CastleRights) -> bool {
        self.0 & !earlier.0 == 0
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Parses the FEN castling field ("KQkq", "-", or any subset).
    pub fn from_fen(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(CastleRights::NONE);
        }
        if field.is_empty() {
            return None;
        }
        let mut rights = CastleRights::NONE;
        for c in field.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::Kingside),
                'Q' => (Color::White, CastleSide::Queenside),
                'k' => (Color::Black, CastleSide::Kingside),
                'q' => (Color::Black, CastleSide::Queenside),
                _ => return None,
            };
            rights.0 |= Self::flag(color, side);
        }
        Some(rights)
    }
}

impl fmt::Display for CastleRights {
    /// Writes the FEN castling field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        let letters = [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ];
        for (color, side, letter) in letters {
            if self.has(color, side) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({}, {:#06b})", self, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout() {
        let mut rights = CastleRights::NONE;
        rights.0 |= CastleRights::flag(Color::White, CastleSide::Queenside);
        assert_eq!(rights.raw(), 0b0001);
        rights.0 |= CastleRights::flag(Color::White, CastleSide::Kingside);
        assert_eq!(rights.raw(), 0b0011);
        rights.0 |= CastleRights::flag(Color::Black, CastleSide::Queenside);
        assert_eq!(rights.raw(), 0b0111);
        rights.0 |= CastleRights::flag(Color::Black, CastleSide::Kingside);
        assert_eq!(rights, CastleRights::ALL);
    }

    #[test]
    fn remove_one_wing() {
        let mut rights = CastleRights::ALL;
        rights.remove(Color::White, CastleSide::Kingside);
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::White, CastleSide::Queenside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));
        assert!(rights.is_subset_of(CastleRights::ALL));
        assert!(!CastleRights::ALL.is_subset_of(rights));
    }

    #[test]
    fn remove_color() {
        let mut rights = CastleRights::ALL;
        rights.remove_color(Color::Black);
        assert_eq!(rights.raw(), 0b0011);
        rights.remove_color(Color::White);
        assert_eq!(rights, CastleRights::NONE);
    }

    #[test]
    fn rook_homes() {
        assert_eq!(CastleSide::Queenside.rook_home(Color::White), Square::A1);
        assert_eq!(CastleSide::Kingside.rook_home(Color::White), Square::H1);
        assert_eq!(CastleSide::Queenside.rook_home(Color::Black), Square::A8);
        assert_eq!(CastleSide::Kingside.rook_home(Color::Black), Square::H8);
        assert_eq!(
            CastleSide::from_rook_home(Square::H1, Color::White),
            Some(CastleSide::Kingside)
        );
        assert_eq!(CastleSide::from_rook_home(Square::H1, Color::Black), None);
        assert_eq!(CastleSide::from_rook_home(Square::E1, Color::White), None);
    }

    #[test]
    fn wing_of_king_move() {
        assert_eq!(
            CastleSide::of_king_move(Square::E1, Square::G1),
            CastleSide::Kingside
        );
        assert_eq!(
            CastleSide::of_king_move(Square::E8, Square::C8),
            CastleSide::Queenside
        );
    }

    #[test]
    fn fen_field() {
        assert_eq!(CastleRights::from_fen("KQkq"), Some(CastleRights::ALL));
        assert_eq!(CastleRights::from_fen("-"), Some(CastleRights::NONE));
        assert_eq!(CastleRights::from_fen("Kq").map(|r| r.raw()), Some(0b0110));
        assert_eq!(CastleRights::from_fen("X"), None);
        assert_eq!(CastleRights::from_fen(""), None);
        assert_eq!(CastleRights::ALL.to_string(), "KQkq");
        assert_eq!(CastleRights::new(0b0110).to_string(), "Kq");
        assert_eq!(CastleRights::NONE.to_string(), "-");
    }
}
