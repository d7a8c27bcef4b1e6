//! King safety and the legal-move filter.
//!
//! Legality is decided by simulation: the move is made, the mover's king is
//! tested for attack, and the move is undone. Queries that take `&self` run
//! the simulation on a scratch copy so observers never see a half-made move.

use std::fmt;

use chess_core::{on_board, Color, Move, PieceKind, Promotion, Square, GRID_SIZE};

use crate::make::on_last_row;
use crate::Board;

/// Legal destinations of one piece as a 64-bit mask indexed by tile
/// (`file + 8 * row`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Highlight(u64);

impl Highlight {
    pub const EMPTY: Highlight = Highlight(0);

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Highlight(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1 << sq.tile();
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.is_lit(sq.tile())
    }

    /// Returns true if the tile's bit is set. Tiles past 63 are never lit.
    #[inline]
    pub const fn is_lit(self, tile: u8) -> bool {
        tile < 64 && self.0 & (1 << tile) != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the lit squares in tile order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..64u8)
            .filter(move |&tile| self.is_lit(tile))
            .filter_map(Square::from_tile)
    }

    /// Expands the mask into one flag per tile.
    pub fn to_array(self) -> [bool; 64] {
        std::array::from_fn(|tile| self.is_lit(tile as u8))
    }
}

impl fmt::Debug for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.squares()).finish()
    }
}

impl Board {
    /// Returns the square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// Returns true if any piece of `color`'s opponent could pseudo-legally
    /// move onto `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king on the board.
    pub fn king_in_check(&self, color: Color) -> bool {
        let king = self
            .king_square(color)
            .unwrap_or_else(|| panic!("king_in_check: no {color} king on the board"));
        self.is_attacked_by(color.opposite(), king.index())
    }

    fn is_attacked_by(&self, attacker: Color, target: u8) -> bool {
        (0..GRID_SIZE as u8)
            .filter(|&i| on_board(i))
            .any(|i| self.reaches(attacker, i, target))
    }

    /// Makes the move, tests the mover's king and undoes the move again.
    /// Returns false when `from` is empty.
    pub fn leaves_own_king_safe(&mut self, from: Square, to: Square) -> bool {
        let Some(mover) = self.piece_at(from) else {
            return false;
        };
        let record = self.make_move(from, to);
        let attacked = self.king_in_check(mover.color());
        self.undo_move(from, to, &record);
        !attacked
    }

    /// Pseudo-legal and king-safe. Castling additionally needs the king out
    /// of check and the square it passes over unattacked.
    pub(crate) fn check_legal(&mut self, from: u8, to: u8) -> bool {
        if !self.is_pseudo_legal(from, to) {
            return false;
        }
        let (Some(from), Some(to)) = (Square::from_index(from), Square::from_index(to)) else {
            return false;
        };
        let castling = self.piece_at(from).is_some_and(|p| p.kind() == PieceKind::King)
            && (to.index() as i16 - from.index() as i16).abs() == 2;
        if castling {
            let step = if to.index() > from.index() { 1 } else { -1 };
            let Some(transit) = from.offset(step) else {
                return false;
            };
            if self.king_in_check(self.side_to_move) || !self.leaves_own_king_safe(from, transit)
            {
                return false;
            }
        }
        self.leaves_own_king_safe(from, to)
    }

    /// Returns true if the side to move may legally move from `from` to `to`
    /// (raw 0x88 indices).
    pub fn is_legal(&self, from: u8, to: u8) -> bool {
        // cheap rejection before cloning the grid
        if !self.is_pseudo_legal(from, to) {
            return false;
        }
        self.clone().check_legal(from, to)
    }

    /// Legal destinations of the piece on `from`.
    pub fn highlight(&self, from: Square) -> Highlight {
        let mut scratch = self.clone();
        let mut mask = Highlight::EMPTY;
        for to in (0..GRID_SIZE as u8).filter_map(Square::from_index) {
            if scratch.check_legal(from.index(), to.index()) {
                mask.insert(to);
            }
        }
        mask
    }

    /// Enumerates every legal move of the side to move in grid order. A pawn
    /// move onto the last row appears once per promotion choice.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut scratch = self.clone();
        let mut moves = Vec::new();
        let movers: Vec<(Square, PieceKind)> = self
            .pieces()
            .filter(|(_, p)| p.color() == self.side_to_move)
            .map(|(sq, p)| (sq, p.kind()))
            .collect();
        for (from, kind) in movers {
            for to in (0..GRID_SIZE as u8).filter_map(Square::from_index) {
                if !scratch.check_legal(from.index(), to.index()) {
                    continue;
                }
                if kind == PieceKind::Pawn && on_last_row(to) {
                    moves.extend(Promotion::ALL.map(|p| Move::promoting(from, to, p)));
                } else {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Returns true if the side to move has at least one legal move.
    pub fn has_legal_move(&self) -> bool {
        let mut scratch = self.clone();
        let movers: Vec<Square> = self
            .pieces()
            .filter(|(_, p)| p.color() == self.side_to_move)
            .map(|(sq, _)| sq)
            .collect();
        movers.into_iter().any(|from| {
            (0..GRID_SIZE as u8)
                .filter(|&to| on_board(to))
                .any(|to| scratch.check_legal(from.index(), to))
        })
    }
}
