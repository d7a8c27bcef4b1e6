//! Applying and reverting moves in place.

use chess_core::{CastleRights, CastleSide, Piece, PieceKind, Promotion, Square, MASK_ROW};

use crate::Board;

/// How a move changed the board besides relocating the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Plain,
    Capture,
    Castle,
}

/// Everything [`Board::undo_move`] needs to restore the position a move was
/// made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    kind: MoveKind,
    captured: Option<Piece>,
    capture_square: Square,
    rook: Option<(Square, Square)>,
    prior_castling: CastleRights,
    prior_en_passant: Option<Square>,
    promotion: Option<PieceKind>,
}

impl MoveRecord {
    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The piece removed from the board, if any.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Where the captured piece stood. Differs from the destination only for
    /// en passant.
    #[inline]
    pub fn capture_square(&self) -> Square {
        self.capture_square
    }

    /// The corner the castling rook left.
    #[inline]
    pub fn rook_from(&self) -> Option<Square> {
        self.rook.map(|(from, _)| from)
    }

    /// The square the castling rook landed on.
    #[inline]
    pub fn rook_to(&self) -> Option<Square> {
        self.rook.map(|(_, to)| to)
    }

    #[inline]
    pub fn prior_castling(&self) -> CastleRights {
        self.prior_castling
    }

    #[inline]
    pub fn prior_en_passant(&self) -> Option<Square> {
        self.prior_en_passant
    }

    /// The kind a pawn was promoted to.
    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }
}

/// Returns the rook's corner and landing square when the king on `king`
/// castles toward `wing`: queenside `king - 4 -> king - 1`, kingside
/// `king + 3 -> king + 1`.
pub(crate) fn castle_rook_squares(king: Square, wing: CastleSide) -> Option<(Square, Square)> {
    match wing {
        CastleSide::Queenside => Some((king.offset(-4)?, king.offset(-1)?)),
        CastleSide::Kingside => Some((king.offset(3)?, king.offset(1)?)),
    }
}

#[inline]
pub(crate) fn on_last_row(sq: Square) -> bool {
    matches!(sq.index() & MASK_ROW, 0x00 | 0x70)
}

impl Board {
    /// Moves the piece on `from` to `to`, promoting pawns to a queen.
    ///
    /// No legality check is made; callers are expected to consult
    /// [`is_pseudo_legal`](Board::is_pseudo_legal) or
    /// [`is_legal`](Board::is_legal) first.
    ///
    /// # Panics
    ///
    /// Panics if `from` is empty.
    pub fn make_move(&mut self, from: Square, to: Square) -> MoveRecord {
        self.make_move_promoting(from, to, Promotion::Queen)
    }

    /// Like [`make_move`](Board::make_move) with an explicit promotion
    /// choice. The choice is ignored unless a pawn reaches its last row.
    ///
    /// # Panics
    ///
    /// Panics if `from` is empty.
    pub fn make_move_promoting(
        &mut self,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> MoveRecord {
        let mover = self.grid[from.cell()]
            .unwrap_or_else(|| panic!("make_move: no piece on {from}"));
        let side = mover.color();
        let captured = self.grid[to.cell()];

        let mut record = MoveRecord {
            kind: if captured.is_some() {
                MoveKind::Capture
            } else {
                MoveKind::Plain
            },
            captured,
            capture_square: to,
            rook: None,
            prior_castling: self.castling,
            prior_en_passant: self.en_passant,
            promotion: None,
        };

        let distance = (to.index() as i16 - from.index() as i16).abs();
        let mut en_passant = None;

        match mover.kind() {
            PieceKind::King => {
                self.castling.remove_color(side);
                if distance == 2 {
                    let wing = CastleSide::of_king_move(from, to);
                    if let Some((rook_from, rook_to)) = castle_rook_squares(from, wing) {
                        self.grid[rook_to.cell()] = self.grid[rook_from.cell()].take();
                        record.kind = MoveKind::Castle;
                        record.rook = Some((rook_from, rook_to));
                    }
                }
            }
            PieceKind::Rook => {
                if let Some(wing) = CastleSide::from_rook_home(from, side) {
                    self.castling.remove(side, wing);
                }
            }
            PieceKind::Pawn => {
                if distance == 32 {
                    en_passant = Some(to);
                } else if matches!(distance, 15 | 17) && captured.is_none() {
                    let behind = to.index() as i16 - side.pawn_step();
                    if let Some(victim) = self.en_passant.filter(|v| v.index() as i16 == behind) {
                        record.captured = self.grid[victim.cell()];
                        record.capture_square = victim;
                        record.kind = MoveKind::Capture;
                    }
                }
                if on_last_row(to) {
                    record.promotion = Some(promotion.kind());
                }
            }
            _ => {}
        }

        if let Some(victim) = record.captured {
            if victim.kind() == PieceKind::Rook {
                if let Some(wing) = CastleSide::from_rook_home(record.capture_square, victim.color())
                {
                    self.castling.remove(victim.color(), wing);
                }
            }
        }

        let placed = match record.promotion {
            Some(kind) => mover.with_kind(kind),
            None => mover,
        };
        self.grid[record.capture_square.cell()] = None;
        self.grid[from.cell()] = None;
        self.grid[to.cell()] = Some(placed);

        self.en_passant = en_passant;
        self.side_to_move = self.side_to_move.opposite();
        self.move_count += 1;
        record
    }

    /// Reverts a move made with [`make_move`](Board::make_move). `from`,
    /// `to` and `record` must be those of the most recent make.
    pub fn undo_move(&mut self, from: Square, to: Square, record: &MoveRecord) {
        let moved = self.grid[to.cell()].take();
        self.grid[from.cell()] = match (moved, record.promotion) {
            (Some(piece), Some(_)) => Some(piece.with_kind(PieceKind::Pawn)),
            _ => moved,
        };
        self.grid[record.capture_square.cell()] = record.captured;

        if let Some((rook_from, rook_to)) = record.rook {
            self.grid[rook_from.cell()] = self.grid[rook_to.cell()].take();
        }

        self.castling = record.prior_castling;
        self.en_passant = record.prior_en_passant;
        self.side_to_move = self.side_to_move.opposite();
        self.move_count -= 1;
    }
}
