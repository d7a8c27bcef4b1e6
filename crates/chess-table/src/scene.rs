//! The table's own picture of the pieces.
//!
//! The scene never reads the rules engine's grid after setup. It is kept in
//! step purely by replaying [`Event`]s, the same way a 3D front end moves
//! its piece entities, and holds the capture trays beside the board.

use chess_core::{Color, Piece, Square};
use chess_rules::{Board, Destination, Event, Outcome};

/// Pieces on the table, by tile, plus one tray of captured pieces per color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    tiles: [Option<Piece>; 64],
    trays: [Vec<Option<Piece>>; 2],
    outcome: Option<Outcome>,
}

impl Scene {
    /// Lays out the pieces of `board`. Trays start empty.
    pub fn from_board(board: &Board) -> Self {
        let mut tiles = [None; 64];
        for (sq, piece) in board.pieces() {
            tiles[sq.tile() as usize] = Some(piece);
        }
        Scene {
            tiles,
            trays: [Vec::new(), Vec::new()],
            outcome: board.terminal().outcome(),
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.tiles[sq.tile() as usize]
    }

    /// Captured pieces of `color` in slot order.
    pub fn tray(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.trays[color.index()].iter().flatten().copied()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Applies one event.
    pub fn apply(&mut self, event: &Event) {
        match *event {
            Event::PieceMoved { from, to } => {
                let piece = self.take(from);
                self.tiles[to.tile() as usize] = piece;
            }
            Event::SecondaryMoved {
                from,
                to: Destination::Square(to),
            } => {
                let piece = self.take(from);
                self.tiles[to.tile() as usize] = piece;
            }
            Event::SecondaryMoved {
                from,
                to: Destination::Offboard { color, slot },
            } => {
                let piece = self.take(from);
                let tray = &mut self.trays[color.index()];
                let slot = slot as usize;
                if tray.len() <= slot {
                    tray.resize(slot + 1, None);
                }
                tray[slot] = piece;
            }
            Event::Promoted { at, to } => {
                let tile = &mut self.tiles[at.tile() as usize];
                *tile = tile.map(|p| p.with_kind(to));
            }
            Event::GameEnded { outcome } => self.outcome = Some(outcome),
        }
    }

    fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.tiles[sq.tile() as usize].take();
        if piece.is_none() {
            tracing::warn!(%sq, "event refers to an empty square");
        }
        piece
    }

    /// Returns true if the scene shows the same pieces as `board`.
    pub fn matches(&self, board: &Board) -> bool {
        (0..64u8)
            .filter_map(Square::from_tile)
            .all(|sq| self.piece_at(sq) == board.piece_at(sq))
    }
}
