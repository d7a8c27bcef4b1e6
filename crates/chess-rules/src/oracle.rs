//! Pseudo-legal move oracle.
//!
//! The oracle answers "may the piece on `from` move to `to`" from the
//! difference of the two 0x88 indices alone, ignoring whether the mover's
//! king is left attacked. Off-board targets are rejected with a single AND,
//! so every `(from, to)` pair in `0..128` can be asked about.

use chess_core::{on_board, CastleSide, Color, PieceKind, Square, MASK_FILE, MASK_ROW};

use crate::make::castle_rook_squares;
use crate::Board;

impl Board {
    /// Returns true iff moving the piece on `from` to `to` obeys the
    /// movement rules for the side to move, ignoring king safety.
    ///
    /// Both arguments are raw 0x88 indices. The answer is false whenever
    /// either index is off the board.
    #[inline]
    pub fn is_pseudo_legal(&self, from: u8, to: u8) -> bool {
        self.reaches(self.side_to_move, from, to)
    }

    /// The oracle for an explicit mover. King safety uses this to ask what
    /// the side not on move could do without flipping `side_to_move`.
    pub(crate) fn reaches(&self, side: Color, from: u8, to: u8) -> bool {
        if !on_board(from) || !on_board(to) {
            return false;
        }
        let Some(mover) = self.grid[from as usize] else {
            return false;
        };
        if mover.color() != side {
            return false;
        }
        let target = self.grid[to as usize];
        if target.is_some_and(|p| p.color() == side) {
            return false;
        }

        let distance = (to as i16 - from as i16).abs();
        let can_move = match mover.kind() {
            PieceKind::Pawn => self.pawn_reaches(side, from, to, target.is_some()),
            PieceKind::Knight => matches!(distance, 14 | 18 | 31 | 33),
            PieceKind::King => {
                matches!(distance, 1 | 15 | 16 | 17)
                    || (distance == 2 && self.castle_path_open(side, from, to))
            }
            PieceKind::Bishop => on_diagonal(distance),
            PieceKind::Rook => on_line(from, to),
            PieceKind::Queen => on_diagonal(distance) || on_line(from, to),
        };

        can_move && (!mover.slides() || self.path_clear(from, to))
    }

    fn pawn_reaches(&self, side: Color, from: u8, to: u8, capturing: bool) -> bool {
        let delta = to as i16 - from as i16;
        // White pawns move toward lower indices
        let forward = match side {
            Color::White => delta < 0,
            Color::Black => delta > 0,
        };
        if !forward {
            return false;
        }
        match delta.abs() {
            16 => !capturing,
            15 | 17 => capturing || self.en_passant_victim_beside(side, to),
            32 => {
                let skipped = (from as i16 + side.pawn_step()) as usize;
                !capturing && from & MASK_ROW == side.pawn_row() && self.grid[skipped].is_none()
            }
            _ => false,
        }
    }

    /// A diagonal step onto an empty square is an en passant capture when
    /// the pawn that just double-pushed sits right behind the target.
    fn en_passant_victim_beside(&self, side: Color, to: u8) -> bool {
        let behind = to as i16 - side.pawn_step();
        self.en_passant
            .is_some_and(|pawn| pawn.index() as i16 == behind)
    }

    /// Castling is allowed while the wing's bit is set and the rook could
    /// itself slide to the square beside the king. The rook slide checks
    /// every cell it passes, which covers the squares the king crosses too.
    fn castle_path_open(&self, side: Color, from: u8, to: u8) -> bool {
        let (Some(king), Some(dest)) = (Square::from_index(from), Square::from_index(to)) else {
            return false;
        };
        let wing = CastleSide::of_king_move(king, dest);
        if !self.castling.has(side, wing) {
            return false;
        }
        let Some((rook_from, rook_to)) = castle_rook_squares(king, wing) else {
            return false;
        };
        self.grid[rook_to.cell()].is_none() && self.reaches(side, rook_from.index(), rook_to.index())
    }

    fn path_clear(&self, from: u8, to: u8) -> bool {
        let delta = to as i16 - from as i16;
        let step = slide_step(delta);
        let mut cell = from as i16 + step;
        while cell != to as i16 {
            if self.grid[cell as usize].is_some() {
                return false;
            }
            cell += step;
        }
        true
    }
}

#[inline]
fn on_diagonal(distance: i16) -> bool {
    distance % 15 == 0 || distance % 17 == 0
}

#[inline]
fn on_line(from: u8, to: u8) -> bool {
    from & MASK_FILE == to & MASK_FILE || from & MASK_ROW == to & MASK_ROW
}

/// Ray step from the sign and magnitude of an index difference.
fn slide_step(delta: i16) -> i16 {
    let magnitude = if delta % 17 == 0 {
        17
    } else if delta % 15 == 0 {
        15
    } else if delta % 16 == 0 {
        16
    } else {
        1
    };
    if delta < 0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> u8 {
        Square::from_algebraic(name).unwrap().index()
    }

    fn targets(board: &Board, from: &str) -> Vec<String> {
        let from = sq(from);
        let mut names: Vec<String> = (0..128u8)
            .filter(|&to| board.is_pseudo_legal(from, to))
            .filter_map(Square::from_index)
            .map(Square::to_algebraic)
            .collect();
        names.sort();
        names
    }

    #[test]
    fn steps() {
        assert_eq!(slide_step(-17 * 3), -17);
        assert_eq!(slide_step(15 * 2), 15);
        assert_eq!(slide_step(-16 * 5), -16);
        assert_eq!(slide_step(6), 1);
        assert_eq!(slide_step(-3), -1);
    }

    #[test]
    fn off_board_targets_rejected() {
        let board = Board::new();
        assert!(!board.is_pseudo_legal(sq("a2"), 0x5F));
        assert!(!board.is_pseudo_legal(sq("h2"), sq("h2") + 1));
        assert!(!board.is_pseudo_legal(0x08, sq("a3")));
        assert!(!board.is_pseudo_legal(sq("b1"), 0x80 | 0x50));
    }

    #[test]
    fn empty_or_wrong_color_source_rejected() {
        let board = Board::new();
        assert!(!board.is_pseudo_legal(sq("e4"), sq("e5")));
        assert!(!board.is_pseudo_legal(sq("e7"), sq("e5")));
    }

    #[test]
    fn opening_moves() {
        let board = Board::new();
        assert_eq!(targets(&board, "e2"), ["e3", "e4"]);
        assert_eq!(targets(&board, "g1"), ["f3", "h3"]);
        assert!(targets(&board, "f1").is_empty());
        assert!(targets(&board, "d1").is_empty());
        assert!(targets(&board, "e1").is_empty());
        assert!(targets(&board, "a1").is_empty());
    }

    #[test]
    fn pawns_do_not_move_backwards_or_capture_forward() {
        let board = Board::from_fen("4k3/8/8/3p4/3P4/8/8/4K3 w - - 0 1").unwrap();
        assert!(targets(&board, "d4").is_empty());
        let board = Board::from_fen("4k3/8/8/2p5/3P4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(targets(&board, "d4"), ["c5", "d5"]);
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(targets(&board, "e2").is_empty());
        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(targets(&board, "e2"), ["e3"]);
    }

    #[test]
    fn knights_wrap_is_off_board() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        assert_eq!(targets(&board, "a1"), ["b3", "c2"]);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let board = Board::from_fen("4k3/8/8/1p6/8/3B4/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(
            targets(&board, "d3"),
            ["b1", "b5", "c2", "c4", "e2", "e4", "f1", "f5", "g6", "h7"]
        );
        assert_eq!(
            targets(&board, "a1"),
            ["a2", "a3", "a4", "a5", "a6", "a7", "a8", "b1", "c1", "d1"]
        );
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let board = Board::from_fen("4k3/8/8/8/8/8/1Q6/K7 w - - 0 1").unwrap();
        let moves = targets(&board, "b2");
        // rank, file and the two diagonals, the king on a1 blocking one of them
        assert_eq!(moves.len(), 7 + 7 + 6 + 2);
        assert!(moves.contains(&"h8".to_string()));
        assert!(moves.contains(&"b8".to_string()));
        assert!(!moves.contains(&"a1".to_string()));
    }

    #[test]
    fn en_passant_only_beside_the_pushed_pawn() {
        let board = Board::from_fen("4k3/8/8/2pPp3/8/8/8/4K3 w - e6 0 2").unwrap();
        assert_eq!(targets(&board, "d5"), ["d6", "e6"]);
    }

    #[test]
    fn castling_through_pieces_is_blocked() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R2QK1NR w KQ - 0 1").unwrap();
        let moves = targets(&board, "e1");
        assert!(!moves.contains(&"g1".to_string()));
        assert!(!moves.contains(&"c1".to_string()));

        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = targets(&board, "e1");
        assert!(moves.contains(&"g1".to_string()));
        assert!(moves.contains(&"c1".to_string()));
    }

    #[test]
    fn castling_needs_the_right() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1").unwrap();
        let moves = targets(&board, "e1");
        assert!(!moves.contains(&"g1".to_string()));
        assert!(moves.contains(&"c1".to_string()));
    }

    #[test]
    fn castling_rejects_enemy_on_rook_landing_square() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R2nK2R w KQ - 0 1").unwrap();
        let moves = targets(&board, "e1");
        assert!(!moves.contains(&"c1".to_string()));
        assert!(moves.contains(&"d1".to_string()));
    }

    #[test]
    fn oracle_for_waiting_side() {
        let board = Board::new();
        assert!(board.reaches(Color::Black, sq("g8"), sq("f6")));
        assert!(!board.reaches(Color::Black, sq("g1"), sq("f3")));
    }
}
