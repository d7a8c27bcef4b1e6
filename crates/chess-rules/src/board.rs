//! Board state on a 0x88 grid.

use std::fmt;

use chess_core::{
    on_board, CastleRights, CastleSide, Color, Fen, FenError, File, Piece, PieceKind, Square,
    GRID_SIZE,
};
use thiserror::Error;

use crate::Terminal;

/// Errors raised when a FEN record parses but does not describe a playable
/// position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(Square),

    #[error("{0} is not to move but is in check")]
    OpponentInCheck(Color),

    #[error("en passant target {0} has no pawn that just advanced past it")]
    InvalidEnPassant(Square),

    #[error("fullmove number {0} is out of range")]
    MoveNumberOutOfRange(u32),
}

/// Largest accepted FEN fullmove number. Leaves the ply counter room to grow.
pub const MAX_FULLMOVE_NUMBER: u32 = u32::MAX / 4;

/// The mutable position.
///
/// Every cell of the 128-entry grid whose index has a bit of `0x88` set is a
/// sentinel and stays empty. The board is only changed through
/// [`make_move`](Board::make_move), [`undo_move`](Board::undo_move) and
/// [`play`](Board::play), which keep the castling, en passant and side to
/// move bookkeeping consistent.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: [Option<Piece>; GRID_SIZE],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    /// Square of the pawn that just advanced two rows (not the square behind it).
    pub(crate) en_passant: Option<Square>,
    pub(crate) move_count: u32,
    /// Captured pieces per color of the captured piece, for offboard layout.
    pub(crate) captured: [u8; 2],
    pub(crate) terminal: Terminal,
}

impl Board {
    /// Creates the standard starting position: White to move, all castle
    /// rights.
    pub fn new() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    fn blank() -> Self {
        Board {
            grid: [None; GRID_SIZE],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            move_count: 0,
            captured: [0; 2],
            terminal: Terminal::Playing,
        }
    }

    /// Creates a position from a FEN string.
    ///
    /// Castle rights whose king or rook is not on its home square are
    /// dropped. The terminal state is computed for the side to move.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parsed = Fen::parse(fen)?;
        Self::from_parsed(&parsed)
    }

    /// Creates a position from an already parsed FEN record.
    pub fn from_parsed(fen: &Fen) -> Result<Self, SetupError> {
        let mut board = Board::blank();

        for tile in 0..64u8 {
            let Some(sq) = Square::from_tile(tile) else {
                continue;
            };
            let piece = fen.piece_at(sq);
            if let Some(p) = piece {
                if p.kind() == PieceKind::Pawn && matches!(sq.row_bits(), 0x00 | 0x70) {
                    return Err(SetupError::PawnOnBackRank(sq));
                }
            }
            board.grid[sq.cell()] = piece;
        }

        for color in [Color::White, Color::Black] {
            let count = board
                .pieces()
                .filter(|(_, p)| p.is(color, PieceKind::King))
                .count();
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        board.side_to_move = fen.side_to_move;
        board.castling = fen.castling;
        board.sanitize_castling();

        if let Some(target) = fen.en_passant {
            let pusher = fen.side_to_move.opposite();
            let pawn = target
                .offset(pusher.pawn_step())
                .filter(|&sq| board.grid[sq.cell()] == Some(Piece::new(pusher, PieceKind::Pawn)))
                .ok_or(SetupError::InvalidEnPassant(target))?;
            board.en_passant = Some(pawn);
        }

        if fen.fullmove_number > MAX_FULLMOVE_NUMBER {
            return Err(SetupError::MoveNumberOutOfRange(fen.fullmove_number));
        }
        let black_moved = u32::from(fen.side_to_move == Color::Black);
        board.move_count = 2 * (fen.fullmove_number - 1) + black_moved;

        let waiting = fen.side_to_move.opposite();
        if board.king_in_check(waiting) {
            return Err(SetupError::OpponentInCheck(waiting));
        }

        board.recompute_terminal();
        Ok(board)
    }

    fn sanitize_castling(&mut self) {
        for color in [Color::White, Color::Black] {
            let king_home = color.back_row() | File::E.index();
            let king_ok = self.grid[king_home as usize] == Some(Piece::new(color, PieceKind::King));
            for side in CastleSide::ALL {
                if !self.castling.has(color, side) {
                    continue;
                }
                let rook_ok = self.grid[side.rook_home(color).cell()]
                    == Some(Piece::new(color, PieceKind::Rook));
                if !(king_ok && rook_ok) {
                    tracing::debug!(%color, ?side, "dropping castle right without king and rook at home");
                    self.castling.remove(color, side);
                }
            }
        }
    }

    /// Writes the position as FEN. The halfmove clock is not tracked and is
    /// always written as 0.
    pub fn to_fen(&self) -> String {
        let mut placement = [None; 64];
        for (sq, piece) in self.pieces() {
            placement[sq.tile() as usize] = Some(piece);
        }
        let pusher = self.side_to_move.opposite();
        let fen = Fen {
            placement,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self
                .en_passant
                .and_then(|pawn| pawn.offset(-pusher.pawn_step())),
            halfmove_clock: 0,
            fullmove_number: self.move_count / 2 + 1,
        };
        fen.to_string()
    }

    /// Returns the piece on an on-board square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.cell()]
    }

    /// Returns the content of a raw grid cell, sentinels included.
    ///
    /// Indices past the grid read as empty.
    #[inline]
    pub fn cell(&self, index: u8) -> Option<Piece> {
        self.grid.get(index as usize).copied().flatten()
    }

    /// Returns the raw grid.
    #[inline]
    pub fn grid(&self) -> &[Option<Piece>; GRID_SIZE] {
        &self.grid
    }

    /// Iterates over occupied squares in grid order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..GRID_SIZE as u8)
            .filter(|&i| on_board(i))
            .filter_map(move |i| Some((Square::from_index(i)?, self.grid[i as usize]?)))
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the remaining castle rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Returns the square of the pawn that may be captured en passant.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the number of plies made on this board.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns how many pieces of `color` have been captured in applied
    /// moves.
    #[inline]
    pub fn captured_count(&self, color: Color) -> u8 {
        self.captured[color.index()]
    }

    /// Returns the terminal state computed after the last applied move.
    #[inline]
    pub fn terminal(&self) -> Terminal {
        self.terminal
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for file in 0..8u8 {
                let c = self.grid[(row * 16 + file) as usize].map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("move_count", &self.move_count)
            .field("captured", &self.captured)
            .field("terminal", &self.terminal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Rank;

    #[test]
    fn startpos_layout() {
        let board = Board::new();
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.castling(), CastleRights::ALL);
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.move_count(), 0);
        assert_eq!(board.terminal(), Terminal::Playing);
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(board.cell(0x64).map(Piece::code), Some(0x1));
        assert_eq!(board.cell(0x14).map(Piece::code), Some(0x9));
    }

    #[test]
    fn sentinels_start_empty() {
        let board = Board::new();
        for i in 0..GRID_SIZE as u8 {
            if !on_board(i) {
                assert_eq!(board.cell(i), None, "cell {i:#x}");
            }
        }
        assert_eq!(board.cell(200), None);
    }

    #[test]
    fn startpos_fen_roundtrip() {
        assert_eq!(Board::new().to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn en_passant_is_stored_on_the_pawn() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.en_passant(), Some(Square::new(File::E, Rank::R4)));
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn en_passant_without_pawn_is_rejected() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1";
        assert!(matches!(
            Board::from_fen(fen),
            Err(SetupError::InvalidEnPassant(_))
        ));
    }

    #[test]
    fn move_count_from_fullmove_number() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 12").unwrap();
        assert_eq!(board.move_count(), 22);
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 12").unwrap();
        assert_eq!(board.move_count(), 23);
    }

    #[test]
    fn huge_fullmove_number_is_rejected() {
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 4294967295"),
            Err(SetupError::MoveNumberOutOfRange(u32::MAX))
        );
        let fen = format!("4k3/8/8/8/8/8/8/4K3 b - - 0 {MAX_FULLMOVE_NUMBER}");
        let board = Board::from_fen(&fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn castle_rights_need_pieces_at_home() {
        let board = Board::from_fen("r3k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").unwrap();
        assert!(board.castling().has(Color::White, CastleSide::Kingside));
        assert!(!board.castling().has(Color::White, CastleSide::Queenside));
        assert!(board.castling().has(Color::Black, CastleSide::Queenside));
        assert!(!board.castling().has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn setup_errors() {
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(SetupError::KingCount {
                color: Color::Black,
                count: 0
            })
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(SetupError::KingCount {
                color: Color::White,
                count: 2
            })
        ));
        assert!(matches!(
            Board::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(SetupError::PawnOnBackRank(Square::A8))
        ));
        // Black king attacked by the rook with White to move
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1"),
            Err(SetupError::OpponentInCheck(Color::Black))
        ));
        assert!(matches!(
            Board::from_fen("not a fen"),
            Err(SetupError::Fen(FenError::InvalidFieldCount(3)))
        ));
    }

    #[test]
    fn display_diagram() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
