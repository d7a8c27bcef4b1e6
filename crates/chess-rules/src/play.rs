//! Applying moves from outside the rules engine.
//!
//! [`Board::play`] is the checked counterpart of [`Board::make_move`]: it
//! refuses illegal input, keeps the capture counters and recomputes the
//! terminal state. Moves applied this way are never undone.

use chess_core::{Color, Move, Piece, PieceKind, Square};
use thiserror::Error;

use crate::make::on_last_row;
use crate::{Board, MoveRecord, Outcome, Terminal};

/// Why [`Board::play`] refused a move.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is over: {0}")]
    GameOver(Outcome),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} is {color} but {to_move} is to move")]
    WrongColor {
        square: Square,
        color: Color,
        to_move: Color,
    },

    #[error("illegal move {0}")]
    Illegal(Move),
}

/// A move that was applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Played {
    /// The move as applied. A promoting move always names its piece.
    pub mov: Move,
    /// The piece that moved, before any promotion.
    pub mover: Piece,
    pub record: MoveRecord,
    /// Offboard slot of the captured piece among its color's captures.
    pub capture_slot: Option<u8>,
    /// Terminal state after the move.
    pub terminal: Terminal,
}

impl Board {
    /// Applies a legal move for the side to move.
    ///
    /// A pawn reaching the last row without a promotion choice becomes a
    /// queen; a promotion choice on any other move is dropped.
    pub fn play(&mut self, mov: Move) -> Result<Played, MoveError> {
        if let Some(outcome) = self.terminal.outcome() {
            return Err(MoveError::GameOver(outcome));
        }
        let mover = self
            .piece_at(mov.from)
            .ok_or(MoveError::EmptySquare(mov.from))?;
        if mover.color() != self.side_to_move {
            return Err(MoveError::WrongColor {
                square: mov.from,
                color: mover.color(),
                to_move: self.side_to_move,
            });
        }
        if !self.check_legal(mov.from.index(), mov.to.index()) {
            tracing::trace!(%mov, "rejected illegal move");
            return Err(MoveError::Illegal(mov));
        }

        let promotion = (mover.kind() == PieceKind::Pawn && on_last_row(mov.to))
            .then(|| mov.promotion.unwrap_or_default());
        let record = self.make_move_promoting(mov.from, mov.to, promotion.unwrap_or_default());

        let capture_slot = record.captured().map(|victim| {
            let count = &mut self.captured[victim.color().index()];
            let slot = *count;
            *count += 1;
            slot
        });

        let applied = Move {
            from: mov.from,
            to: mov.to,
            promotion,
        };
        tracing::debug!(
            mov = %applied,
            kind = ?record.kind(),
            move_count = self.move_count,
            "applied move"
        );

        let terminal = self.recompute_terminal();
        Ok(Played {
            mov: applied,
            mover,
            record,
            capture_slot,
            terminal,
        })
    }

    /// Parses a UCI move and plays it.
    pub fn play_uci(&mut self, uci: &str) -> Result<Played, PlayUciError> {
        let mov = Move::from_uci(uci).ok_or_else(|| PlayUciError::Notation(uci.to_string()))?;
        Ok(self.play(mov)?)
    }
}

/// Error from [`Board::play_uci`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayUciError {
    #[error("invalid UCI move '{0}'")]
    Notation(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}
