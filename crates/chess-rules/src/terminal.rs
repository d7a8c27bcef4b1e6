//! Checkmate and stalemate detection.

use std::fmt;

use chess_core::Color;
use serde::{Deserialize, Serialize};

use crate::Board;

/// Whether the game is still running and, if not, how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terminal {
    #[default]
    Playing,
    WhiteWinsByMate,
    BlackWinsByMate,
    DrawByStalemate,
}

impl Terminal {
    /// Returns the outcome of a finished game.
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Terminal::Playing => None,
            Terminal::WhiteWinsByMate => Some(Outcome::WhiteMate),
            Terminal::BlackWinsByMate => Some(Outcome::BlackMate),
            Terminal::DrawByStalemate => Some(Outcome::Stalemate),
        }
    }

    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Terminal::Playing)
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteMate,
    BlackMate,
    Stalemate,
}

impl Outcome {
    /// Returns the winning color, or `None` for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::WhiteMate => Some(Color::White),
            Outcome::BlackMate => Some(Color::Black),
            Outcome::Stalemate => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::WhiteMate => write!(f, "White wins by checkmate"),
            Outcome::BlackMate => write!(f, "Black wins by checkmate"),
            Outcome::Stalemate => write!(f, "Draw by stalemate"),
        }
    }
}

impl Board {
    /// Classifies the position for the side to move without storing the
    /// result.
    pub fn evaluate_terminal(&self) -> Terminal {
        if self.has_legal_move() {
            return Terminal::Playing;
        }
        let side = self.side_to_move;
        if !self.king_in_check(side) {
            return Terminal::DrawByStalemate;
        }
        match side.opposite() {
            Color::White => Terminal::WhiteWinsByMate,
            Color::Black => Terminal::BlackWinsByMate,
        }
    }

    /// Recomputes and stores the terminal state. Called after every applied
    /// move.
    pub fn recompute_terminal(&mut self) -> Terminal {
        self.terminal = self.evaluate_terminal();
        if let Some(outcome) = self.terminal.outcome() {
            tracing::info!(%outcome, move_count = self.move_count, "game over");
        }
        self.terminal
    }
}
