//! The intent handler the presentation layer drives.
//!
//! A [`Game`] owns the board plus the selection scratch state. Input arrives
//! as "select this square" and "move the selection here" intents; illegal
//! intents are ignored and legal ones come back as a list of [`Event`]s.

use chess_core::{Move, Promotion, Square};

use crate::{Board, Event, Highlight, SetupError, Terminal};

/// Board plus selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Game {
    board: Board,
    selected: Option<Square>,
    highlight: Highlight,
    promotion: Promotion,
}

impl Game {
    /// Starts a game from the initial position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a game from a FEN position.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        Ok(Self::with_board(Board::from_fen(fen)?))
    }

    pub fn with_board(board: Board) -> Self {
        Game {
            board,
            selected: None,
            highlight: Highlight::EMPTY,
            promotion: Promotion::default(),
        }
    }

    /// Throws away the current game and starts over from the initial position.
    /// The promotion choice is kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.clear_selection();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal destinations of the current selection.
    #[inline]
    pub fn selection_highlight(&self) -> Highlight {
        self.highlight
    }

    /// Legal destinations of any square, independent of the selection.
    pub fn highlight(&self, sq: Square) -> Highlight {
        self.board.highlight(sq)
    }

    #[inline]
    pub fn terminal(&self) -> Terminal {
        self.board.terminal()
    }

    #[inline]
    pub fn promotion(&self) -> Promotion {
        self.promotion
    }

    /// Chooses the piece future promotions produce.
    pub fn set_promotion(&mut self, promotion: Promotion) {
        self.promotion = promotion;
    }

    /// Handles a click on `sq`.
    ///
    /// A piece of the side to move becomes the selection. An opponent piece
    /// while something is selected is treated as a capture target. Anything
    /// else is ignored.
    pub fn on_select(&mut self, sq: Square) -> Vec<Event> {
        if self.board.terminal().is_over() {
            tracing::trace!(%sq, "select ignored, game is over");
            return Vec::new();
        }
        match self.board.piece_at(sq) {
            Some(piece) if piece.color() == self.board.side_to_move() => {
                self.selected = Some(sq);
                self.highlight = self.board.highlight(sq);
                tracing::trace!(%sq, targets = self.highlight.count(), "selected");
                Vec::new()
            }
            Some(_) if self.selected.is_some() => self.on_target_square(sq),
            _ => {
                tracing::trace!(%sq, "select ignored");
                Vec::new()
            }
        }
    }

    /// Handles a move intent onto tile `tile` (`file + 8 * row`). Tiles past
    /// 63 are ignored.
    pub fn on_target(&mut self, tile: u8) -> Vec<Event> {
        match Square::from_tile(tile) {
            Some(sq) => self.on_target_square(sq),
            None => {
                tracing::trace!(tile, "target ignored, tile off the board");
                Vec::new()
            }
        }
    }

    /// Moves the selection to `sq` with the current promotion choice.
    pub fn on_target_square(&mut self, sq: Square) -> Vec<Event> {
        self.on_target_promoting(sq, self.promotion)
    }

    /// Moves the selection to `sq`, promoting to `promotion` if a pawn
    /// reaches its last row.
    pub fn on_target_promoting(&mut self, sq: Square, promotion: Promotion) -> Vec<Event> {
        let Some(from) = self.selected else {
            tracing::trace!(%sq, "target ignored, nothing selected");
            return Vec::new();
        };
        let mov = Move::promoting(from, sq, promotion);
        match self.board.play(mov) {
            Ok(played) => {
                self.clear_selection();
                played.events()
            }
            Err(err) => {
                tracing::trace!(%err, "target ignored");
                Vec::new()
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.highlight = Highlight::EMPTY;
    }
}
