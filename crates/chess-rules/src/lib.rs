//! Rules of chess on a 0x88 board.
//!
//! This crate provides:
//! - [`Board`] - the mutable position, built from the starting setup or FEN
//! - a pseudo-legal move oracle answering for any `(from, to)` index pair
//! - in-place make/undo with a [`MoveRecord`]
//! - king safety, the legal-move filter and the [`Highlight`] mask
//! - checkmate and stalemate detection ([`Terminal`])
//! - [`Game`] - a select/target intent handler that reports [`Event`]s
//! - [`perft`] for validating move generation
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::{Event, Game};
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! game.on_select(e2);
//! assert_eq!(game.selection_highlight().count(), 2);
//!
//! let events = game.on_target_square(e4);
//! assert_eq!(events, [Event::PieceMoved { from: e2, to: e4 }]);
//! ```

mod board;
mod event;
mod game;
mod make;
mod oracle;
pub mod perft;
mod play;
mod safety;
mod terminal;

pub use board::{Board, SetupError, MAX_FULLMOVE_NUMBER};
pub use event::{Destination, Event};
pub use game::Game;
pub use make::{MoveKind, MoveRecord};
pub use play::{MoveError, PlayUciError, Played};
pub use safety::Highlight;
pub use terminal::{Outcome, Terminal};
