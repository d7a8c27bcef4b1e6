//! Core types for chess on a 0x88 board.
//!
//! This crate provides the fundamental value types shared by the rules
//! crate and its front ends:
//! - [`Piece`], [`PieceKind`] and [`Color`], packed into one-byte piece codes
//! - [`Square`], [`File`], and [`Rank`] for 0x88 board coordinates
//! - [`CastleRights`] and [`CastleSide`]
//! - [`Move`] and [`Promotion`] for move representation
//! - FEN parsing and serialization

mod castle;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castle::{CastleRights, CastleSide};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::{Piece, PieceKind, Promotion, MASK_COLOR, MASK_KIND, MASK_SLIDE};
pub use square::{
    on_board, File, Rank, Square, SquareError, GRID_SIZE, MASK_FILE, MASK_ROW, OFF_BOARD,
};
