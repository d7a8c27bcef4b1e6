//! Parsing of the table's input lines.

use std::str::FromStr;

use chess_core::{Move, Promotion, Square, SquareError};
use thiserror::Error;

/// One line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click a square: select a piece or capture with the selection.
    Select(Square),
    /// Move the selection to a square.
    Target(Square),
    /// Select and target in one go, e.g. `e2e4` or `a7a8n`.
    Move(Move),
    /// Change the default promotion piece.
    Promote(Promotion),
    Board,
    Fen,
    Moves,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs a {1}")]
    MissingArgument(&'static str, &'static str),

    #[error(transparent)]
    Square(#[from] SquareError),

    #[error("invalid promotion piece '{0}': expected q, r, b or n")]
    Promotion(String),
}

pub const HELP: &str = "\
commands:
  select <sq>    select a piece (or capture with the current selection)
  target <sq>    move the selected piece
  <uci>          select and move, e.g. e2e4 or a7a8n
  promote <p>    default promotion: q, r, b or n
  board          redraw the board
  fen            print the position as FEN
  moves          list the legal moves
  reset          start a new game
  quit           leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let arg = words.next();

        let command = match head.to_ascii_lowercase().as_str() {
            "select" | "s" => Command::Select(square_arg("select", arg)?),
            "target" | "t" => Command::Target(square_arg("target", arg)?),
            "promote" => {
                let text = arg.ok_or(CommandError::MissingArgument("promote", "piece"))?;
                let mut chars = text.chars();
                let promotion = match (chars.next(), chars.next()) {
                    (Some(c), None) => Promotion::from_char(c),
                    _ => None,
                };
                Command::Promote(promotion.ok_or_else(|| CommandError::Promotion(text.to_string()))?)
            }
            "board" => Command::Board,
            "fen" => Command::Fen,
            "moves" => Command::Moves,
            "reset" | "new" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => match Move::from_uci(head) {
                Some(mov) => Command::Move(mov),
                None => return Err(CommandError::Unknown(head.to_string())),
            },
        };
        Ok(command)
    }
}

fn square_arg(command: &'static str, arg: Option<&str>) -> Result<Square, CommandError> {
    let text = arg.ok_or(CommandError::MissingArgument(command, "square"))?;
    Ok(text.parse()?)
}
