//! The interactive session: commands in, board pictures out.

use std::io::{self, Write};

use chess_rules::{Event, Game, SetupError};

use crate::command::{Command, HELP};
use crate::config::TableConfig;
use crate::render::render;
use crate::scene::Scene;

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game, the scene mirroring it and the display settings.
pub struct Table {
    game: Game,
    scene: Scene,
    config: TableConfig,
}

impl Table {
    /// Sets up a table from a FEN position, or the initial position.
    pub fn new(fen: Option<&str>, config: TableConfig) -> Result<Self, SetupError> {
        let mut game = match fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        game.set_promotion(config.promotion);
        let scene = Scene::from_board(game.board());
        Ok(Table {
            game,
            scene,
            config,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Parses and runs one input line. Blank lines and `#` comments are
    /// skipped; bad input is reported and the session continues.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        match line.parse::<Command>() {
            Ok(command) => self.execute(command, out),
            Err(err) => {
                writeln!(out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        tracing::debug!(?command, "executing");
        match command {
            Command::Select(sq) => {
                let events = self.game.on_select(sq);
                self.show(&events, out)?;
            }
            Command::Target(sq) => {
                let events = self.game.on_target_square(sq);
                if events.is_empty() {
                    writeln!(out, "cannot move there")?;
                }
                self.show(&events, out)?;
            }
            Command::Move(mov) => {
                let board = self.game.board();
                let own = board
                    .piece_at(mov.from)
                    .is_some_and(|p| p.color() == board.side_to_move());
                if !own {
                    writeln!(out, "no piece of the side to move on {}", mov.from)?;
                    return Ok(Flow::Continue);
                }
                self.game.on_select(mov.from);
                let promotion = mov.promotion.unwrap_or(self.game.promotion());
                let events = self.game.on_target_promoting(mov.to, promotion);
                if events.is_empty() {
                    writeln!(out, "illegal move {mov}")?;
                }
                self.show(&events, out)?;
            }
            Command::Promote(promotion) => {
                self.game.set_promotion(promotion);
                writeln!(out, "pawns now promote to {}", promotion.kind())?;
            }
            Command::Board => self.draw(out)?,
            Command::Fen => writeln!(out, "{}", self.game.board().to_fen())?,
            Command::Moves => {
                let moves: Vec<String> = self
                    .game
                    .board()
                    .legal_moves()
                    .iter()
                    .map(|m| m.to_uci())
                    .collect();
                writeln!(out, "{} legal: {}", moves.len(), moves.join(" "))?;
            }
            Command::Reset => {
                self.game.reset();
                self.scene = Scene::from_board(self.game.board());
                self.draw(out)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self, events: &[Event], out: &mut impl Write) -> io::Result<()> {
        for event in events {
            self.scene.apply(event);
            if self.config.echo_events {
                let json = serde_json::to_string(event).map_err(io::Error::other)?;
                writeln!(out, "{json}")?;
            }
        }
        if !self.scene.matches(self.game.board()) {
            tracing::error!("scene and board disagree after {} events", events.len());
        }
        self.draw(out)
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let text = render(
            &self.scene,
            self.game.selected(),
            self.game.selection_highlight(),
            &self.config,
        );
        write!(out, "{text}")?;
        if !self.game.terminal().is_over() {
            writeln!(out, "{} to move", self.game.board().side_to_move())?;
        }
        Ok(())
    }
}
