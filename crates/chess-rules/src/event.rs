//! Presentation events emitted for applied moves.

use chess_core::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};

use crate::{MoveKind, Outcome, Played};

/// Where a piece displaced by a move goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Another board square (the castling rook).
    Square(Square),
    /// Off the board, into the tray of captured `color` pieces at `slot`.
    Offboard { color: Color, slot: u8 },
}

/// Something the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    PieceMoved { from: Square, to: Square },
    SecondaryMoved { from: Square, to: Destination },
    Promoted { at: Square, to: PieceKind },
    GameEnded { outcome: Outcome },
}

impl Played {
    /// Events for this move, in the order a presenter should apply them.
    pub fn events(&self) -> Vec<Event> {
        let mut events = Vec::with_capacity(3);
        let record = &self.record;

        match record.kind() {
            MoveKind::Castle => {
                if let (Some(from), Some(to)) = (record.rook_from(), record.rook_to()) {
                    events.push(Event::SecondaryMoved {
                        from,
                        to: Destination::Square(to),
                    });
                }
            }
            MoveKind::Capture => {
                if let (Some(victim), Some(slot)) = (record.captured(), self.capture_slot) {
                    events.push(Event::SecondaryMoved {
                        from: record.capture_square(),
                        to: Destination::Offboard {
                            color: victim.color(),
                            slot,
                        },
                    });
                }
            }
            MoveKind::Plain => {}
        }

        events.push(Event::PieceMoved {
            from: self.mov.from,
            to: self.mov.to,
        });

        if let Some(kind) = record.promotion() {
            events.push(Event::Promoted {
                at: self.mov.to,
                to: kind,
            });
        }

        if let Some(outcome) = self.terminal.outcome() {
            events.push(Event::GameEnded { outcome });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn quiet_move() {
        let mut board = Board::new();
        let events = board.play_uci("g1f3").unwrap().events();
        assert_eq!(
            events,
            [Event::PieceMoved {
                from: Square::G1,
                to: sq("f3")
            }]
        );
    }

    #[test]
    fn castle_moves_rook_first() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let events = board.play_uci("e1g1").unwrap().events();
        assert_eq!(
            events,
            [
                Event::SecondaryMoved {
                    from: Square::H1,
                    to: Destination::Square(Square::F1)
                },
                Event::PieceMoved {
                    from: Square::E1,
                    to: Square::G1
                },
            ]
        );
    }

    #[test]
    fn en_passant_capture_goes_offboard_from_the_pawn_square() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let events = board.play_uci("e5d6").unwrap().events();
        assert_eq!(
            events[0],
            Event::SecondaryMoved {
                from: sq("d5"),
                to: Destination::Offboard {
                    color: Color::Black,
                    slot: 0
                }
            }
        );
    }

    #[test]
    fn capture_promotion_and_mate_in_order() {
        // bxa8=Q is mate: the king is boxed in by its own pawns
        let mut board = Board::from_fen("r3k3/1P1ppp2/4b3/8/8/8/8/4K3 w - - 0 1").unwrap();
        let played = board.play_uci("b7a8").unwrap();
        let events = played.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[0],
            Event::SecondaryMoved {
                to: Destination::Offboard {
                    color: Color::Black,
                    slot: 0
                },
                ..
            }
        ));
        assert_eq!(
            events[2],
            Event::Promoted {
                at: Square::A8,
                to: PieceKind::Queen
            }
        );
        assert_eq!(
            events[3],
            Event::GameEnded {
                outcome: Outcome::WhiteMate
            }
        );
    }

    #[test]
    fn json_shape() {
        let event = Event::SecondaryMoved {
            from: sq("d5"),
            to: Destination::Offboard {
                color: Color::Black,
                slot: 2,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"secondary_moved","from":"d5","to":{"offboard":{"color":"Black","slot":2}}}"#
        );
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);

        let ended = serde_json::to_string(&Event::GameEnded {
            outcome: Outcome::Stalemate,
        })
        .unwrap();
        assert_eq!(ended, r#"{"event":"game_ended","outcome":"stalemate"}"#);
    }
}
