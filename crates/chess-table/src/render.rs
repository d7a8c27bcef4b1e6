//! Text rendering of the table.

use chess_core::{Color, File, Piece, PieceKind, Rank, Square};
use chess_rules::Highlight;

use crate::config::{Glyphs, TableConfig};
use crate::scene::Scene;

/// Returns the character drawn for `piece`.
pub fn glyph(piece: Piece, glyphs: Glyphs) -> char {
    match glyphs {
        Glyphs::Ascii => piece.to_fen_char(),
        Glyphs::Unicode => match (piece.color(), piece.kind()) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        },
    }
}

/// Draws the board with rank and file labels and the two capture trays.
///
/// The selected square is bracketed `[P]`, a lit empty square shows ` * `
/// and a lit occupied square (a capture) is parenthesized `(p)`.
pub fn render(
    scene: &Scene,
    selected: Option<Square>,
    highlight: Highlight,
    config: &TableConfig,
) -> String {
    let highlight = if config.show_highlights {
        highlight
    } else {
        Highlight::EMPTY
    };
    let mut out = String::new();

    tray_line(&mut out, scene, Color::White, config.glyphs);
    for rank in Rank::ALL.iter().rev() {
        out.push_str(&format!("{rank} "));
        for file in File::ALL {
            let sq = Square::new(file, *rank);
            let piece = scene.piece_at(sq).map(|p| glyph(p, config.glyphs));
            let cell = match (piece, selected == Some(sq), highlight.contains(sq)) {
                (Some(c), true, _) => format!("[{c}]"),
                (Some(c), false, true) => format!("({c})"),
                (Some(c), false, false) => format!(" {c} "),
                (None, _, true) => " * ".to_string(),
                (None, _, false) => " . ".to_string(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");
    tray_line(&mut out, scene, Color::Black, config.glyphs);

    if let Some(outcome) = scene.outcome() {
        out.push_str(&format!("{outcome}\n"));
    }
    out
}

/// Captured `color` pieces, drawn on the capturing player's side.
fn tray_line(out: &mut String, scene: &Scene, color: Color, glyphs: Glyphs) {
    let pieces: String = scene.tray(color).map(|p| glyph(p, glyphs)).collect();
    out.push_str(&format!("{color} lost: {pieces}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::Board;

    #[test]
    fn glyph_styles() {
        let king = Piece::new(Color::White, PieceKind::King);
        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        assert_eq!(glyph(king, Glyphs::Ascii), 'K');
        assert_eq!(glyph(pawn, Glyphs::Ascii), 'p');
        assert_eq!(glyph(king, Glyphs::Unicode), '♔');
        assert_eq!(glyph(pawn, Glyphs::Unicode), '♟');
    }

    #[test]
    fn start_position() {
        let board = Board::new();
        let scene = Scene::from_board(&board);
        let text = render(&scene, None, Highlight::EMPTY, &TableConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "White lost: ");
        assert_eq!(lines[1], "8  r  n  b  q  k  b  n  r ");
        assert_eq!(lines[4], "5  .  .  .  .  .  .  .  . ");
        assert_eq!(lines[8], "1  R  N  B  Q  K  B  N  R ");
        assert_eq!(lines[9], "   a  b  c  d  e  f  g  h");
        assert_eq!(lines[10], "Black lost: ");
    }

    #[test]
    fn selection_and_targets() {
        let board = Board::new();
        let scene = Scene::from_board(&board);
        let e2 = Square::from_algebraic("e2").unwrap();
        let text = render(&scene, Some(e2), board.highlight(e2), &TableConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "4  .  .  .  .  *  .  .  . ");
        assert_eq!(lines[6], "3  .  .  .  .  *  .  .  . ");
        assert_eq!(lines[7], "2  P  P  P  P [P] P  P  P ");

        let quiet = TableConfig {
            show_highlights: false,
            ..TableConfig::default()
        };
        let text = render(&scene, Some(e2), board.highlight(e2), &quiet);
        assert!(!text.contains('*'));
    }

    #[test]
    fn outcome_closes_the_picture() {
        let board = Board::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let scene = Scene::from_board(&board);
        let text = render(&scene, None, Highlight::EMPTY, &TableConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[10], "Black lost: ");
        assert_eq!(lines[11], "Draw by stalemate");
        assert!(text.ends_with('\n'));
    }
}
