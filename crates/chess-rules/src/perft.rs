//! Perft (performance test) for validating the legal-move filter.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth.
//! The counts are compared against published values; any mismatch points at
//! a bug in the oracle, make/undo or king safety.

use chess_core::Move;

use crate::Board;

/// Counts the leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    let mut scratch = board.clone();
    count(&mut scratch, depth)
}

fn count(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        nodes += descend(board, m, depth - 1);
    }
    nodes
}

fn descend(board: &mut Board, m: Move, depth: u32) -> u64 {
    let record = board.make_move_promoting(m.from, m.to, m.promotion.unwrap_or_default());
    let nodes = count(board, depth);
    board.undo_move(m.from, m.to, &record);
    nodes
}

/// Perft split by root move, sorted by UCI string.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut scratch = board.clone();
    let mut results: Vec<(String, u64)> = board
        .legal_moves()
        .into_iter()
        .map(|m| {
            let nodes = if depth > 1 {
                descend(&mut scratch, m, depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1";

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::new(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::new(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Board::new(), 3), 8902);
    }

    // The simulated legality check is slow; only run in release mode
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Board::new(), 4), 197281);
    }

    // Kiwipete - castling, en passant and pins all at once
    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&board(KIWIPETE), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&board(KIWIPETE), 2), 2039);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&board(KIWIPETE), 3), 97862);
    }

    // Position 3: check evasion, en passant, promotion
    #[test]
    fn perft_position3_depth_1() {
        assert_eq!(perft(&board(POSITION_3), 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        assert_eq!(perft(&board(POSITION_3), 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        assert_eq!(perft(&board(POSITION_3), 3), 2812);
    }

    // Position 4: promotions and captures
    #[test]
    fn perft_position4_depth_1() {
        assert_eq!(perft(&board(POSITION_4), 1), 6);
    }

    #[test]
    fn perft_position4_depth_2() {
        assert_eq!(perft(&board(POSITION_4), 2), 264);
    }

    #[test]
    fn perft_position4_depth_3() {
        assert_eq!(perft(&board(POSITION_4), 3), 9467);
    }

    #[test]
    fn perft_position5_depth_1() {
        assert_eq!(perft(&board(POSITION_5), 1), 44);
    }

    #[test]
    fn perft_position5_depth_2() {
        assert_eq!(perft(&board(POSITION_5), 2), 1486);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let results = perft_divide(&Board::new(), 2);
        assert_eq!(results.len(), 20);
        assert_eq!(results[0].0, "a2a3");
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let start = board(KIWIPETE);
        perft(&start, 2);
        assert_eq!(start, board(KIWIPETE));
    }
}
