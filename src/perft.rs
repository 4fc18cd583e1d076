use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use tabled::{Table, Tabled};
use tracing::debug;

use crate::game::Game;
use crate::moves::Move;

/// Counts for the moves made at one ply of the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Tabled)]
pub struct PerftDepthResult {
    pub tot: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftDepthResult {
    pub fn empty() -> PerftDepthResult {
        PerftDepthResult::default()
    }
}

pub struct PerftResult {
    pub depth_results: Vec<PerftDepthResult>,
    pub tot_nodes: u64,
    pub time_elapsed: Duration,
    pub nodes_per_second: f64,
}

impl PerftResult {
    /// Positions reached at the deepest ply.
    pub fn leaf_nodes(&self) -> u64 {
        self.depth_results.last().map_or(1, |res| res.tot)
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total nodes: {}", self.tot_nodes)?;
        writeln!(f, "time elapsed: {}", self.time_elapsed.as_secs_f32())?;
        writeln!(f, "nodes/s: {}", self.nodes_per_second)?;
        writeln!(f, "{}", Table::new(&self.depth_results))?;
        Ok(())
    }
}

/// Walks every legal line from `game` down to `depth` plies.
pub fn perft(game: &Game, depth: usize) -> PerftResult {
    let mut depth_results = vec![PerftDepthResult::empty(); depth];

    let start = Instant::now();

    perft_helper(&mut depth_results, game, 0);

    let time_elapsed = start.elapsed();

    let tot_nodes: u64 = depth_results.iter().map(|res| res.tot).sum();

    let nodes_per_second = tot_nodes as f64 / time_elapsed.as_secs_f64();

    debug!(depth, tot_nodes, ?time_elapsed, "perft finished");

    PerftResult {
        depth_results,
        tot_nodes,
        time_elapsed,
        nodes_per_second,
    }
}

fn perft_helper(depth_results: &mut [PerftDepthResult], game: &Game, curr_depth: usize) {
    if curr_depth == depth_results.len() {
        return;
    }

    let successors = game.valid_games();
    let mut res = PerftDepthResult {
        tot: successors.len() as u64,
        ..PerftDepthResult::empty()
    };

    for next in &successors {
        let Some(mve) = next.last_move() else {
            continue;
        };

        if is_capture(game, &mve) {
            res.captures += 1;
        }
        match mve {
            Move::EnPassant { .. } => res.en_passants += 1,
            Move::Castling { .. } => res.castles += 1,
            Move::Promotion { .. } => res.promotions += 1,
            Move::Regular { .. } => {}
        }
        if next.is_king_under_check() {
            res.checks += 1;
            if next.legal_moves().is_empty() {
                res.checkmates += 1;
            }
        }

        perft_helper(depth_results, next, curr_depth + 1);
    }

    let curr_res = &mut depth_results[curr_depth];
    curr_res.tot += res.tot;
    curr_res.captures += res.captures;
    curr_res.en_passants += res.en_passants;
    curr_res.castles += res.castles;
    curr_res.promotions += res.promotions;
    curr_res.checks += res.checks;
    curr_res.checkmates += res.checkmates;
}

fn is_capture(game: &Game, mve: &Move) -> bool {
    mve.is_en_passant() || (!mve.is_castling() && !game.board().is_empty(mve.to()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::field::Field::*;
    use crate::piece::{Color, Piece, PieceKind};
    use test_case::test_case;

    #[test_case(1, 20)]
    #[test_case(2, 400)]
    fn test_start_position(depth: usize, want: u64) {
        let res = perft(&Game::new(), depth);
        assert_eq!(res.leaf_nodes(), want);
        assert_eq!(res.depth_results.len(), depth);
    }

    #[test]
    fn test_zero_depth() {
        let res = perft(&Game::new(), 0);
        assert!(res.depth_results.is_empty());
        assert_eq!(res.tot_nodes, 0);
        assert_eq!(res.leaf_nodes(), 1);
    }

    #[test]
    fn test_counts_promotions_and_captures() {
        let board = Board::empty()
            .with_piece(E1, Piece::new(PieceKind::King, Color::White))
            .with_piece(H8, Piece::new(PieceKind::King, Color::Black))
            .with_piece(B7, Piece::new(PieceKind::Pawn, Color::White))
            .with_piece(A8, Piece::new(PieceKind::Rook, Color::Black));
        let res = perft(&Game::from_board(Color::White, board), 1);
        let depth = res.depth_results[0];
        assert_eq!(depth.promotions, 8);
        assert_eq!(depth.captures, 4);
        // Queen and rook promotions on either field check along the back row.
        assert_eq!(depth.checks, 4);
    }

    #[test]
    fn test_counts_checkmates() {
        // Ra1-a8 mates the king boxed in by its own pawns.
        let board = Board::empty()
            .with_piece(G1, Piece::new(PieceKind::King, Color::White))
            .with_piece(A1, Piece::new(PieceKind::Rook, Color::White))
            .with_piece(G8, Piece::new(PieceKind::King, Color::Black))
            .with_piece(F7, Piece::new(PieceKind::Pawn, Color::Black))
            .with_piece(G7, Piece::new(PieceKind::Pawn, Color::Black))
            .with_piece(H7, Piece::new(PieceKind::Pawn, Color::Black));
        let res = perft(&Game::from_board(Color::White, board), 1);
        assert_eq!(res.depth_results[0].checkmates, 1);
        assert_eq!(res.depth_results[0].checks, 1);
    }

    #[test]
    fn test_display_has_table() {
        let out = perft(&Game::new(), 1).to_string();
        assert!(out.starts_with("total nodes: 20\n"));
        assert!(out.contains("en_passants"));
    }
}
