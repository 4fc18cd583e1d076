use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::board::Board;
use crate::moves::Move;
use crate::piece::Color;

pub mod check;
mod pieces;
pub mod rays;
pub mod vectors;

pub use check::{attacked_fields, AttackTable, DetectCheck, ReplySimulation};

/// Sides one color may still castle towards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CastlingRights {
    pub king_side: bool,
    pub queen_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        king_side: false,
        queen_side: false,
    };

    pub const BOTH: CastlingRights = CastlingRights {
        king_side: true,
        queen_side: true,
    };
}

/// Everything move generation needs to know about the ply being generated.
#[derive(Clone, Copy, Debug)]
pub struct PlyContext<'a> {
    pub board: &'a Board,
    pub color: Color,
    /// Only consulted for en passant.
    pub last_move: Option<Move>,
    pub castling: CastlingRights,
}

/// Moves of every piece of `ctx.color`, without regard to its own king's safety.
pub fn gen_pseudo_legal_moves(ctx: &PlyContext, detector: &impl DetectCheck) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in ctx.board.pieces_of(ctx.color) {
        pieces::gen_piece_moves(ctx, from, piece, detector, &mut moves);
    }
    moves
}

/// A move is legal when it does not leave the mover's king attacked.
pub fn is_legal(board: &Board, color: Color, mve: &Move, detector: &impl DetectCheck) -> bool {
    match board.apply(mve) {
        Ok(next) => !detector.is_king_under_check(&next, color),
        Err(err) => {
            trace!(?mve, %err, "candidate does not apply");
            false
        }
    }
}

/// Keeps the legal subset of `moves` without reordering it.
///
/// With more than one thread the candidates are split into contiguous chunks, each
/// checked on its own scoped thread. Checking a candidate never observes another, so
/// the only synchronisation is joining the chunks back in order.
pub fn filter_legal<D>(board: &Board, color: Color, moves: Vec<Move>, detector: &D, threads: usize) -> Vec<Move>
where
    D: DetectCheck + Sync,
{
    let _span = debug_span!("filter_legal", %color, candidates = moves.len(), threads).entered();

    let keep = |mve: &Move| {
        let legal = is_legal(board, color, mve, detector);
        if !legal {
            trace!(?mve, "leaves king in check");
        }
        legal
    };

    let legal: Vec<Move> = if threads <= 1 || moves.len() < 2 {
        moves.into_iter().filter(keep).collect()
    } else {
        let chunk_len = moves.len().div_ceil(threads);
        std::thread::scope(|scope| {
            let handles: Vec<_> = moves
                .chunks(chunk_len)
                .map(|chunk| scope.spawn(move || chunk.iter().copied().filter(keep).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(chunk) => chunk,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    };

    debug!(legal = legal.len(), "filtered legal moves");
    legal
}
