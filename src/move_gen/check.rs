use super::rays::{capture_destinations, defended_destinations, free_destinations, piece_rays};
use super::{gen_pseudo_legal_moves, CastlingRights, PlyContext};
use crate::bitboard::BitBoard;
use crate::board::Board;
use crate::config::CheckDetection;
use crate::field::Field;
use crate::piece::{Color, Piece, PieceKind};

pub trait DetectCheck {
    /// Whether a piece of `by` could capture on `field` with its next move.
    fn is_attacked(&self, board: &Board, field: Field, by: Color) -> bool;

    /// A side without a king on the board is never in check.
    fn is_king_under_check(&self, board: &Board, color: Color) -> bool {
        board
            .king_field(color)
            .map_or(false, |king| self.is_attacked(board, king, color.other()))
    }
}

/// Every field a piece of `by` attacks: each ray up to and including its first occupant.
pub fn attacked_fields(board: &Board, by: Color) -> BitBoard {
    let mut attacked = BitBoard::empty();
    for (from, piece) in board.pieces_of(by) {
        let rays = piece_rays(piece, from, true);
        attacked |= free_destinations(board, &rays).into_iter().collect::<BitBoard>();
        attacked |= capture_destinations(board, &rays, by).into_iter().collect::<BitBoard>();
        attacked |= defended_destinations(board, &rays, by).into_iter().collect::<BitBoard>();
    }
    attacked
}

#[derive(Clone, Copy, Debug)]
pub struct AttackTable;

impl DetectCheck for AttackTable {
    fn is_attacked(&self, board: &Board, field: Field, by: Color) -> bool {
        attacked_fields(board, by).is_field_set(field)
    }
}

/// Plays out the attacker's pseudo-legal replies and looks for one landing on the field.
#[derive(Clone, Copy, Debug)]
pub struct ReplySimulation;

impl DetectCheck for ReplySimulation {
    fn is_attacked(&self, board: &Board, field: Field, by: Color) -> bool {
        // A defender piece on the field turns pawn diagonals into real captures.
        let target_board = if board.has_color(field, by.other()) {
            *board
        } else {
            board.with_piece(field, Piece::new(PieceKind::King, by.other()))
        };
        let ctx = PlyContext {
            board: &target_board,
            color: by,
            last_move: None,
            castling: CastlingRights::NONE,
        };
        gen_pseudo_legal_moves(&ctx, self)
            .iter()
            .any(|mve| mve.to() == field)
    }
}

pub static ATTACK_TABLE: AttackTable = AttackTable;

pub static REPLY_SIMULATION: ReplySimulation = ReplySimulation;

impl DetectCheck for CheckDetection {
    fn is_attacked(&self, board: &Board, field: Field, by: Color) -> bool {
        match self {
            CheckDetection::AttackTable => ATTACK_TABLE.is_attacked(board, field, by),
            CheckDetection::ReplySimulation => REPLY_SIMULATION.is_attacked(board, field, by),
        }
    }
}
