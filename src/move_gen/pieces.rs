use super::check::DetectCheck;
use super::rays::{capture_destinations, free_destinations, piece_rays};
use super::PlyContext;
use crate::field::Field;
use crate::moves::Move;
use crate::piece::{Piece, PieceKind};

/// Column both kings start on.
const KING_COL: i8 = 5;

struct CastlingSide {
    rook_col: i8,
    king_to_col: i8,
    rook_to_col: i8,
    between_cols: &'static [i8],
}

const KING_SIDE: CastlingSide = CastlingSide {
    rook_col: 8,
    king_to_col: 7,
    rook_to_col: 6,
    between_cols: &[6, 7],
};

const QUEEN_SIDE: CastlingSide = CastlingSide {
    rook_col: 1,
    king_to_col: 3,
    rook_to_col: 4,
    between_cols: &[2, 3, 4],
};

pub(crate) fn gen_piece_moves(
    ctx: &PlyContext,
    from: Field,
    piece: Piece,
    detector: &impl DetectCheck,
    moves: &mut Vec<Move>,
) {
    match piece.kind {
        PieceKind::Pawn => gen_pawn_moves(ctx, from, piece, moves),
        PieceKind::King => {
            gen_regular_moves(ctx, from, piece, moves);
            gen_castling_moves(ctx, from, detector, moves);
        }
        _ => gen_regular_moves(ctx, from, piece, moves),
    }
}

fn gen_regular_moves(ctx: &PlyContext, from: Field, piece: Piece, moves: &mut Vec<Move>) {
    let rays = piece_rays(piece, from, false);
    let free = free_destinations(ctx.board, &rays);
    let captures = capture_destinations(ctx.board, &rays, ctx.color);
    moves.extend(
        free.into_iter()
            .chain(captures)
            .map(|to| Move::Regular { from, to }),
    );
}

fn gen_pawn_moves(ctx: &PlyContext, from: Field, piece: Piece, moves: &mut Vec<Move>) {
    let push_rays = piece_rays(piece, from, false);
    let capture_rays = piece_rays(piece, from, true);

    let captures = capture_destinations(ctx.board, &capture_rays, ctx.color);
    let pushes = free_destinations(ctx.board, &push_rays);

    for to in captures.into_iter().chain(pushes) {
        if to.is_last_row(ctx.color) {
            moves.extend(PieceKind::PROMOTIONS.into_iter().map(|kind| Move::Promotion {
                from,
                to,
                piece: Piece::new(kind, ctx.color),
            }));
        } else {
            moves.push(Move::Regular { from, to });
        }
    }

    moves.extend(
        free_destinations(ctx.board, &capture_rays)
            .into_iter()
            .filter(|&to| is_en_passant_capture(ctx, from, to))
            .map(|to| Move::EnPassant {
                from,
                to,
                captured: Field::from_coords(to.col(), from.row()),
            }),
    );
}

/// The previous ply was a two step advance of an enemy pawn passing over `to`.
fn is_en_passant_capture(ctx: &PlyContext, from: Field, to: Field) -> bool {
    let Some(Move::Regular {
        from: last_from,
        to: last_to,
    }) = ctx.last_move
    else {
        return false;
    };
    let passed_pawn = Piece::new(PieceKind::Pawn, ctx.color.other());
    let pawn_start = Field::new(to.col(), from.row() + 2 * (to.row() - from.row())).ok();

    last_to == Field::from_coords(to.col(), from.row())
        && ctx.board.get(last_to) == Some(passed_pawn)
        && Some(last_from) == pawn_start
}

fn gen_castling_moves(
    ctx: &PlyContext,
    from: Field,
    detector: &impl DetectCheck,
    moves: &mut Vec<Move>,
) {
    let row = ctx.color.first_row();
    if from != Field::from_coords(KING_COL, row) {
        return;
    }

    let sides = [
        (ctx.castling.king_side, &KING_SIDE),
        (ctx.castling.queen_side, &QUEEN_SIDE),
    ];
    for (allowed, side) in sides {
        if !allowed {
            continue;
        }

        let rook_from = Field::from_coords(side.rook_col, row);
        let king_to = Field::from_coords(side.king_to_col, row);
        let rook_to = Field::from_coords(side.rook_to_col, row);

        let rook = Piece::new(PieceKind::Rook, ctx.color);
        if ctx.board.get(rook_from) != Some(rook) {
            continue;
        }

        let path_clear = side
            .between_cols
            .iter()
            .all(|&col| ctx.board.is_empty(Field::from_coords(col, row)));
        if !path_clear {
            continue;
        }

        // The rook's destination is the field the king passes over.
        let opponent = ctx.color.other();
        let king_safe = [from, rook_to, king_to]
            .into_iter()
            .all(|field| !detector.is_attacked(ctx.board, field, opponent));
        if !king_safe {
            continue;
        }

        moves.push(Move::Castling {
            king_from: from,
            king_to,
            rook_from,
            rook_to,
        });
    }
}
