use arrayvec::ArrayVec;

use crate::field::Field;
use crate::piece::{Piece, PieceKind};

/// Longest line a slider is given; lines are clipped by the board edge afterwards.
const SLIDING_LINE_LEN: i8 = 8;

/// Successive `(dcol, drow)` offsets from an origin along one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorLine {
    steps: ArrayVec<(i8, i8), 8>,
}

impl VectorLine {
    fn sliding((dc, dr): (i8, i8)) -> Self {
        Self {
            steps: (1..=SLIDING_LINE_LEN).map(|k| (dc * k, dr * k)).collect(),
        }
    }

    fn stepping(offsets: &[(i8, i8)]) -> Self {
        Self {
            steps: offsets.iter().copied().collect(),
        }
    }

    pub fn steps(&self) -> &[(i8, i8)] {
        &self.steps
    }

    #[cfg(test)]
    fn cols(&self) -> Vec<i8> {
        self.steps.iter().map(|&(dc, _)| dc).collect()
    }

    #[cfg(test)]
    fn rows(&self) -> Vec<i8> {
        self.steps.iter().map(|&(_, dr)| dr).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

pub type VectorLines = ArrayVec<VectorLine, 8>;

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (2, -1),
    (-1, -2),
    (-2, -1),
    (1, -2),
    (-2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Vector lines of `piece` standing on `origin`. `capture` only changes the result for pawns.
pub fn piece_vectors(piece: Piece, origin: Field, capture: bool) -> VectorLines {
    match piece.kind {
        PieceKind::Rook => ROOK_DIRS.into_iter().map(VectorLine::sliding).collect(),
        PieceKind::Bishop => BISHOP_DIRS.into_iter().map(VectorLine::sliding).collect(),
        PieceKind::Queen => ROOK_DIRS
            .into_iter()
            .chain(BISHOP_DIRS)
            .map(VectorLine::sliding)
            .collect(),
        PieceKind::Knight => KNIGHT_OFFSETS
            .iter()
            .map(|offset| VectorLine::stepping(&[*offset]))
            .collect(),
        PieceKind::King => KING_OFFSETS
            .iter()
            .map(|offset| VectorLine::stepping(&[*offset]))
            .collect(),
        PieceKind::Pawn => {
            let fwd = piece.color.forward();
            let mut lines = VectorLines::new();
            if capture {
                lines.push(VectorLine::stepping(&[(-1, fwd)]));
                lines.push(VectorLine::stepping(&[(1, fwd)]));
            } else if origin.row() == piece.color.pawn_row() {
                lines.push(VectorLine::stepping(&[(0, fwd), (0, 2 * fwd)]));
            } else {
                lines.push(VectorLine::stepping(&[(0, fwd)]));
            }
            lines
        }
    }
}
