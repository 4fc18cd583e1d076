use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::piece::Piece;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Move {
    Regular {
        from: Field,
        to: Field,
    },
    Promotion {
        from: Field,
        to: Field,
        piece: Piece,
    },
    /// `captured` is the field of the pawn taken, which is never `to`.
    EnPassant {
        from: Field,
        to: Field,
        captured: Field,
    },
    Castling {
        king_from: Field,
        king_to: Field,
        rook_from: Field,
        rook_to: Field,
    },
}

impl Move {
    pub fn new(from: Field, to: Field) -> Move {
        Move::Regular { from, to }
    }

    pub fn with_promotion(from: Field, to: Field, piece: Piece) -> Move {
        Move::Promotion { from, to, piece }
    }

    /// Origin of the moving piece, the king for castling.
    pub fn from(&self) -> Field {
        match *self {
            Move::Regular { from, .. }
            | Move::Promotion { from, .. }
            | Move::EnPassant { from, .. } => from,
            Move::Castling { king_from, .. } => king_from,
        }
    }

    /// Destination of the moving piece, the king for castling.
    pub fn to(&self) -> Field {
        match *self {
            Move::Regular { to, .. } | Move::Promotion { to, .. } | Move::EnPassant { to, .. } => to,
            Move::Castling { king_to, .. } => king_to,
        }
    }

    pub fn promotion(&self) -> Option<Piece> {
        match *self {
            Move::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }

    pub fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    pub fn is_castling(&self) -> bool {
        matches!(self, Move::Castling { .. })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from(), self.to())?;
        match self {
            Move::Regular { .. } => Ok(()),
            Move::Promotion { piece, .. } => write!(f, " ({})", piece.kind),
            Move::EnPassant { captured, .. } => write!(f, " (x{})", captured),
            Move::Castling {
                rook_from, rook_to, ..
            } => write!(f, " (rook {} -> {})", rook_from, rook_to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(promotion) = self.promotion() {
            let promotion_ch: char = promotion.kind.into();
            write!(f, "{}{}{}", self.from(), self.to(), promotion_ch)
        } else {
            write!(f, "{}{}", self.from(), self.to())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field::*;
    use crate::piece::{Color, PieceKind};
    use test_case::test_case;

    #[test_case(Move::new(A1, G7), "a1 -> g7" ; "regular")]
    #[test_case(Move::with_promotion(F7, F8, Piece::new(PieceKind::Queen, Color::White)), "f7 -> f8 (Queen)" ; "promotion")]
    #[test_case(Move::EnPassant { from: E5, to: D6, captured: D5 }, "e5 -> d6 (xd5)" ; "en passant")]
    #[test_case(Move::Castling { king_from: E1, king_to: G1, rook_from: H1, rook_to: F1 }, "e1 -> g1 (rook h1 -> f1)" ; "castling")]
    fn test_move_debug(mve: Move, want: &str) {
        assert_eq!(format!("{:?}", mve), want);
    }

    #[test_case(Move::new(E2, E4), "e2e4" ; "regular")]
    #[test_case(Move::with_promotion(B2, B1, Piece::new(PieceKind::Knight, Color::Black)), "b2b1n" ; "promotion")]
    #[test_case(Move::Castling { king_from: E8, king_to: C8, rook_from: A8, rook_to: D8 }, "e8c8" ; "castling")]
    fn test_move_display(mve: Move, want: &str) {
        assert_eq!(mve.to_string(), want);
    }
}
