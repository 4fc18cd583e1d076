use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::field::Field;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece at {0}")]
    NoPieceAt(Field),

    #[error("no rook to castle with at {0}")]
    NoRookAt(Field),
}

/// Piece placement indexed by `[row - 1][col - 1]`. An empty entry means an empty field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Board {
    rows: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub const fn empty() -> Self {
        Self {
            rows: [[None; 8]; 8],
        }
    }

    pub fn start() -> Self {
        let mut board = Board::empty();
        for color in Color::iter() {
            for (idx, kind) in BACK_RANK.into_iter().enumerate() {
                let col = idx as i8 + 1;
                board.put(Field::from_coords(col, color.first_row()), Piece::new(kind, color));
                board.put(
                    Field::from_coords(col, color.pawn_row()),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    pub fn get(&self, field: Field) -> Option<Piece> {
        *self.slot(field)
    }

    pub fn is_empty(&self, field: Field) -> bool {
        self.get(field).is_none()
    }

    pub fn has_color(&self, field: Field, color: Color) -> bool {
        matches!(self.get(field), Some(piece) if piece.color == color)
    }

    /// Copy of the board with `piece` placed on `field`, replacing any occupant.
    pub fn with_piece(mut self, field: Field, piece: Piece) -> Self {
        self.put(field, piece);
        self
    }

    pub fn without_piece(mut self, field: Field) -> Self {
        *self.slot_mut(field) = None;
        self
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Field, Piece)> + '_ {
        Field::iter().filter_map(|field| self.get(field).map(|piece| (field, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Field, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Field of the first king of `color`, if it is on the board.
    pub fn king_field(&self, color: Color) -> Option<Field> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(field, _)| field)
    }

    /// New board with `mve` applied. The receiver is left untouched.
    pub fn apply(&self, mve: &Move) -> Result<Board, BoardError> {
        let mut board = *self;
        match *mve {
            Move::Regular { from, to } => board.move_piece(from, to)?,
            Move::Promotion { from, to, piece } => {
                board.take(from)?;
                board.put(to, piece);
            }
            Move::EnPassant { from, to, captured } => {
                board.move_piece(from, to)?;
                *board.slot_mut(captured) = None;
            }
            Move::Castling {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                let king = board.take(king_from)?;
                let rook = board
                    .take(rook_from)
                    .map_err(|_| BoardError::NoRookAt(rook_from))?;
                board.put(king_to, king);
                board.put(rook_to, rook);
            }
        }
        Ok(board)
    }

    fn move_piece(&mut self, from: Field, to: Field) -> Result<(), BoardError> {
        let piece = self.take(from)?;
        self.put(to, piece);
        Ok(())
    }

    fn take(&mut self, field: Field) -> Result<Piece, BoardError> {
        self.slot_mut(field)
            .take()
            .ok_or(BoardError::NoPieceAt(field))
    }

    fn put(&mut self, field: Field, piece: Piece) {
        *self.slot_mut(field) = Some(piece);
    }

    fn slot(&self, field: Field) -> &Option<Piece> {
        &self.rows[field.row() as usize - 1][field.col() as usize - 1]
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Piece> {
        &mut self.rows[field.row() as usize - 1][field.col() as usize - 1]
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::start()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " abcdefgh")?;
        for row in (1..=8).rev() {
            write!(f, "{}", row)?;
            for col in 1..=8 {
                match self.get(Field::from_coords(col, row)) {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f, "{}", row)?;
        }
        write!(f, " abcdefgh")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field::*;
    use test_case::test_case;
    use testresult::TestResult;

    const START: &str = " abcdefgh
8RNBQKBNR8
7PPPPPPPP7
6........6
5........5
4........4
3........3
2pppppppp2
1rnbqkbnr1
 abcdefgh";

    #[test]
    fn test_display() {
        assert_eq!(Board::start().to_string(), START);
    }

    #[test]
    fn test_start_layout() {
        let board = Board::start();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king_field(Color::White), Some(E1));
        assert_eq!(board.king_field(Color::Black), Some(E8));
        assert_eq!(board.get(D8), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert!(board.is_empty(E4));
    }

    #[test]
    fn test_apply_regular() -> TestResult {
        let got = Board::start().apply(&Move::new(B2, B3))?;
        let want = " abcdefgh
8RNBQKBNR8
7PPPPPPPP7
6........6
5........5
4........4
3.p......3
2p.pppppp2
1rnbqkbnr1
 abcdefgh";
        assert_eq!(got.to_string(), want);
        Ok(())
    }

    #[test]
    fn test_apply_promotion_replaces_occupant() -> TestResult {
        let queen = Piece::new(PieceKind::Queen, Color::White);
        let got = Board::start().apply(&Move::with_promotion(B2, B8, queen))?;
        assert_eq!(got.get(B8), Some(queen));
        assert!(got.is_empty(B2));
        assert_eq!(got.pieces().count(), 31);
        Ok(())
    }

    #[test]
    fn test_apply_en_passant_removes_captured_field() -> TestResult {
        let got = Board::start().apply(&Move::EnPassant {
            from: B2,
            to: C3,
            captured: C7,
        })?;
        assert!(got.is_empty(B2));
        assert!(got.is_empty(C7));
        assert_eq!(got.get(C3), Some(Piece::new(PieceKind::Pawn, Color::White)));
        Ok(())
    }

    #[test]
    fn test_apply_castling_moves_both() -> TestResult {
        let board = Board::start()
            .without_piece(B1)
            .without_piece(C1)
            .without_piece(D1);
        let got = board.apply(&Move::Castling {
            king_from: E1,
            king_to: C1,
            rook_from: A1,
            rook_to: D1,
        })?;
        let want = " abcdefgh
8RNBQKBNR8
7PPPPPPPP7
6........6
5........5
4........4
3........3
2pppppppp2
1..kr.bnr1
 abcdefgh";
        assert_eq!(got.to_string(), want);
        Ok(())
    }

    #[test_case(Move::new(C3, B3) ; "regular")]
    #[test_case(Move::with_promotion(C3, C8, Piece::new(PieceKind::Queen, Color::White)) ; "promotion")]
    #[test_case(Move::EnPassant { from: C3, to: D4, captured: D3 } ; "en passant")]
    fn test_apply_missing_origin(mve: Move) {
        assert_eq!(Board::start().apply(&mve), Err(BoardError::NoPieceAt(C3)));
    }

    #[test]
    fn test_apply_castling_missing_rook() {
        let board = Board::start().without_piece(H1);
        let res = board.apply(&Move::Castling {
            king_from: E1,
            king_to: G1,
            rook_from: H1,
            rook_to: F1,
        });
        assert_eq!(res, Err(BoardError::NoRookAt(H1)));
    }

    #[test]
    fn test_apply_does_not_mutate() -> TestResult {
        let board = Board::start();
        let _ = board.apply(&Move::new(E2, E4))?;
        assert_eq!(board, Board::start());
        Ok(())
    }

    #[test]
    fn test_quiet_move_reversal_restores_board() -> TestResult {
        let board = Board::start();
        let moved = board.apply(&Move::new(G1, F3))?;
        assert_ne!(moved, board);
        assert_eq!(moved.apply(&Move::new(F3, G1))?, board);
        Ok(())
    }
}
