use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error("char -> piece: got {0}")]
    FromChar(char),
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, Deserialize, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding the pieces of this color at the start, also the castling row.
    pub const fn first_row(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Row on which pawns of this color start and may advance two steps.
    pub const fn pawn_row(self) -> i8 {
        self.first_row() + self.forward()
    }

    /// Row delta of a pawn step.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, Deserialize, Serialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in the order promotions are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub(crate) fn is_minor(&self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Knight)
    }
}

impl From<PieceKind> for char {
    fn from(kind: PieceKind) -> char {
        match kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'k' => Ok(PieceKind::King),
            'q' => Ok(PieceKind::Queen),
            'r' => Ok(PieceKind::Rook),
            'b' => Ok(PieceKind::Bishop),
            'n' => Ok(PieceKind::Knight),
            'p' => Ok(PieceKind::Pawn),
            _ => Err(PieceError::FromChar(value)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Deserialize, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Single letter code: lowercase for White, uppercase for Black.
    pub fn to_char(self) -> char {
        let ch: char = self.kind.into();
        match self.color {
            Color::White => ch,
            Color::Black => ch.to_ascii_uppercase(),
        }
    }

    pub fn symbol(self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, Color::White) => '\u{2654}',
            (PieceKind::Queen, Color::White) => '\u{2655}',
            (PieceKind::Rook, Color::White) => '\u{2656}',
            (PieceKind::Bishop, Color::White) => '\u{2657}',
            (PieceKind::Knight, Color::White) => '\u{2658}',
            (PieceKind::Pawn, Color::White) => '\u{2659}',
            (PieceKind::King, Color::Black) => '\u{265a}',
            (PieceKind::Queen, Color::Black) => '\u{265b}',
            (PieceKind::Rook, Color::Black) => '\u{265c}',
            (PieceKind::Bishop, Color::Black) => '\u{265d}',
            (PieceKind::Knight, Color::Black) => '\u{265e}',
            (PieceKind::Pawn, Color::Black) => '\u{265f}',
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(value)?;
        let color = if value.is_ascii_lowercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use test_case::test_case;
    use testresult::TestResult;

    #[test_case(PieceKind::King, Color::White, 'k')]
    #[test_case(PieceKind::Queen, Color::White, 'q')]
    #[test_case(PieceKind::Pawn, Color::White, 'p')]
    #[test_case(PieceKind::King, Color::Black, 'K')]
    #[test_case(PieceKind::Knight, Color::Black, 'N')]
    #[test_case(PieceKind::Pawn, Color::Black, 'P')]
    fn test_to_char(kind: PieceKind, color: Color, want: char) {
        assert_eq!(Piece::new(kind, color).to_char(), want);
    }

    #[test]
    fn test_char_round_trip() -> TestResult {
        for color in Color::iter() {
            for kind in PieceKind::iter() {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::try_from(piece.to_char())?, piece);
            }
        }
        Ok(())
    }

    #[test]
    fn test_from_char_invalid() {
        assert_eq!(Piece::try_from('x'), Err(PieceError::FromChar('x')));
    }

    #[test]
    fn test_color() {
        assert_eq!(Color::White.other(), Color::Black);
        assert_eq!(Color::Black.other(), Color::White);
        assert_eq!(Color::White.first_row(), 1);
        assert_eq!(Color::Black.first_row(), 8);
        assert_eq!(Color::White.pawn_row(), 2);
        assert_eq!(Color::Black.pawn_row(), 7);
    }

    #[test]
    fn test_symbol() {
        assert_eq!(Piece::new(PieceKind::King, Color::White).symbol(), '♔');
        assert_eq!(Piece::new(PieceKind::Pawn, Color::Black).symbol(), '♟');
    }
}
