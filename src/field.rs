use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, FromRepr};

use crate::piece::Color;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field out of board: col {col}, row {row}")]
    InvalidField { col: i8, row: i8 },

    #[error("field notation: want [a-h][1-8], got {0}")]
    Parse(String),
}

#[allow(dead_code)]
#[rustfmt::skip]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, FromRepr, Display, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Field {
    /// Field at 1-based `col` and `row`. Out of board coordinates are an error, never clamped.
    pub fn new(col: i8, row: i8) -> Result<Field, FieldError> {
        if !Field::is_valid(col, row) {
            return Err(FieldError::InvalidField { col, row });
        }
        Ok(Field::from_coords(col, row))
    }

    pub const fn is_valid(col: i8, row: i8) -> bool {
        col >= 1 && col <= 8 && row >= 1 && row <= 8
    }

    pub const fn col(self) -> i8 {
        (self as u8 % 8) as i8 + 1
    }

    pub const fn row(self) -> i8 {
        (self as u8 / 8) as i8 + 1
    }

    /// Field moved by `dc` columns and `dr` rows, `None` once the step leaves the board.
    pub fn relative(self, dc: i8, dr: i8) -> Option<Field> {
        let (col, row) = (self.col() + dc, self.row() + dr);
        Field::is_valid(col, row).then(|| Field::from_coords(col, row))
    }

    /// Whether the field lies on the row where pawns of `color` promote.
    pub fn is_last_row(self, color: Color) -> bool {
        self.row() == color.other().first_row()
    }

    /// Caller guarantees `col` and `row` are in 1..=8.
    pub(crate) fn from_coords(col: i8, row: i8) -> Field {
        debug_assert!(Field::is_valid(col, row));
        match Field::from_repr(((row - 1) * 8 + (col - 1)) as u8) {
            Some(field) => field,
            None => unreachable!("coordinates checked before lookup"),
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(col_ch), Some(row_ch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(FieldError::Parse(s.to_string()));
        };

        if !('a'..='h').contains(&col_ch) || !('1'..='8').contains(&row_ch) {
            return Err(FieldError::Parse(s.to_string()));
        }

        let col = (col_ch as u8 - b'a') as i8 + 1;
        let row = (row_ch as u8 - b'0') as i8;
        Field::new(col, row)
    }
}
