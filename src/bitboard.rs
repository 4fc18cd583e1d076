use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::field::Field;

/// A set of fields, one bit per field in `Field` order (A1 is the lowest bit).
#[derive(PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct BitBoard(u64);

impl BitBoard {
    pub const fn empty() -> Self {
        BitBoard(0)
    }

    pub const fn from_field(field: Field) -> Self {
        BitBoard(1 << (field as u8))
    }

    pub fn from_fields(fields: &[Field]) -> Self {
        BitBoard(fields.iter().fold(0, |board, f| board | 1 << (*f as u8)))
    }

    pub fn set_field(&mut self, field: Field) {
        self.0 |= 1 << field as u64
    }

    pub fn is_field_set(&self, field: Field) -> bool {
        self.0 & 1 << (field as u64) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Set fields in ascending order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Field::from_repr(idx)
        })
    }
}

impl FromIterator<Field> for BitBoard {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        let mut bb = BitBoard::empty();
        for field in iter {
            bb.set_field(field);
        }
        bb
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    fn bitor(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 | other.0)
    }
}

impl BitOrAssign for BitBoard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;

    fn bitand(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 & other.0)
    }
}

impl BitAndAssign for BitBoard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl Not for BitBoard {
    type Output = BitBoard;

    fn not(self) -> Self::Output {
        BitBoard(!self.0)
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);

        for row in (1..=8).rev() {
            for col in 1..=8 {
                let ch = match Field::new(col, row) {
                    Ok(field) if self.is_field_set(field) => 'X',
                    _ => '.',
                };
                board_str.push(ch);
            }
            if row != 1 {
                board_str.push('\n');
            }
        }

        write!(f, "{}", board_str)
    }
}
