use chess_rules::{Board, Color, Field, Piece, PieceKind};

/// Board from the placement part of a FEN string, where uppercase letters are White.
pub fn board_from_placement(placement: &str) -> Board {
    let mut board = Board::empty();
    for (idx, rank) in placement.split('/').enumerate() {
        let row = 8 - idx as i8;
        let mut col = 1;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as i8;
                continue;
            }
            let kind = PieceKind::try_from(ch).unwrap();
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            board = board.with_piece(Field::new(col, row).unwrap(), Piece::new(kind, color));
            col += 1;
        }
    }
    board
}
