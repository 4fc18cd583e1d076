use arrayvec::ArrayVec;

use super::vectors::{piece_vectors, VectorLine};
use crate::board::Board;
use crate::field::Field;
use crate::piece::{Color, Piece};

/// Absolute fields along one vector line, stopped at the board edge.
pub type Ray = ArrayVec<Field, 8>;

pub type Rays = ArrayVec<Ray, 8>;

/// Maps each step of `line` onto the board from `origin`, truncating at the first off-board step.
pub fn relative_fields(origin: Field, line: &VectorLine) -> Ray {
    line.steps()
        .iter()
        .map_while(|&(dc, dr)| origin.relative(dc, dr))
        .collect()
}

pub fn piece_rays(piece: Piece, origin: Field, capture: bool) -> Rays {
    piece_vectors(piece, origin, capture)
        .iter()
        .map(|line| relative_fields(origin, line))
        .collect()
}

/// Empty prefix of every ray, in ray order.
pub fn free_destinations(board: &Board, rays: &[Ray]) -> Vec<Field> {
    rays.iter()
        .flat_map(|ray| ray.iter().copied().take_while(|&field| board.is_empty(field)))
        .collect()
}

/// First occupant of every ray when it belongs to the opponent of `color`.
pub fn capture_destinations(board: &Board, rays: &[Ray], color: Color) -> Vec<Field> {
    blockers_of(board, rays, color.other())
}

/// First occupant of every ray when it belongs to `color` itself.
pub fn defended_destinations(board: &Board, rays: &[Ray], color: Color) -> Vec<Field> {
    blockers_of(board, rays, color)
}

fn blockers_of(board: &Board, rays: &[Ray], owner: Color) -> Vec<Field> {
    rays.iter()
        .filter_map(|ray| first_blocker(board, ray))
        .filter(|&field| board.has_color(field, owner))
        .collect()
}

fn first_blocker(board: &Board, ray: &Ray) -> Option<Field> {
    ray.iter().copied().find(|&field| !board.is_empty(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field::*;
    use crate::piece::PieceKind;
    use test_case::test_case;

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    #[test]
    fn test_relative_fields_truncates_at_edge() {
        let rays = piece_rays(white(PieceKind::Bishop), B2, false);
        assert_eq!(rays[2].as_slice(), &[C1]);
        assert_eq!(rays[0].as_slice(), &[C3, D4, E5, F6, G7, H8]);
        assert_eq!(rays[3].as_slice(), &[A1]);
    }

    #[test]
    fn test_relative_fields_stops_at_first_invalid() {
        let line = &piece_vectors(white(PieceKind::Rook), H1, false)[0];
        assert!(relative_fields(H1, line).is_empty());
    }

    #[test]
    fn test_piece_rays_rook() {
        let rays = piece_rays(white(PieceKind::Rook), C4, false);
        let got: Vec<Vec<Field>> = rays.iter().map(|ray| ray.to_vec()).collect();
        assert_eq!(
            got,
            vec![
                vec![D4, E4, F4, G4, H4],
                vec![B4, A4],
                vec![C5, C6, C7, C8],
                vec![C3, C2, C1],
            ]
        );
    }

    #[test]
    fn test_piece_rays_knight_corner() {
        let rays = piece_rays(white(PieceKind::Knight), B1, false);
        let got: Vec<Vec<Field>> = rays.iter().map(|ray| ray.to_vec()).collect();
        assert_eq!(
            got,
            vec![vec![C3], vec![D2], vec![A3], vec![], vec![], vec![], vec![], vec![]]
        );
    }

    #[test_case(B2, false, vec![vec![B3, B4]] ; "white start push")]
    #[test_case(B2, true, vec![vec![A3], vec![C3]] ; "white capture")]
    #[test_case(A2, true, vec![vec![], vec![B3]] ; "white capture edge")]
    fn test_piece_rays_pawn(origin: Field, capture: bool, want: Vec<Vec<Field>>) {
        let rays = piece_rays(white(PieceKind::Pawn), origin, capture);
        let got: Vec<Vec<Field>> = rays.iter().map(|ray| ray.to_vec()).collect();
        assert_eq!(got, want);
    }

    #[test_case(PieceKind::Rook, vec![D4, E4, F4, G4, H4, B4, A4, C5, C6, C3] ; "rook")]
    #[test_case(PieceKind::Bishop, vec![D5, E6, B5, A6, D3, B3] ; "bishop")]
    fn test_free_destinations(kind: PieceKind, want: Vec<Field>) {
        let rays = piece_rays(white(kind), C4, false);
        assert_eq!(free_destinations(&Board::start(), &rays), want);
    }

    #[test_case(PieceKind::Rook, vec![C7] ; "rook")]
    #[test_case(PieceKind::Bishop, vec![F7] ; "bishop")]
    fn test_capture_destinations(kind: PieceKind, want: Vec<Field>) {
        let rays = piece_rays(white(kind), C4, false);
        assert_eq!(capture_destinations(&Board::start(), &rays, Color::White), want);
    }

    #[test_case(PieceKind::Rook, vec![C2] ; "rook")]
    #[test_case(PieceKind::Bishop, vec![E2, A2] ; "bishop")]
    fn test_defended_destinations(kind: PieceKind, want: Vec<Field>) {
        let rays = piece_rays(white(kind), C4, false);
        assert_eq!(defended_destinations(&Board::start(), &rays, Color::White), want);
    }

    #[test]
    fn test_classifiers_stop_at_first_blocker() {
        // Own knight on c6 hides the black pawn on c7.
        let board = Board::start().with_piece(C6, white(PieceKind::Knight));
        let rays = piece_rays(white(PieceKind::Rook), C4, false);
        assert!(capture_destinations(&board, &rays, Color::White).is_empty());
        assert_eq!(defended_destinations(&board, &rays, Color::White), vec![C6, C2]);
        assert!(!free_destinations(&board, &rays).contains(&C7));
    }
}
