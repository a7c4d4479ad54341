//! Static evaluation: material plus piece-square tables.
//!
//! Tables are written from White's point of view with a8 in the top-left,
//! which is also the square order of the board. Black pieces read the
//! vertically mirrored square and count negatively.

use crate::board::{PieceKind, Position, Side, Square};

// ============================================================================
// MATERIAL VALUES (centipawns)
// ============================================================================
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 350;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 1000;
const KING_VALUE: i32 = 10000;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================

#[rustfmt::skip]
const PAWN_PSQT: [i32; 64] = [
    90, 90, 90, 90, 90, 90, 90, 90,
    30, 30, 30, 40, 40, 30, 30, 30,
    20, 20, 20, 30, 30, 30, 20, 20,
    10, 10, 10, 20, 20, 10, 10, 10,
     5,  5, 10, 20, 20,  5,  5,  5,
     0,  0,  0,  5,  5,  0,  0,  0,
     0,  0,  0,-10,-10,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PSQT: [i32; 64] = [
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0, 10, 10,  0,  0, -5,
    -5,  5, 20, 20, 20, 20,  5, -5,
    -5, 10, 20, 30, 30, 20, 10, -5,
    -5, 10, 20, 30, 30, 20, 10, -5,
    -5,  5, 20, 10, 10, 20,  5, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,-10,  0,  0,  0,  0,-10, -5,
];

#[rustfmt::skip]
const BISHOP_PSQT: [i32; 64] = [
    0,  0,  0,  0,  0,  0,  0,  0,
    0,  0,  0,  0,  0,  0,  0,  0,
    0,  0,  0, 10, 10,  0,  0,  0,
    0,  0, 10, 20, 20, 10,  0,  0,
    0,  0, 10, 20, 20, 10,  0,  0,
    0, 10,  0,  0,  0,  0, 10,  0,
    0, 30,  0,  0,  0,  0, 30,  0,
    0,  0,-10,  0,  0,-10,  0,  0,
];

#[rustfmt::skip]
const ROOK_PSQT: [i32; 64] = [
    50, 50, 50, 50, 50, 50, 50, 50,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0, 10, 20, 20, 10,  0,  0,
     0,  0, 10, 20, 20, 10,  0,  0,
     0,  0, 10, 20, 20, 10,  0,  0,
     0,  0, 10, 20, 20, 10,  0,  0,
     0,  0, 10, 20, 20, 10,  0,  0,
     0,  0,  0, 20, 20,  0,  0,  0,
];

#[rustfmt::skip]
const KING_PSQT: [i32; 64] = [
    0,  0,  0,  0,  0,  0,  0,  0,
    0,  0,  5,  5,  5,  5,  0,  0,
    0,  5,  5, 10, 10,  5,  5,  0,
    0,  5, 10, 20, 20, 10,  5,  0,
    0,  5, 10, 20, 20, 10,  5,  0,
    0,  0,  5, 10, 10,  5,  0,  0,
    0,  5,  5, -5, -5,  0,  5,  0,
    0,  0,  5,  0,-15,  0, 10,  0,
];

// Queens carry no positional term
const QUEEN_PSQT: [i32; 64] = [0; 64];

#[inline]
fn psqt(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PSQT,
        PieceKind::Knight => &KNIGHT_PSQT,
        PieceKind::Bishop => &BISHOP_PSQT,
        PieceKind::Rook => &ROOK_PSQT,
        PieceKind::Queen => &QUEEN_PSQT,
        PieceKind::King => &KING_PSQT,
    }
}

/// Square seen from White's side of the board.
#[inline]
fn relative_square(side: Side, sq: Square) -> Square {
    match side {
        Side::White => sq,
        Side::Black => sq ^ 56,
    }
}

/// Score from White's point of view.
pub fn evaluate(pos: &Position) -> i32 {
    pos.piece_squares()
        .map(|(sq, piece)| {
            let (kind, side) = (piece.kind(), piece.side());
            let value = piece_value(kind) + psqt(kind)[relative_square(side, sq)];
            match side {
                Side::White => value,
                Side::Black => -value,
            }
        })
        .sum()
}

/// Score from the side to move's point of view.
#[inline]
pub fn evaluate_relative(pos: &Position) -> i32 {
    match pos.side {
        Side::White => evaluate(pos),
        Side::Black => -evaluate(pos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let pos = Position::start();
        assert_eq!(evaluate(&pos), 0);
        assert_eq!(evaluate_relative(&pos), 0);
    }

    #[test]
    fn test_material_counts() {
        // White is a rook up; both kings on mirrored squares
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), ROOK_VALUE + ROOK_PSQT[56]);
        let black = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert_eq!(evaluate_relative(&black), -evaluate(&pos));
    }

    #[test]
    fn test_mirrored_positions_cancel() {
        let white = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/3n4/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&white), -evaluate(&black));
        assert_eq!(evaluate_relative(&white), evaluate_relative(&black));
    }

    #[test]
    fn test_pawn_advance_is_rewarded() {
        let home = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let advanced = Position::from_fen("4k3/8/4P3/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(evaluate(&advanced) > evaluate(&home));
    }
}
