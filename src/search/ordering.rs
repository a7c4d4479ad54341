//! Cheap move ordering: captures first (most valuable victim, least
//! valuable attacker), promotions by the value of the new piece.

use crate::board::{PieceKind, Position};
use crate::eval::piece_value;
use crate::moves::Move;
use std::cmp::Reverse;

/// Lifts every capture above every quiet move.
const CAPTURE_BONUS: i32 = 100_000;

/// Ordering score of `mv`; higher is searched first.
pub fn move_score(pos: &Position, mv: Move) -> i32 {
    let mut score = 0;

    let victim = if mv.is_passant() {
        Some(PieceKind::Pawn)
    } else if mv.is_capture() {
        pos.piece_on(mv.to()).map(|p| p.kind())
    } else {
        None
    };
    if let Some(victim) = victim {
        score += CAPTURE_BONUS + 10 * piece_value(victim) - piece_value(mv.piece().kind());
    }

    if let Some(promote) = mv.promote() {
        score += piece_value(promote.kind());
    }

    score
}

/// Sort best-first. Equal scores keep generation order.
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| Reverse(move_score(pos, mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::*;

    #[test]
    fn test_captures_before_quiet_moves() {
        // Pawn can take queen or rook, knight can take the rook
        let pos = Position::from_fen("4k3/8/8/3q1r2/4P3/6N1/8/4K3 w - - 0 1").unwrap();
        let mut moves = pos.generate_moves();
        order_moves(&pos, &mut moves);
        assert_eq!(moves[0].to_string(), "e4d5");
        assert_eq!(moves[1].to_string(), "e4f5");
        assert_eq!(moves[2].to_string(), "g3f5");
        assert!(!moves[3].is_capture());
    }

    #[test]
    fn test_promotion_value() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let queen = Move::promotion(A7, A8, Piece::WhitePawn, Piece::WhiteQueen, false);
        let knight = Move::promotion(A7, A8, Piece::WhitePawn, Piece::WhiteKnight, false);
        assert!(move_score(&pos, queen) > move_score(&pos, knight));
        assert_eq!(move_score(&pos, Move::quiet(E1, E2, Piece::WhiteKing)), 0);
    }

    #[test]
    fn test_stable_for_equal_scores() {
        let pos = Position::start();
        let moves = pos.generate_moves();
        let mut ordered = moves.clone();
        order_moves(&pos, &mut ordered);
        assert_eq!(moves, ordered);
    }
}
