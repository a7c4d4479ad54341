// Legality filter: structural checks, then copy-make and king safety

use crate::board::*;
use crate::movegen::{castle_rule, pawn_ranks, piece_attacks};
use crate::moves::Move;
use crate::utils::{line_between, pawn_attacks, square_bb};

impl Position {
    /// Whether `mv` may be played in this position.
    pub fn is_legal(&self, mv: Move) -> bool {
        if !self.is_pseudo_legal(mv) {
            return false;
        }

        let mut next = *self;
        next.make_move(mv);

        match next.king_square(self.side) {
            Some(king) => !next.is_square_attacked(king, self.side.opposite()),
            None => {
                tracing::error!(
                    mv = %mv,
                    fen = %self.to_fen(),
                    "mover has no king after the move, treating it as illegal"
                );
                false
            }
        }
    }

    /// Structural checks only: the move agrees with the board and the
    /// movement rules, ignoring whether the mover's king ends up attacked.
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        let (from, to, piece) = (mv.from(), mv.to(), mv.piece());

        if from == to || piece.side() != self.side || self.pieces(piece) & square_bb(from) == 0 {
            return false;
        }

        match self.piece_on(to) {
            Some(victim) if !mv.is_capture() || victim.side() == self.side => return false,
            None if mv.is_capture() => return false,
            _ => {}
        }

        if mv.is_castle() {
            return self.castle_is_pseudo_legal(mv);
        }
        if piece.kind() == PieceKind::Pawn {
            return self.pawn_is_pseudo_legal(mv);
        }
        if mv.is_double() || mv.is_passant() || mv.is_promotion() {
            return false;
        }

        let occ = self.occupied();
        line_between(from, to) & occ == 0
            && piece_attacks(piece.kind(), from, occ) & square_bb(to) != 0
    }

    fn pawn_is_pseudo_legal(&self, mv: Move) -> bool {
        let (from, to) = (mv.from(), mv.to());
        let side = self.side;
        let ranks = pawn_ranks(side);
        let step = to as i32 - from as i32;

        // Promotion exactly when landing on the last rank, to a real piece
        let lands_last = square_bb(to) & ranks.last != 0;
        match mv.promote() {
            Some(promote) => {
                if !lands_last
                    || promote.side() != side
                    || matches!(promote.kind(), PieceKind::Pawn | PieceKind::King)
                {
                    return false;
                }
            }
            None if lands_last => return false,
            None => {}
        }

        if mv.is_double() {
            let jumped = (from as i32 + ranks.push) as Square;
            return !mv.is_passant()
                && square_bb(from) & ranks.home != 0
                && step == 2 * ranks.push
                && self.occupied() & (square_bb(jumped) | square_bb(to)) == 0;
        }

        if mv.is_passant() {
            // The captured pawn sits one step behind the target
            let behind = (to as i32 - ranks.push) as Square;
            return self.passant == Some(to)
                && !mv.is_capture()
                && pawn_attacks(side, from) & square_bb(to) != 0
                && self.pieces_of(PieceKind::Pawn, side.opposite()) & square_bb(behind) != 0;
        }

        if mv.is_capture() {
            return pawn_attacks(side, from) & square_bb(to) != 0;
        }

        step == ranks.push
    }

    fn castle_is_pseudo_legal(&self, mv: Move) -> bool {
        let side = self.side;
        let Some(rule) = castle_rule(mv.to()) else {
            return false;
        };

        rule.side == side
            && mv.from() == rule.king_from
            && mv.piece() == Piece::new(PieceKind::King, side)
            && !mv.is_capture()
            && !mv.is_double()
            && !mv.is_passant()
            && !mv.is_promotion()
            && self.castle & rule.right != 0
            && self.pieces_of(PieceKind::Rook, side) & square_bb(rule.rook_from) != 0
            && self.occupied() & rule.between == 0
            && rule
                .safe
                .iter()
                .all(|&sq| !self.is_square_attacked(sq, side.opposite()))
    }
}
