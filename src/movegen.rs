// Move generation: pseudo-legal candidates per piece, filtered by legality

use crate::board::*;
use crate::magic::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::Move;
use crate::utils::{
    iter_bits, king_attacks, knight_attacks, pawn_attacks, square_bb, RANK_1, RANK_2, RANK_7,
    RANK_8,
};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

// ============================================================================
// CASTLING GEOMETRY
// ============================================================================

/// Squares involved in one castle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CastleRule {
    pub right: u8,
    pub side: Side,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty
    pub between: u64,
    /// King start, transit and destination, none of which may be attacked
    pub safe: [Square; 3],
}

pub(crate) const CASTLE_RULES: [CastleRule; 4] = [
    CastleRule {
        right: CASTLE_WHITE_KING,
        side: Side::White,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        rook_to: F1,
        between: (1 << F1) | (1 << G1),
        safe: [E1, F1, G1],
    },
    CastleRule {
        right: CASTLE_WHITE_QUEEN,
        side: Side::White,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        rook_to: D1,
        between: (1 << B1) | (1 << C1) | (1 << D1),
        safe: [E1, D1, C1],
    },
    CastleRule {
        right: CASTLE_BLACK_KING,
        side: Side::Black,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        rook_to: F8,
        between: (1 << F8) | (1 << G8),
        safe: [E8, F8, G8],
    },
    CastleRule {
        right: CASTLE_BLACK_QUEEN,
        side: Side::Black,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        rook_to: D8,
        between: (1 << B8) | (1 << C8) | (1 << D8),
        safe: [E8, D8, C8],
    },
];

/// The castle whose king lands on `king_to`.
pub(crate) fn castle_rule(king_to: Square) -> Option<&'static CastleRule> {
    CASTLE_RULES.iter().find(|rule| rule.king_to == king_to)
}

// ============================================================================
// PAWN GEOMETRY
// ============================================================================

/// Per-side pawn constants: push offset, home rank, rank a pawn promotes
/// from, and last rank.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PawnRanks {
    pub push: i32,
    pub home: u64,
    pub seventh: u64,
    pub last: u64,
}

#[inline]
pub(crate) fn pawn_ranks(side: Side) -> PawnRanks {
    match side {
        Side::White => PawnRanks {
            push: -8,
            home: RANK_2,
            seventh: RANK_7,
            last: RANK_8,
        },
        Side::Black => PawnRanks {
            push: 8,
            home: RANK_7,
            seventh: RANK_2,
            last: RANK_1,
        },
    }
}

/// Attack set of a non-pawn piece standing on `sq`.
#[inline]
pub fn piece_attacks(kind: PieceKind, sq: Square, occ: u64) -> u64 {
    match kind {
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occ),
        PieceKind::Rook => rook_attacks(sq, occ),
        PieceKind::Queen => queen_attacks(sq, occ),
        PieceKind::King => king_attacks(sq),
        PieceKind::Pawn => 0,
    }
}

impl Position {
    /// All legal moves for the side to move.
    pub fn generate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.generate_pseudo_moves(&mut moves);
        moves.retain(|&mv| self.is_legal(mv));
        moves
    }

    /// Candidate moves that follow piece movement rules; some may leave the
    /// mover's king attacked or break a castling precondition.
    pub fn generate_pseudo_moves(&self, moves: &mut Vec<Move>) {
        self.generate_pawn_pseudos(moves);
        for kind in [
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            self.generate_piece_pseudos(kind, moves);
        }
        self.generate_castle_pseudos(moves);
    }

    fn generate_pawn_pseudos(&self, moves: &mut Vec<Move>) {
        let side = self.side;
        let pawn = Piece::new(PieceKind::Pawn, side);
        let ranks = pawn_ranks(side);
        let empty = !self.occupied();
        let enemies = self.occupancy(side.opposite());

        for from in iter_bits(self.pieces(pawn)) {
            let promotes = square_bb(from) & ranks.seventh != 0;
            let to = from as i32 + ranks.push;
            // A pawn parked on its last rank has nowhere to go
            if !(0..64).contains(&to) {
                continue;
            }
            let to = to as Square;

            if empty & square_bb(to) != 0 {
                if promotes {
                    push_promotions(moves, from, to, pawn, false);
                } else {
                    moves.push(Move::quiet(from, to, pawn));
                    let jump = (to as i32 + ranks.push) as Square;
                    if square_bb(from) & ranks.home != 0 && empty & square_bb(jump) != 0 {
                        moves.push(Move::double_push(from, jump, pawn));
                    }
                }
            }

            let attacks = pawn_attacks(side, from);
            for target in iter_bits(attacks & enemies) {
                if promotes {
                    push_promotions(moves, from, target, pawn, true);
                } else {
                    moves.push(Move::capture(from, target, pawn));
                }
            }

            if let Some(passant) = self.passant {
                if attacks & square_bb(passant) != 0 {
                    moves.push(Move::en_passant(from, passant, pawn));
                }
            }
        }
    }

    fn generate_piece_pseudos(&self, kind: PieceKind, moves: &mut Vec<Move>) {
        let side = self.side;
        let piece = Piece::new(kind, side);
        let occ = self.occupied();
        let own = self.occupancy(side);
        let enemies = self.occupancy(side.opposite());

        for from in iter_bits(self.pieces(piece)) {
            for to in iter_bits(piece_attacks(kind, from, occ) & !own) {
                if enemies & square_bb(to) != 0 {
                    moves.push(Move::capture(from, to, piece));
                } else {
                    moves.push(Move::quiet(from, to, piece));
                }
            }
        }
    }

    fn generate_castle_pseudos(&self, moves: &mut Vec<Move>) {
        let king = Piece::new(PieceKind::King, self.side);
        for rule in CASTLE_RULES.iter().filter(|rule| rule.side == self.side) {
            if self.castle & rule.right != 0 && self.pieces(king) & square_bb(rule.king_from) != 0 {
                moves.push(Move::castle(rule.king_from, rule.king_to, king));
            }
        }
    }
}

fn push_promotions(moves: &mut Vec<Move>, from: Square, to: Square, pawn: Piece, capture: bool) {
    for kind in PROMOTION_KINDS {
        let promote = Piece::new(kind, pawn.side());
        moves.push(Move::promotion(from, to, pawn, promote, capture));
    }
}
