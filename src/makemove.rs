// Move execution: copy-make state transition, no validation

use crate::board::*;
use crate::movegen::castle_rule;
use crate::moves::Move;

/// Rights lost when a piece leaves, or is captured on, each square.
const SQUARE_CASTLES: [u8; 64] = {
    let mut table = [0u8; 64];
    table[A8] = CASTLE_BLACK_QUEEN;
    table[E8] = CASTLE_BLACK;
    table[H8] = CASTLE_BLACK_KING;
    table[A1] = CASTLE_WHITE_QUEEN;
    table[E1] = CASTLE_WHITE;
    table[H1] = CASTLE_WHITE_KING;
    table
};

impl Position {
    /// Apply `mv`, which must be legal in this position.
    pub fn make_move(&mut self, mv: Move) {
        let (from, to, piece) = (mv.from(), mv.to(), mv.piece());
        let side = self.side;

        self.clock += 1;
        self.passant = None;

        if mv.is_castle() {
            self.make_castle(mv);
        } else {
            if mv.is_capture() {
                if let Some(victim) = self.piece_on(to) {
                    self.toggle(victim, to);
                }
                self.clock = 0;
            }
            if piece.kind() == PieceKind::Pawn {
                self.make_pawn(mv);
            } else {
                self.toggle(piece, from);
                self.toggle(piece, to);
            }
        }

        let mut lost = SQUARE_CASTLES[from];
        if mv.is_capture() {
            lost |= SQUARE_CASTLES[to];
        }
        self.castle &= !lost;

        if side == Side::Black {
            self.turns += 1;
        }
        self.side = side.opposite();
    }

    /// Copy of this position with `mv` applied.
    pub fn with_move(&self, mv: Move) -> Position {
        let mut next = *self;
        next.make_move(mv);
        next
    }

    fn make_pawn(&mut self, mv: Move) {
        let (from, to, pawn) = (mv.from(), mv.to(), mv.piece());
        self.clock = 0;

        self.toggle(pawn, from);
        self.toggle(mv.promote().unwrap_or(pawn), to);

        if mv.is_double() {
            self.passant = Some((from + to) / 2);
        } else if mv.is_passant() {
            let behind = match pawn.side() {
                Side::White => to + 8,
                Side::Black => to - 8,
            };
            self.toggle(Piece::new(PieceKind::Pawn, pawn.side().opposite()), behind);
        }
    }

    fn make_castle(&mut self, mv: Move) {
        let king = mv.piece();
        self.toggle(king, mv.from());
        self.toggle(king, mv.to());

        if let Some(rule) = castle_rule(mv.to()) {
            let rook = Piece::new(PieceKind::Rook, king.side());
            self.toggle(rook, rule.rook_from);
            self.toggle(rook, rule.rook_to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(pos: &mut Position, text: &str) {
        let mv = pos.parse_move(text).unwrap();
        assert!(pos.is_legal(mv), "{text} should be legal in {}", pos.to_fen());
        pos.make_move(mv);
        assert!(pos.is_consistent());
    }

    #[test]
    fn test_counters() {
        let mut pos = Position::start();
        play(&mut pos, "g1f3");
        assert_eq!((pos.side, pos.clock, pos.turns), (Side::Black, 1, 1));
        play(&mut pos, "g8f6");
        assert_eq!((pos.side, pos.clock, pos.turns), (Side::White, 2, 2));
        play(&mut pos, "e2e4");
        assert_eq!((pos.clock, pos.turns), (0, 2));
    }

    #[test]
    fn test_capture_resets_clock() {
        let mut pos = Position::from_fen("4k3/8/8/3n4/8/4N3/8/4K3 w - - 7 30").unwrap();
        play(&mut pos, "e3d5");
        assert_eq!(pos.clock, 0);
        assert_eq!(pos.piece_on(D5), Some(Piece::WhiteKnight));
        assert_eq!(pos.pieces(Piece::BlackKnight), 0);
    }

    #[test]
    fn test_promotion_with_capture() {
        let mut pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        play(&mut pos, "a7b8q");
        assert_eq!(pos.piece_on(B8), Some(Piece::WhiteQueen));
        assert_eq!(pos.pieces(Piece::WhitePawn), 0);
        assert_eq!(pos.pieces(Piece::BlackRook), 0);
    }

    #[test]
    fn test_black_castle_queen_side() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        play(&mut pos, "e8c8");
        assert_eq!(pos.piece_on(C8), Some(Piece::BlackKing));
        assert_eq!(pos.piece_on(D8), Some(Piece::BlackRook));
        assert_eq!(pos.piece_on(A8), None);
        assert_eq!(pos.castle, CASTLE_WHITE);
    }

    #[test]
    fn test_rook_moves_and_captures_clear_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut pos, "h1h8");
        // White loses h1, Black loses h8
        assert_eq!(pos.castle, CASTLE_WHITE_QUEEN | CASTLE_BLACK_QUEEN);
        play(&mut pos, "e8d7");
        assert_eq!(pos.castle, CASTLE_WHITE_QUEEN);
        play(&mut pos, "a1a2");
        assert_eq!(pos.castle, 0);
    }
}
