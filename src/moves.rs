//! Packed move representation and its coordinate text form.
//!
//! Layout of the 32-bit value:
//! - bits 0-5: source square
//! - bits 6-11: target square
//! - bits 12-15: moving piece
//! - bits 16-19: promotion piece (`0xF` = none)
//! - bit 20: capture, 21: double push, 22: en passant, 23: castle

use crate::board::{square_from_name, Piece, PieceKind, Position, Square, SQUARE_NAMES};
use crate::error::MoveParseError;
use std::fmt;

const SQUARE_MASK: u32 = 0x3f;
const TARGET_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTE_SHIFT: u32 = 16;
const NIBBLE_MASK: u32 = 0xf;
const NO_PROMOTE: u32 = 0xf;

pub const FLAG_CAPTURE: u32 = 1 << 20;
pub const FLAG_DOUBLE: u32 = 1 << 21;
pub const FLAG_PASSANT: u32 = 1 << 22;
pub const FLAG_CASTLE: u32 = 1 << 23;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    #[inline]
    pub fn new(from: Square, to: Square, piece: Piece, promote: Option<Piece>, flags: u32) -> Move {
        let promote = promote.map_or(NO_PROMOTE, |p| p as u32);
        Move(
            (from as u32 & SQUARE_MASK)
                | ((to as u32 & SQUARE_MASK) << TARGET_SHIFT)
                | ((piece as u32) << PIECE_SHIFT)
                | (promote << PROMOTE_SHIFT)
                | flags,
        )
    }

    #[inline]
    pub fn quiet(from: Square, to: Square, piece: Piece) -> Move {
        Move::new(from, to, piece, None, 0)
    }

    #[inline]
    pub fn capture(from: Square, to: Square, piece: Piece) -> Move {
        Move::new(from, to, piece, None, FLAG_CAPTURE)
    }

    #[inline]
    pub fn double_push(from: Square, to: Square, piece: Piece) -> Move {
        Move::new(from, to, piece, None, FLAG_DOUBLE)
    }

    /// En-passant captures land on an empty square, so they carry no
    /// capture flag.
    #[inline]
    pub fn en_passant(from: Square, to: Square, piece: Piece) -> Move {
        Move::new(from, to, piece, None, FLAG_PASSANT)
    }

    #[inline]
    pub fn castle(from: Square, to: Square, king: Piece) -> Move {
        Move::new(from, to, king, None, FLAG_CASTLE)
    }

    #[inline]
    pub fn promotion(from: Square, to: Square, pawn: Piece, promote: Piece, capture: bool) -> Move {
        let flags = if capture { FLAG_CAPTURE } else { 0 };
        Move::new(from, to, pawn, Some(promote), flags)
    }

    #[inline]
    pub fn from(self) -> Square {
        (self.0 & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn to(self) -> Square {
        ((self.0 >> TARGET_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn piece(self) -> Piece {
        Piece::ALL[((self.0 >> PIECE_SHIFT) & NIBBLE_MASK) as usize]
    }

    #[inline]
    pub fn promote(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> PROMOTE_SHIFT) & NIBBLE_MASK) as usize)
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.0 & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_double(self) -> bool {
        self.0 & FLAG_DOUBLE != 0
    }

    #[inline]
    pub fn is_passant(self) -> bool {
        self.0 & FLAG_PASSANT != 0
    }

    #[inline]
    pub fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLE != 0
    }

    #[inline]
    pub fn is_promotion(self) -> bool {
        self.promote().is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SQUARE_NAMES[self.from()], SQUARE_NAMES[self.to()])?;
        if let Some(promote) = self.promote() {
            write!(f, "{}", promote.kind().to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?}", self, self.piece())?;
        for (set, name) in [
            (self.is_capture(), "capture"),
            (self.is_double(), "double"),
            (self.is_passant(), "passant"),
            (self.is_castle(), "castle"),
        ] {
            if set {
                write!(f, " {}", name)?;
            }
        }
        write!(f, ")")
    }
}

impl Position {
    /// Decode coordinate text (`e2e4`, `e7e8q`) into a move for this
    /// position. The moving piece and the flags are read off the board the
    /// same way the generator sets them; legality is not checked.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(MoveParseError::Length(text.to_string()));
        }
        let from = square_from_name(&text[0..2])
            .ok_or_else(|| MoveParseError::InvalidSquare(text.to_string()))?;
        let to = square_from_name(&text[2..4])
            .ok_or_else(|| MoveParseError::InvalidSquare(text.to_string()))?;
        let piece = self
            .piece_on(from)
            .ok_or_else(|| MoveParseError::EmptySource(text.to_string()))?;

        let promote = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(
                    kind @ (PieceKind::Knight
                    | PieceKind::Bishop
                    | PieceKind::Rook
                    | PieceKind::Queen),
                ) => Some(Piece::new(kind, self.side)),
                _ => return Err(MoveParseError::InvalidPromotion(c)),
            },
        };

        let mut flags = 0;
        if self.piece_on(to).is_some() {
            flags |= FLAG_CAPTURE;
        }
        match piece.kind() {
            PieceKind::Pawn => {
                if from.abs_diff(to) == 16 {
                    flags |= FLAG_DOUBLE;
                } else if self.passant == Some(to) && from % 8 != to % 8 {
                    flags |= FLAG_PASSANT;
                }
            }
            PieceKind::King => {
                if (from % 8).abs_diff(to % 8) == 2 {
                    flags |= FLAG_CASTLE;
                }
            }
            _ => {}
        }

        Ok(Move::new(from, to, piece, promote, flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::*;

    #[test]
    fn test_fields_are_independent() {
        let mv = Move::promotion(G7, H8, Piece::WhitePawn, Piece::WhiteKnight, true);
        assert_eq!(mv.from(), G7);
        assert_eq!(mv.to(), H8);
        assert_eq!(mv.piece(), Piece::WhitePawn);
        assert_eq!(mv.promote(), Some(Piece::WhiteKnight));
        assert!(mv.is_capture());
        assert!(!mv.is_double() && !mv.is_passant() && !mv.is_castle());

        let mv = Move::double_push(E7, E5, Piece::BlackPawn);
        assert_eq!((mv.from(), mv.to()), (E7, E5));
        assert_eq!(mv.promote(), None);
        assert!(mv.is_double() && !mv.is_capture());

        let mv = Move::castle(E8, C8, Piece::BlackKing);
        assert!(mv.is_castle());
        assert_eq!(mv.piece(), Piece::BlackKing);

        // Extreme squares and the last piece survive packing
        let mv = Move::capture(H1, A8, Piece::BlackKing);
        assert_eq!((mv.from(), mv.to(), mv.piece()), (H1, A8, Piece::BlackKing));
    }

    #[test]
    fn test_move_text() {
        assert_eq!(Move::quiet(E2, E4, Piece::WhitePawn).to_string(), "e2e4");
        assert_eq!(
            Move::promotion(E7, E8, Piece::WhitePawn, Piece::WhiteQueen, false).to_string(),
            "e7e8q"
        );
        assert_eq!(
            Move::promotion(B2, A1, Piece::BlackPawn, Piece::BlackRook, true).to_string(),
            "b2a1r"
        );
    }

    #[test]
    fn test_parse_move_flags() {
        let pos = Position::start();
        assert_eq!(pos.parse_move("e2e4"), Ok(Move::double_push(E2, E4, Piece::WhitePawn)));
        assert_eq!(pos.parse_move("g1f3"), Ok(Move::quiet(G1, F3, Piece::WhiteKnight)));

        let pos = Position::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").unwrap();
        assert_eq!(pos.parse_move("e5d6"), Ok(Move::en_passant(E5, D6, Piece::WhitePawn)));
        assert_eq!(pos.parse_move("e1g1"), Ok(Move::castle(E1, G1, Piece::WhiteKing)));
        assert_eq!(pos.parse_move("a1a8"), Ok(Move::capture(A1, A8, Piece::WhiteRook)));

        let pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pos.parse_move("b7b8n"),
            Ok(Move::promotion(B7, B8, Piece::WhitePawn, Piece::WhiteKnight, false))
        );
    }

    #[test]
    fn test_parse_move_errors() {
        let pos = Position::start();
        assert_eq!(pos.parse_move("e2"), Err(MoveParseError::Length("e2".to_string())));
        assert_eq!(
            pos.parse_move("e2e9"),
            Err(MoveParseError::InvalidSquare("e2e9".to_string()))
        );
        assert_eq!(
            pos.parse_move("e4e5"),
            Err(MoveParseError::EmptySource("e4e5".to_string()))
        );
        assert_eq!(pos.parse_move("e2e4k"), Err(MoveParseError::InvalidPromotion('k')));
    }
}
