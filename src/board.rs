//! Board representation: pieces, sides, squares and the `Position` model.
//!
//! A position is twelve piece bitboards plus three occupancy masks derived
//! from them (White, Black, both). Every mutation goes through
//! [`Position::toggle`] so the masks never drift from the piece boards.

use crate::magic::{bishop_attacks, rook_attacks};
use crate::utils::{iter_bits, king_attacks, knight_attacks, lsb_index, pawn_attacks, square_bb};

/// Square index, 0 = a8 through 63 = h1.
pub type Square = usize;

pub const A8: Square = 0;
pub const B8: Square = 1;
pub const C8: Square = 2;
pub const D8: Square = 3;
pub const E8: Square = 4;
pub const F8: Square = 5;
pub const G8: Square = 6;
pub const H8: Square = 7;
pub const A7: Square = 8;
pub const B7: Square = 9;
pub const C7: Square = 10;
pub const D7: Square = 11;
pub const E7: Square = 12;
pub const F7: Square = 13;
pub const G7: Square = 14;
pub const H7: Square = 15;
pub const A6: Square = 16;
pub const B6: Square = 17;
pub const C6: Square = 18;
pub const D6: Square = 19;
pub const E6: Square = 20;
pub const F6: Square = 21;
pub const G6: Square = 22;
pub const H6: Square = 23;
pub const A5: Square = 24;
pub const B5: Square = 25;
pub const C5: Square = 26;
pub const D5: Square = 27;
pub const E5: Square = 28;
pub const F5: Square = 29;
pub const G5: Square = 30;
pub const H5: Square = 31;
pub const A4: Square = 32;
pub const B4: Square = 33;
pub const C4: Square = 34;
pub const D4: Square = 35;
pub const E4: Square = 36;
pub const F4: Square = 37;
pub const G4: Square = 38;
pub const H4: Square = 39;
pub const A3: Square = 40;
pub const B3: Square = 41;
pub const C3: Square = 42;
pub const D3: Square = 43;
pub const E3: Square = 44;
pub const F3: Square = 45;
pub const G3: Square = 46;
pub const H3: Square = 47;
pub const A2: Square = 48;
pub const B2: Square = 49;
pub const C2: Square = 50;
pub const D2: Square = 51;
pub const E2: Square = 52;
pub const F2: Square = 53;
pub const G2: Square = 54;
pub const H2: Square = 55;
pub const A1: Square = 56;
pub const B1: Square = 57;
pub const C1: Square = 58;
pub const D1: Square = 59;
pub const E1: Square = 60;
pub const F1: Square = 61;
pub const G1: Square = 62;
pub const H1: Square = 63;

#[rustfmt::skip]
pub const SQUARE_NAMES: [&str; 64] = [
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
];

/// Parse a square name such as `e4`.
pub fn square_from_name(name: &str) -> Option<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file >= 8 || rank >= 8 {
        return None;
    }
    Some((7 - rank as usize) * 8 + file as usize)
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Castle right bits
pub const CASTLE_WHITE_KING: u8 = 0b0001;
pub const CASTLE_WHITE_QUEEN: u8 = 0b0010;
pub const CASTLE_BLACK_KING: u8 = 0b0100;
pub const CASTLE_BLACK_QUEEN: u8 = 0b1000;
pub const CASTLE_WHITE: u8 = CASTLE_WHITE_KING | CASTLE_WHITE_QUEEN;
pub const CASTLE_BLACK: u8 = CASTLE_BLACK_KING | CASTLE_BLACK_QUEEN;
pub const CASTLE_ALL: u8 = CASTLE_WHITE | CASTLE_BLACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase letter used in move text and FEN.
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// One of the twelve coloured pieces; White variants come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    WhitePawn = 0,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
}

impl Piece {
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    #[inline]
    pub fn new(kind: PieceKind, side: Side) -> Piece {
        Piece::ALL[side as usize * 6 + kind as usize]
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Piece> {
        Piece::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn side(self) -> Side {
        if (self as u8) < 6 {
            Side::White
        } else {
            Side::Black
        }
    }

    #[inline]
    pub fn kind(self) -> PieceKind {
        PieceKind::ALL[self as usize % 6]
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn to_char(self) -> char {
        let c = self.kind().to_char();
        match self.side() {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Piece::new(kind, side))
    }
}

const BOTH: usize = 2;

/// Complete game state. `Copy`, so search can hand every child its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    boards: [u64; 12],
    // White, Black, both
    covers: [u64; 3],
    pub side: Side,
    /// Square a pawn skipped over on the previous ply, if any.
    pub passant: Option<Square>,
    pub castle: u8,
    /// Half-moves since the last capture or pawn move.
    pub clock: u32,
    /// Full-move counter, starts at 1 and grows after each Black move.
    pub turns: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Position {
    /// Empty board, White to move, no rights.
    pub fn empty() -> Self {
        Position {
            boards: [0; 12],
            covers: [0; 3],
            side: Side::White,
            passant: None,
            castle: 0,
            clock: 0,
            turns: 1,
        }
    }

    /// The standard initial position.
    pub fn start() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut pos = Position::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            pos.put_piece(Piece::new(kind, Side::Black), A8 + file);
            pos.put_piece(Piece::BlackPawn, A7 + file);
            pos.put_piece(Piece::WhitePawn, A2 + file);
            pos.put_piece(Piece::new(kind, Side::White), A1 + file);
        }
        pos.castle = CASTLE_ALL;
        pos
    }

    #[inline]
    pub fn pieces(&self, piece: Piece) -> u64 {
        self.boards[piece as usize]
    }

    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, side: Side) -> u64 {
        self.boards[Piece::new(kind, side) as usize]
    }

    /// All squares occupied by `side`.
    #[inline]
    pub fn occupancy(&self, side: Side) -> u64 {
        self.covers[side as usize]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.covers[BOTH]
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        let bb = square_bb(sq);
        if self.covers[BOTH] & bb == 0 {
            return None;
        }
        let range = if self.covers[Side::White as usize] & bb != 0 {
            0..6
        } else {
            6..12
        };
        range
            .into_iter()
            .find(|&i| self.boards[i] & bb != 0)
            .and_then(Piece::from_index)
    }

    #[inline]
    pub fn king_square(&self, side: Side) -> Option<Square> {
        lsb_index(self.pieces_of(PieceKind::King, side))
    }

    /// Flip `piece` on `sq` in its board and in the occupancy masks.
    #[inline]
    pub(crate) fn toggle(&mut self, piece: Piece, sq: Square) {
        let bb = square_bb(sq);
        self.boards[piece as usize] ^= bb;
        self.covers[piece.side() as usize] ^= bb;
        self.covers[BOTH] ^= bb;
    }

    /// Place `piece` on `sq`, replacing whatever stood there.
    pub fn put_piece(&mut self, piece: Piece, sq: Square) {
        self.remove_piece(sq);
        self.toggle(piece, sq);
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_on(sq)?;
        self.toggle(piece, sq);
        Some(piece)
    }

    /// True if any piece of `by` attacks `sq` on the current board.
    pub fn is_square_attacked(&self, sq: Square, by: Side) -> bool {
        if pawn_attacks(by.opposite(), sq) & self.pieces_of(PieceKind::Pawn, by) != 0 {
            return true;
        }
        if knight_attacks(sq) & self.pieces_of(PieceKind::Knight, by) != 0 {
            return true;
        }
        if king_attacks(sq) & self.pieces_of(PieceKind::King, by) != 0 {
            return true;
        }
        let occ = self.occupied();
        let queens = self.pieces_of(PieceKind::Queen, by);
        if bishop_attacks(sq, occ) & (self.pieces_of(PieceKind::Bishop, by) | queens) != 0 {
            return true;
        }
        rook_attacks(sq, occ) & (self.pieces_of(PieceKind::Rook, by) | queens) != 0
    }

    /// Whether the side to move is in check. A side without a king counts
    /// as checked, so a search reaching such a node scores it as lost.
    pub fn in_check(&self) -> bool {
        match self.king_square(self.side) {
            Some(king) => self.is_square_attacked(king, self.side.opposite()),
            None => true,
        }
    }

    /// Occupancy masks agree with the piece boards and no square holds two
    /// pieces.
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0u64;
        let mut sides = [0u64; 2];
        for piece in Piece::ALL {
            let bb = self.boards[piece as usize];
            if seen & bb != 0 {
                return false;
            }
            seen |= bb;
            sides[piece.side() as usize] |= bb;
        }
        seen == self.covers[BOTH]
            && sides[0] == self.covers[Side::White as usize]
            && sides[1] == self.covers[Side::Black as usize]
            && sides[0] | sides[1] == self.covers[BOTH]
    }

    /// Iterator over `(square, piece)` pairs for every occupied square.
    pub fn piece_squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Piece::ALL
            .into_iter()
            .flat_map(move |piece| iter_bits(self.pieces(piece)).map(move |sq| (sq, piece)))
    }
}
