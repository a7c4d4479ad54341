// Bitboard masks, iterators and precomputed non-sliding tables.
// Square 0 is a8, square 63 is h1: index = rank_from_top * 8 + file.

use crate::board::{Side, Square};
use std::sync::OnceLock;

// File masks (A is column 0, H column 7)
pub const FILE_A: u64 = 0x0101010101010101;
pub const FILE_B: u64 = 0x0202020202020202;
pub const FILE_G: u64 = 0x4040404040404040;
pub const FILE_H: u64 = 0x8080808080808080;

pub const NOT_FILE_A: u64 = !FILE_A;
pub const NOT_FILE_H: u64 = !FILE_H;
pub const NOT_FILE_AB: u64 = !(FILE_A | FILE_B);
pub const NOT_FILE_GH: u64 = !(FILE_G | FILE_H);

// Rank masks (a8 is square 0, so rank 8 is the lowest byte)
pub const RANK_8: u64 = 0x00000000000000FF;
pub const RANK_7: u64 = 0x000000000000FF00;
pub const RANK_2: u64 = 0x00FF000000000000;
pub const RANK_1: u64 = 0xFF00000000000000;

// Bit operations
#[inline]
pub fn square_bb(sq: Square) -> u64 {
    1u64 << sq
}

#[inline]
pub fn pop_lsb(bb: &mut u64) -> Option<Square> {
    if *bb == 0 {
        return None;
    }
    let lsb = bb.trailing_zeros() as Square;
    *bb &= *bb - 1;
    Some(lsb)
}

#[inline]
pub fn lsb_index(bb: u64) -> Option<Square> {
    if bb == 0 {
        None
    } else {
        Some(bb.trailing_zeros() as Square)
    }
}

#[inline]
pub fn count_bits(bb: u64) -> u32 {
    bb.count_ones()
}

pub struct BitIter {
    bb: u64,
}

impl Iterator for BitIter {
    type Item = Square;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.bb)
    }
}

#[inline]
pub fn iter_bits(bb: u64) -> BitIter {
    BitIter { bb }
}

// Precomputed leaper tables using OnceLock for thread safety
struct LeaperTables {
    knight: [u64; 64],
    king: [u64; 64],
    // indexed by Side as usize
    pawn: [[u64; 64]; 2],
}

static LEAPER_TABLES: OnceLock<LeaperTables> = OnceLock::new();
static LINES_BETWEEN: OnceLock<Box<[[u64; 64]; 64]>> = OnceLock::new();

fn knight_mask(bb: u64) -> u64 {
    ((bb << 17) & NOT_FILE_A)
        | ((bb << 15) & NOT_FILE_H)
        | ((bb << 10) & NOT_FILE_AB)
        | ((bb << 6) & NOT_FILE_GH)
        | ((bb >> 17) & NOT_FILE_H)
        | ((bb >> 15) & NOT_FILE_A)
        | ((bb >> 10) & NOT_FILE_GH)
        | ((bb >> 6) & NOT_FILE_AB)
}

fn king_mask(bb: u64) -> u64 {
    (bb << 8)
        | (bb >> 8)
        | ((bb << 1) & NOT_FILE_A)
        | ((bb >> 1) & NOT_FILE_H)
        | ((bb << 9) & NOT_FILE_A)
        | ((bb << 7) & NOT_FILE_H)
        | ((bb >> 9) & NOT_FILE_H)
        | ((bb >> 7) & NOT_FILE_A)
}

// White pawns advance towards lower indices, Black towards higher ones.
fn pawn_mask(side: Side, bb: u64) -> u64 {
    match side {
        Side::White => ((bb >> 9) & NOT_FILE_H) | ((bb >> 7) & NOT_FILE_A),
        Side::Black => ((bb << 7) & NOT_FILE_H) | ((bb << 9) & NOT_FILE_A),
    }
}

fn init_leaper_tables() -> LeaperTables {
    let mut tables = LeaperTables {
        knight: [0; 64],
        king: [0; 64],
        pawn: [[0; 64]; 2],
    };
    for sq in 0..64 {
        let bb = square_bb(sq);
        tables.knight[sq] = knight_mask(bb);
        tables.king[sq] = king_mask(bb);
        tables.pawn[Side::White as usize][sq] = pawn_mask(Side::White, bb);
        tables.pawn[Side::Black as usize][sq] = pawn_mask(Side::Black, bb);
    }
    tables
}

fn init_lines_between() -> Box<[[u64; 64]; 64]> {
    let mut lines = Box::new([[0u64; 64]; 64]);
    for from in 0..64usize {
        for to in 0..64usize {
            let (fr, ff) = ((from / 8) as i32, (from % 8) as i32);
            let (tr, tf) = ((to / 8) as i32, (to % 8) as i32);
            let (dr, df) = (tr - fr, tf - ff);
            let aligned = dr == 0 || df == 0 || dr.abs() == df.abs();
            if from == to || !aligned {
                continue;
            }
            let (step_r, step_f) = (dr.signum(), df.signum());
            let (mut r, mut f) = (fr + step_r, ff + step_f);
            let mut mask = 0u64;
            while (r, f) != (tr, tf) {
                mask |= square_bb((r * 8 + f) as Square);
                r += step_r;
                f += step_f;
            }
            lines[from][to] = mask;
        }
    }
    lines
}

#[inline(always)]
pub fn init_attack_tables() {
    LEAPER_TABLES.get_or_init(init_leaper_tables);
    LINES_BETWEEN.get_or_init(init_lines_between);
}

#[inline]
fn leapers() -> &'static LeaperTables {
    LEAPER_TABLES.get_or_init(init_leaper_tables)
}

#[inline]
pub fn knight_attacks(sq: Square) -> u64 {
    leapers().knight[sq]
}

#[inline]
pub fn king_attacks(sq: Square) -> u64 {
    leapers().king[sq]
}

/// Squares attacked by a pawn of `side` standing on `sq`.
#[inline]
pub fn pawn_attacks(side: Side, sq: Square) -> u64 {
    leapers().pawn[side as usize][sq]
}

/// Squares strictly between `from` and `to` when they share a rank, file or
/// diagonal; empty otherwise.
#[inline]
pub fn line_between(from: Square, to: Square) -> u64 {
    LINES_BETWEEN.get_or_init(init_lines_between)[from][to]
}
