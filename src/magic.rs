//! Magic bitboards for O(1) sliding piece attack lookup.
//!
//! Every square owns a relevance mask (the squares whose occupancy can stop
//! a ray, board edges excluded). The masked occupancy is multiplied by a
//! per-square magic constant and shifted down to `popcount(mask)` bits,
//! giving a collision-free index into that square's slice of the attack
//! table. Tables are filled at startup by ray casting every subset of the
//! mask.

use crate::board::Square;
use std::sync::OnceLock;

// ============================================================================
// MAGIC NUMBERS
// ============================================================================

/// Rook magic numbers, one per square (a8 = 0).
const ROOK_MAGICS: [u64; 64] = [
    0x0C80001480244002, 0x0480200080400011, 0x1080200008100082, 0x8480080080247000,
    0x4A00200200080510, 0x0500020400380100, 0x0400020844008110, 0x9200040100304082,
    0x3082002080420900, 0x1902002081020040, 0x0082001122804600, 0x1021000900100020,
    0x4001000800100500, 0x8102000200841108, 0x0321000200010084, 0x0101800080004500,
    0x4440208000804001, 0x0140002008100024, 0x3000110020084100, 0x001D050020100008,
    0x0048008008040080, 0x8001010002080400, 0x0480040038511002, 0x8240020004448924,
    0x0180902080004008, 0x0800810100400020, 0x0400100880200380, 0x009A010A0010E041,
    0x4008008080040008, 0x4212000200041008, 0x0000100400810208, 0x0000004200308C01,
    0x0143A04002800880, 0x4220100048400021, 0x058100401100200A, 0x4450800800801000,
    0x0042001022000805, 0x0440040080800200, 0x0000011004000802, 0x0844040082000061,
    0x100C7089C0038000, 0x2120100040204004, 0x0000200104450011, 0x000410420022000A,
    0x04020020840A0010, 0x0204000810020200, 0x10C0820148240010, 0x0880040040820021,
    0x0020410022008200, 0x8040049840210100, 0x0061100082A00980, 0x0000100100082100,
    0x0600040800110100, 0x0003800201040080, 0x2000023028410400, 0x0000004401008200,
    0x20042912C1008001, 0x4002001041062082, 0x9004430810200101, 0x0080042100081001,
    0x0021000210040801, 0x0011000804000201, 0xA010080210408104, 0x2800028020590402,
];

/// Bishop magic numbers, one per square (a8 = 0).
const BISHOP_MAGICS: [u64; 64] = [
    0x0020086088008028, 0x800888491AC60100, 0x8A08208102010441, 0x02080A0020C00100,
    0x0144042004081010, 0x202444200400A000, 0x40008210032000A0, 0x5100840088211840,
    0x0402405401942301, 0x082110010A142041, 0xA411880204002900, 0x1012040420804020,
    0x91090410A8080200, 0x400320901008184C, 0x000D02038A084282, 0x0420420042084524,
    0x00420010044800A0, 0x000402C204840400, 0x00C4091881240100, 0x08D8208404009200,
    0x0402000402118000, 0x0B112082020D2002, 0x1463000A08090520, 0x0220400084008800,
    0x02080981A0200120, 0x0812202410048480, 0x000088041000202A, 0x1404010030200880,
    0x9001010020104010, 0x0009020200405004, 0x003164002A420800, 0x4000810002012084,
    0x0310021000081050, 0x0004903041144400, 0x2402080240040701, 0x2002020081180080,
    0xC008020400001100, 0x0081011200010040, 0xF2010800A0920201, 0x010200A202882200,
    0x88084C1008440500, 0x0018424804002010, 0x848101E101015010, 0x8000812214000800,
    0x8002080101003010, 0x8109100505108200, 0x0202028802002100, 0x0044140414400020,
    0x6090880808040004, 0x0000410801100000, 0x0030820E4A180280, 0xC020024820881440,
    0x202006C0C5010000, 0x000A042024011000, 0x8020040188010020, 0x8084810C04048298,
    0x0460240200900800, 0x0062208088411000, 0x4048010200520802, 0x0041000010840404,
    0x0002008640028220, 0x0920A004110A0A02, 0x0040080250240100, 0x2440101206410025,
];

/// Magic entry for a single square
#[derive(Clone, Copy, Default)]
struct MagicEntry {
    mask: u64,     // Relevant occupancy mask (excludes edges)
    magic: u64,    // Magic number
    shift: u8,     // 64 - popcount(mask)
    offset: usize, // Offset into attack table
}

impl MagicEntry {
    #[inline]
    fn index(&self, occ: u64) -> usize {
        self.offset + ((occ & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Global magic tables
struct MagicTables {
    rook_entries: [MagicEntry; 64],
    bishop_entries: [MagicEntry; 64],
    rook_attacks: Vec<u64>,
    bishop_attacks: Vec<u64>,
}

static MAGIC_TABLES: OnceLock<MagicTables> = OnceLock::new();

// ============================================================================
// MASK GENERATION (relevant occupancy squares, excluding edges)
// ============================================================================

/// Rook relevance mask: rank and file rays without their final edge square.
fn rook_mask(sq: Square) -> u64 {
    let mut mask = 0u64;
    let rank = sq / 8;
    let file = sq % 8;

    for r in (rank + 1)..7 {
        mask |= 1u64 << (r * 8 + file);
    }
    for r in 1..rank {
        mask |= 1u64 << (r * 8 + file);
    }
    for f in (file + 1)..7 {
        mask |= 1u64 << (rank * 8 + f);
    }
    for f in 1..file {
        mask |= 1u64 << (rank * 8 + f);
    }

    mask
}

/// Bishop relevance mask: the four diagonals without their edge squares.
fn bishop_mask(sq: Square) -> u64 {
    let mut mask = 0u64;
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;

    for (dr, df) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        let (mut r, mut f) = (rank + dr, file + df);
        while (1..7).contains(&r) && (1..7).contains(&f) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }

    mask
}

// ============================================================================
// ATTACK GENERATION (ray casting, used to build tables)
// ============================================================================

/// Walk each direction from `sq`, including the first occupied square met.
fn ray_attacks(sq: Square, occ: u64, directions: &[(i32, i32); 4]) -> u64 {
    let mut attacks = 0u64;
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;

    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occ & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }

    attacks
}

pub(crate) fn rook_attacks_slow(sq: Square, occ: u64) -> u64 {
    ray_attacks(sq, occ, &[(1, 0), (-1, 0), (0, 1), (0, -1)])
}

pub(crate) fn bishop_attacks_slow(sq: Square, occ: u64) -> u64 {
    ray_attacks(sq, occ, &[(1, 1), (1, -1), (-1, 1), (-1, -1)])
}

// ============================================================================
// TABLE INITIALIZATION
// ============================================================================

/// Generate all blocker subsets for a given mask (carry-rippler).
fn enumerate_subsets(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

/// Fill one piece type's entries and attack table.
fn build_slider(
    masks: fn(Square) -> u64,
    magics: &[u64; 64],
    slow: fn(Square, u64) -> u64,
) -> ([MagicEntry; 64], Vec<u64>) {
    let mut entries = [MagicEntry::default(); 64];
    let mut attacks = Vec::new();

    for sq in 0..64 {
        let mask = masks(sq);
        let bits = mask.count_ones();
        let entry = MagicEntry {
            mask,
            magic: magics[sq],
            shift: (64 - bits) as u8,
            offset: attacks.len(),
        };
        attacks.resize(attacks.len() + (1usize << bits), 0);

        for occ in enumerate_subsets(mask) {
            attacks[entry.index(occ)] = slow(sq, occ);
        }
        entries[sq] = entry;
    }

    (entries, attacks)
}

fn init_magic_tables() -> MagicTables {
    let (rook_entries, rook_attacks) = build_slider(rook_mask, &ROOK_MAGICS, rook_attacks_slow);
    let (bishop_entries, bishop_attacks) =
        build_slider(bishop_mask, &BISHOP_MAGICS, bishop_attacks_slow);
    tracing::debug!(
        rook_entries = rook_attacks.len(),
        bishop_entries = bishop_attacks.len(),
        "magic tables built"
    );

    MagicTables {
        rook_entries,
        bishop_entries,
        rook_attacks,
        bishop_attacks,
    }
}

/// Initialize magic tables (thread-safe, built once)
#[inline(always)]
pub fn init() {
    tables();
}

#[inline]
fn tables() -> &'static MagicTables {
    MAGIC_TABLES.get_or_init(init_magic_tables)
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Rook attacks from `sq` given board occupancy
#[inline]
pub fn rook_attacks(sq: Square, occ: u64) -> u64 {
    let tables = tables();
    tables.rook_attacks[tables.rook_entries[sq].index(occ)]
}

/// Bishop attacks from `sq` given board occupancy
#[inline]
pub fn bishop_attacks(sq: Square, occ: u64) -> u64 {
    let tables = tables();
    tables.bishop_attacks[tables.bishop_entries[sq].index(occ)]
}

/// Queen attacks (bishop + rook)
#[inline]
pub fn queen_attacks(sq: Square, occ: u64) -> u64 {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}

// ============================================================================
// TESTS
// ============================================================================
