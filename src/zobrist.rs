// Zobrist hashing with precomputed keys.
// The hash is computed on demand; search does not consult it yet.

use crate::board::{Piece, Position, Side};
use crate::utils::iter_bits;
use std::sync::OnceLock;

struct ZobristKeys {
    pieces: [[u64; 64]; 12],
    passant: [u64; 64],
    // one key per full castle-rights state
    castle: [u64; 16],
    black_to_move: u64,
}

static ZOBRIST: OnceLock<ZobristKeys> = OnceLock::new();

fn split_mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn init_keys() -> ZobristKeys {
    let mut state = 0x5eed_cafe_f00d_d00du64;
    let mut next = || {
        state = split_mix64(state);
        state
    };

    let mut keys = ZobristKeys {
        pieces: [[0; 64]; 12],
        passant: [0; 64],
        castle: [0; 16],
        black_to_move: 0,
    };
    for board in keys.pieces.iter_mut() {
        for key in board.iter_mut() {
            *key = next();
        }
    }
    for key in keys.passant.iter_mut() {
        *key = next();
    }
    for key in keys.castle.iter_mut() {
        *key = next();
    }
    keys.black_to_move = next();
    keys
}

pub fn init_zobrist() {
    ZOBRIST.get_or_init(init_keys);
}

impl Position {
    /// Full Zobrist key of the position. Move counters are not hashed.
    pub fn hash(&self) -> u64 {
        let keys = ZOBRIST.get_or_init(init_keys);
        let mut h = 0u64;
        for (index, board) in keys.pieces.iter().enumerate() {
            let bb = self.pieces(Piece::ALL[index]);
            for sq in iter_bits(bb) {
                h ^= board[sq];
            }
        }
        if let Some(sq) = self.passant {
            h ^= keys.passant[sq];
        }
        h ^= keys.castle[(self.castle & 0xF) as usize];
        if self.side == Side::Black {
            h ^= keys.black_to_move;
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Position, Side, E3};

    fn play(pos: &mut Position, moves: &[&str]) {
        for text in moves {
            let mv = pos.parse_move(text).unwrap();
            pos.make_move(mv);
        }
    }

    #[test]
    fn test_transposition_same_hash() {
        let mut a = Position::start();
        let mut b = Position::start();
        play(&mut a, &["g1f3", "g8f6", "b1c3"]);
        play(&mut b, &["b1c3", "g8f6", "g1f3"]);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_sees_side_castle_and_passant() {
        let start = Position::start();
        let mut knights_back = Position::start();
        play(&mut knights_back, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(start.hash(), knights_back.hash());

        let mut black = start;
        black.side = Side::Black;
        assert_ne!(start.hash(), black.hash());

        let mut no_rights = start;
        no_rights.castle = 0;
        assert_ne!(start.hash(), no_rights.hash());

        let mut passant = start;
        passant.passant = Some(E3);
        assert_ne!(start.hash(), passant.hash());
    }
}
