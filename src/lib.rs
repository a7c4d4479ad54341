pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod legal;
pub mod magic;
pub mod makemove;
pub mod movegen;
pub mod moves;
pub mod search;
pub mod uci;
pub mod utils;
pub mod zobrist;

pub use board::{Piece, PieceKind, Position, Side, Square, START_FEN};
pub use error::{FenError, MoveParseError};
pub use moves::Move;

/// Build every lookup table. Tables are also built lazily on first use;
/// calling this up front keeps the cost out of the first search.
pub fn init() {
    utils::init_attack_tables();
    magic::init();
    zobrist::init_zobrist();
    tracing::debug!("lookup tables initialized");
}
