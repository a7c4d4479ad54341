//! Search engine: negamax with alpha-beta, move ordering and perft.

pub mod ordering;
pub mod params;
pub mod perft;
pub mod search;
pub mod stats;

pub use self::params::SearchParams;
pub use self::perft::{perft, perft_divide, print_perft};
pub use self::search::{best_move, Search, SearchResult, INFINITY, MATE};
pub use self::stats::SearchStats;
pub use crate::moves::Move;
