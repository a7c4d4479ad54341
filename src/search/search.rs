//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Every child is searched on its own copy of the position. Node and time
//! budgets are polled at each node; once exhausted the remaining nodes fall
//! back to the static evaluation and the root stops after the move in
//! progress.

use super::ordering::order_moves;
use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::Position;
use crate::eval::evaluate_relative;
use crate::moves::Move;

/// Window bound, larger than any reachable score
pub const INFINITY: i32 = 50_000;
/// Base checkmate score; the remaining depth is added on top
pub const MATE: i32 = 49_000;

// Time is polled once per this many nodes
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Outcome of a root search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score from the side to move's point of view
    pub score: i32,
}

/// Main search engine
pub struct Search {
    params: SearchParams,
    stats: SearchStats,
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::new(),
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search every legal root move (or the legal members of `restrict`,
    /// when it is not empty) to the configured depth. Returns `None` when
    /// there is nothing to play.
    pub fn search(&mut self, pos: &Position, restrict: &[Move]) -> Option<SearchResult> {
        self.stats.reset();
        self.stats.start_timing();

        let depth = self.params.max_depth.max(1) as i32;
        let mut moves: Vec<Move> = if restrict.is_empty() {
            pos.generate_moves()
        } else {
            restrict
                .iter()
                .copied()
                .filter(|&mv| pos.is_legal(mv))
                .collect()
        };
        if moves.is_empty() {
            tracing::debug!(fen = %pos.to_fen(), "no legal root move");
            return None;
        }
        order_moves(pos, &mut moves);

        let mut best: Option<SearchResult> = None;
        for mv in moves {
            let alpha = best.map_or(-INFINITY, |b| b.score);
            let child = pos.with_move(mv);
            let score = -self.negamax(&child, depth - 1, -INFINITY, -alpha);

            // A move cut short by the budget is not comparable
            if self.stats.aborted && best.is_some() {
                break;
            }
            if best.map_or(true, |b| score > b.score) {
                best = Some(SearchResult { best_move: mv, score });
            }
            if self.stats.aborted {
                break;
            }
        }

        self.stats.update_timing();
        if let Some(result) = best {
            tracing::debug!(
                depth,
                best = %result.best_move,
                score = result.score,
                nodes = self.stats.nodes,
                "search finished"
            );
        }
        self.stats.log_summary();
        best
    }

    /// Negamax score of `pos` searched `depth` plies deep, within
    /// `alpha..beta`, from the side to move's point of view.
    pub fn negamax(&mut self, pos: &Position, depth: i32, mut alpha: i32, beta: i32) -> i32 {
        self.stats.inc_node();

        // Leaves are polled too
        if self.out_of_budget() || depth <= 0 {
            self.stats.inc_leaf();
            return evaluate_relative(pos);
        }

        let mut moves = pos.generate_moves();
        if moves.is_empty() {
            self.stats.inc_terminal();
            // Deeper remaining depth means a faster mate
            return if pos.in_check() { -(MATE + depth) } else { 0 };
        }
        order_moves(pos, &mut moves);

        let mut best = -INFINITY;
        for mv in moves {
            let child = pos.with_move(mv);
            let score = -self.negamax(&child, depth - 1, -beta, -alpha);
            if self.stats.aborted {
                return best.max(score);
            }

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.stats.inc_cutoff();
                break;
            }
        }

        best
    }

    fn out_of_budget(&mut self) -> bool {
        if self.stats.aborted {
            return true;
        }
        if !self.params.is_bounded() {
            return false;
        }

        let nodes = self.stats.nodes;
        let node_limit = self.params.node_limit;
        let time_limit = self.params.time_limit_ms;

        if node_limit > 0 && nodes > node_limit {
            self.stats.aborted = true;
        } else if time_limit > 0
            && nodes % TIME_CHECK_INTERVAL == 0
            && self.stats.elapsed_ms() >= time_limit
        {
            self.stats.aborted = true;
        }

        if self.stats.aborted {
            tracing::debug!(nodes, node_limit, time_limit, "search budget exhausted");
        }
        self.stats.aborted
    }
}

/// Best move for `pos` searched `depth` plies deep. `node_limit` and
/// `time_limit_ms` of 0 mean unlimited; an empty `restrict_to_moves`
/// searches all legal moves.
pub fn best_move(
    pos: &Position,
    depth: u8,
    node_limit: u64,
    time_limit_ms: u64,
    restrict_to_moves: &[Move],
) -> Option<Move> {
    let params = SearchParams::new()
        .max_depth(depth)
        .node_limit(node_limit)
        .time_limit(time_limit_ms);
    Search::new(params)
        .search(pos, restrict_to_moves)
        .map(|result| result.best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::*;

    #[test]
    fn test_mate_in_one() {
        // Back-rank mate: Ra1-a8
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut search = Search::new(SearchParams::new().max_depth(2));
        let result = search.search(&pos, &[]).unwrap();
        assert_eq!(result.best_move.to_string(), "a1a8");
        assert!(result.score > MATE);
    }

    #[test]
    fn test_mated_and_stalemated_leaves() {
        let mut search = Search::new(SearchParams::default());
        let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(search.negamax(&mated, 3, -INFINITY, INFINITY), -(MATE + 3));
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(search.negamax(&stalemate, 3, -INFINITY, INFINITY), 0);
        assert_eq!(search.search(&stalemate, &[]), None);
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let pos = Position::start();
        let mut search = Search::new(SearchParams::default());
        assert_eq!(search.negamax(&pos, 0, -INFINITY, INFINITY), evaluate_relative(&pos));
        assert_eq!(search.stats().nodes, 1);
    }

    #[test]
    fn test_wins_hanging_queen() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        assert_eq!(
            best_move(&pos, 2, 0, 0, &[]).map(|m| m.to_string()),
            Some("d2d5".to_string())
        );
    }

    #[test]
    fn test_restricted_root_moves() {
        let pos = Position::start();
        let only = pos.parse_move("a2a3").unwrap();
        assert_eq!(best_move(&pos, 3, 0, 0, &[only]), Some(only));

        // Illegal members are dropped; nothing left means no move
        let illegal = Move::quiet(E2, E5, Piece::WhitePawn);
        assert_eq!(best_move(&pos, 3, 0, 0, &[illegal]), None);
    }

    #[test]
    fn test_node_budget_aborts() {
        let pos = Position::start();
        let mut search = Search::new(SearchParams::new().max_depth(8).node_limit(2_000));
        let result = search.search(&pos, &[]);
        assert!(result.is_some());
        assert!(search.stats().aborted);
        assert!(search.stats().nodes < 2_100);
    }

    #[test]
    fn test_budget_counts_leaf_nodes() {
        // Depth 1: every child is a leaf, so only leaf polling can stop it
        let pos = Position::start();
        let mut search = Search::new(SearchParams::new().max_depth(1).node_limit(5));
        assert!(search.search(&pos, &[]).is_some());
        assert!(search.stats().aborted);
        assert_eq!(search.stats().nodes, 6);
    }
}
