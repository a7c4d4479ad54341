use magpie::board::Position;
use magpie::search::{best_move, Search, SearchParams, MATE};
use std::time::{Duration, Instant};

fn search(fen: &str, depth: u8) -> (String, i32) {
    let pos = Position::from_fen(fen).expect("valid FEN");
    let mut search = Search::new(SearchParams::new().max_depth(depth));
    let result = search.search(&pos, &[]).expect("a legal move exists");
    (result.best_move.to_string(), result.score)
}

#[test]
fn finds_back_rank_mate() {
    magpie::init();
    let (mv, score) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2);
    assert_eq!(mv, "a1a8");
    assert!(score >= MATE, "score {score} should be a mate score");
}

#[test]
fn finds_scholars_mate() {
    magpie::init();
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    let (mv, score) = search(fen, 3);
    assert_eq!(mv, "h5f7");
    assert!(score >= MATE);
}

#[test]
fn mate_score_counts_remaining_depth() {
    magpie::init();
    // Mated at the first reply with three plies of depth left
    let (mv, score) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 4);
    assert_eq!(mv, "a1a8");
    assert_eq!(score, MATE + 3);
}

#[test]
fn wins_hanging_queen() {
    magpie::init();
    let (mv, score) = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 2);
    assert_eq!(mv, "d1d5");
    assert!(score > 0);
}

#[test]
fn black_side_scores_from_its_own_view() {
    magpie::init();
    let (mv, score) = search("3rk3/8/8/3Q4/8/8/8/4K3 b - - 0 1", 2);
    assert_eq!(mv, "d8d5");
    assert!(score > 0);
}

#[test]
fn terminal_roots_have_no_move() {
    magpie::init();
    let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stalemate.generate_moves().is_empty());
    assert!(!stalemate.in_check());
    assert_eq!(best_move(&stalemate, 3, 0, 0, &[]), None);

    let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(mated.in_check());
    assert_eq!(best_move(&mated, 3, 0, 0, &[]), None);
}

#[test]
fn restricted_root_moves() {
    magpie::init();
    let pos = Position::start();
    let a3 = pos.parse_move("a2a3").unwrap();
    let h3 = pos.parse_move("h2h3").unwrap();
    assert_eq!(best_move(&pos, 2, 0, 0, &[a3]), Some(a3));

    let chosen = best_move(&pos, 2, 0, 0, &[a3, h3]).unwrap();
    assert!(chosen == a3 || chosen == h3);

    // Only illegal candidates: nothing to play
    let illegal = pos.parse_move("e2e5").unwrap();
    assert_eq!(best_move(&pos, 2, 0, 0, &[illegal]), None);
}

#[test]
fn equal_root_scores_keep_first_move() {
    magpie::init();
    // Mirrored rook steps on an otherwise quiet board score identically
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    let left = pos.parse_move("a1b1").unwrap();
    let right = pos.parse_move("h1g1").unwrap();

    let mut search = Search::new(SearchParams::new().max_depth(2));
    let first = search.search(&pos, &[left, right]).unwrap();
    let second = search.search(&pos, &[right, left]).unwrap();
    assert_eq!(first.score, second.score);
    assert_eq!(first.best_move, left);
    assert_eq!(second.best_move, right);
}

#[test]
fn node_budget_stops_search() {
    magpie::init();
    let pos = Position::start();
    let mut search = Search::new(SearchParams::new().max_depth(12).node_limit(5_000));
    let result = search.search(&pos, &[]);
    assert!(result.is_some());
    assert!(search.stats().aborted);
    assert!(search.stats().nodes <= 5_000 + 64, "nodes {}", search.stats().nodes);
}

#[test]
fn time_budget_stops_search() {
    magpie::init();
    let pos = Position::start();
    let start = Instant::now();
    let mv = best_move(&pos, 30, 0, 50, &[]);
    assert!(mv.is_some());
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn search_is_deterministic() {
    magpie::init();
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let first = search(fen, 3);
    let second = search(fen, 3);
    assert_eq!(first, second);
}
