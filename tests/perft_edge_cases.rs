use magpie::board::Position;
use magpie::search::perft_divide;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};
use std::collections::BTreeMap;

fn shakmaty_perft(pos: &Chess, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += shakmaty_perft(&new_pos, depth - 1);
    }
    nodes
}

/// Compare per-root-move counts, so a mismatch names the culprit move.
fn run_perft_check(fen_str: &str, depth: u8, name: &str) {
    let pos = Position::from_fen(fen_str).expect("valid FEN");
    let ours: BTreeMap<String, u64> = perft_divide(&pos, depth)
        .into_iter()
        .map(|(mv, nodes)| (mv.to_string(), nodes))
        .collect();

    let fen: Fen = fen_str.parse().unwrap();
    let chess: Chess = fen
        .into_position(CastlingMode::Standard)
        .expect("shakmaty should accept FEN");
    let theirs: BTreeMap<String, u64> = chess
        .legal_moves()
        .iter()
        .map(|m| {
            let mut next = chess.clone();
            next.play_unchecked(m);
            (
                m.to_uci(CastlingMode::Standard).to_string(),
                shakmaty_perft(&next, depth - 1),
            )
        })
        .collect();

    assert_eq!(ours, theirs, "mismatch in {name} at depth {depth}");
}

#[test]
fn perft_en_passant_discovered_check() {
    magpie::init();
    run_perft_check("8/8/8/k1pP4/8/8/8/4K3 w - c6 0 1", 3, "en passant discovered check");
}

#[test]
fn perft_en_passant_horizontal_pin() {
    magpie::init();
    run_perft_check("8/8/8/KPp4r/8/8/8/7k w - c6 0 1", 3, "en passant horizontal pin");
}

#[test]
fn perft_promotions_both_sides() {
    magpie::init();
    run_perft_check("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", 3, "promotion storm");
}

#[test]
fn perft_castling_through_attacks() {
    magpie::init();
    run_perft_check("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 3, "bare castling");
    run_perft_check("r3k2r/8/8/8/8/8/6b1/R3K2R w KQkq - 0 1", 3, "castle transit attacked");
    run_perft_check("r3k2r/8/8/8/4r3/8/8/R3K2R w KQkq - 0 1", 2, "castle out of check");
}

#[test]
fn perft_rook_capture_removes_rights() {
    magpie::init();
    run_perft_check("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 4, "corner captures");
}

#[test]
fn perft_double_check_only_king_moves() {
    magpie::init();
    run_perft_check("4k3/8/8/8/1b6/8/8/r3K3 w - - 0 1", 3, "double check");
}
