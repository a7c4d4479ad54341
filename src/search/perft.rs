//! Perft: exhaustive leaf counting for move generator validation.

use crate::board::Position;
use crate::moves::Move;
use std::io::{self, Write};

/// Number of leaf positions `depth` plies below `pos`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.with_move(mv), depth - 1))
        .sum()
}

/// Leaf count below each legal root move, in generation order.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    pos.generate_moves()
        .into_iter()
        .map(|mv| (mv, perft(&pos.with_move(mv), depth - 1)))
        .collect()
}

/// Write `<move>: <count>` per root move followed by the total, and return
/// the total.
pub fn print_perft<W: Write>(pos: &Position, depth: u8, out: &mut W) -> io::Result<u64> {
    let divide = perft_divide(pos, depth);
    let total: u64 = if depth == 0 {
        1
    } else {
        divide.iter().map(|(_, nodes)| nodes).sum()
    };
    for (mv, nodes) in &divide {
        writeln!(out, "{}: {}", mv, nodes)?;
    }
    writeln!(out)?;
    writeln!(out, "Nodes searched: {}", total)?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_start_counts() {
        let pos = Position::start();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(perft(&pos, 3), 8_902);
    }

    #[test]
    fn test_divide_sums_to_total() {
        let pos = Position::start();
        let divide = perft_divide(&pos, 3);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), perft(&pos, 3));
    }

    #[test]
    fn test_print_format() {
        let mut out = Vec::new();
        let total = print_perft(&Position::start(), 1, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(total, 20);
        assert!(text.contains("e2e4: 1\n"));
        assert!(text.ends_with("\nNodes searched: 20\n"));
        assert_eq!(text.lines().count(), 22);
    }
}
