// FEN parsing/serialization and board printing for Position

use crate::board::*;
use crate::error::{FenError, FenResult};
use std::fmt;
use std::str::FromStr;

const CASTLE_LETTERS: [(u8, char); 4] = [
    (CASTLE_WHITE_KING, 'K'),
    (CASTLE_WHITE_QUEEN, 'Q'),
    (CASTLE_BLACK_KING, 'k'),
    (CASTLE_BLACK_QUEEN, 'q'),
];

impl Position {
    /// Parse a FEN string. The two move counters are optional and default
    /// to `0 1`.
    pub fn from_fen(fen: &str) -> FenResult<Position> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }

        let mut pos = Position::empty();

        // Ranks come from 8 down to 1, which is also ascending square order
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }
        for (row, rank_part) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for ch in rank_part.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                if file >= 8 {
                    return Err(FenError::RankLength { rank: 8 - row, files: file + 1 });
                }
                pos.put_piece(piece, row * 8 + file);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::RankLength { rank: 8 - row, files: file });
            }
        }

        pos.side = match parts[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        if parts[2] != "-" {
            for ch in parts[2].chars() {
                let bit = CASTLE_LETTERS
                    .iter()
                    .find(|(_, letter)| *letter == ch)
                    .map(|(bit, _)| *bit)
                    .ok_or(FenError::InvalidCastle(ch))?;
                pos.castle |= bit;
            }
        }

        pos.passant = match parts[3] {
            "-" => None,
            name => Some(
                square_from_name(name).ok_or_else(|| FenError::InvalidPassant(name.to_string()))?,
            ),
        };

        if let Some(clock) = parts.get(4) {
            pos.clock = clock
                .parse()
                .map_err(|_| FenError::InvalidCounter(clock.to_string()))?;
        }
        if let Some(turns) = parts.get(5) {
            pos.turns = turns
                .parse()
                .map_err(|_| FenError::InvalidCounter(turns.to_string()))?;
        }

        for side in [Side::White, Side::Black] {
            let count = pos.pieces_of(PieceKind::King, side).count_ones();
            if count != 1 {
                return Err(FenError::KingCount { side, count });
            }
        }

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for row in 0..8 {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_on(row * 8 + file) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side {
            Side::White => 'w',
            Side::Black => 'b',
        });

        fen.push(' ');
        if self.castle == 0 {
            fen.push('-');
        } else {
            for (bit, letter) in CASTLE_LETTERS {
                if self.castle & bit != 0 {
                    fen.push(letter);
                }
            }
        }

        fen.push(' ');
        fen.push_str(self.passant.map_or("-", |sq| SQUARE_NAMES[sq]));
        fen.push_str(&format!(" {} {}", self.clock, self.turns));
        fen
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{}  ", 8 - row)?;
            for file in 0..8 {
                match self.piece_on(row * 8 + file) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "\n   a b c d e f g h\n")?;
        let fen = self.to_fen();
        let fields: Vec<&str> = fen.split(' ').collect();
        writeln!(f, "Side:      {}", if self.side == Side::White { "white" } else { "black" })?;
        writeln!(f, "Castling:  {}", fields[2])?;
        writeln!(f, "Passant:   {}", fields[3])?;
        writeln!(f, "Clock:     {}", self.clock)?;
        writeln!(f, "Turns:     {}", self.turns)?;
        write!(f, "Fen:       {}", fen)
    }
}
