//! UCI command parser
//!
//! Small tokenizer covering the commands the engine answers. Move and FEN
//! text stays as strings here; the engine decodes it against a position.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go {
        depth: Option<u8>,
        nodes: Option<u64>,
        movetime: Option<u64>,
        searchmoves: Vec<String>,
        perft: Option<u8>,
    },
    /// `d`: print the current board
    Display,
    Stop,
    Quit,
    Unknown(String),
}

// Go keywords taking one value that this engine does not act on
const IGNORED_GO_VALUES: [&str; 6] = ["wtime", "btime", "winc", "binc", "movestogo", "mate"];
const GO_KEYWORDS: [&str; 13] = [
    "depth",
    "nodes",
    "movetime",
    "searchmoves",
    "perft",
    "wtime",
    "btime",
    "winc",
    "binc",
    "movestogo",
    "mate",
    "infinite",
    "ponder",
];

fn parse_value<T: std::str::FromStr>(parts: &[&str], i: usize) -> Option<T> {
    parts.get(i + 1).and_then(|v| v.parse::<T>().ok())
}

/// Parse a UCI command from a line of input
pub fn parse_uci_command(line: &str) -> UciCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return UciCommand::Unknown(String::new());
    };

    match head {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "d" => UciCommand::Display,
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        "position" => {
            // position [fen <fenstring> | startpos] [moves <move1> ...]
            let moves_at = parts.iter().position(|&s| s == "moves");
            let moves = moves_at
                .map(|i| parts[i + 1..].iter().map(|m| m.to_string()).collect())
                .unwrap_or_default();
            let fen = match parts.get(1) {
                Some(&"fen") => {
                    let end = moves_at.unwrap_or(parts.len());
                    Some(parts[2..end.max(2)].join(" "))
                }
                _ => None,
            };
            UciCommand::Position { fen, moves }
        }
        "go" => {
            let mut depth = None;
            let mut nodes = None;
            let mut movetime = None;
            let mut searchmoves = Vec::new();
            let mut perft = None;

            let mut i = 1usize;
            while i < parts.len() {
                match parts[i] {
                    "depth" => {
                        depth = parse_value(&parts, i);
                        i += 2;
                    }
                    "nodes" => {
                        nodes = parse_value(&parts, i);
                        i += 2;
                    }
                    "movetime" => {
                        movetime = parse_value(&parts, i);
                        i += 2;
                    }
                    "perft" => {
                        perft = parse_value(&parts, i);
                        i += 2;
                    }
                    "searchmoves" => {
                        i += 1;
                        while i < parts.len() && !GO_KEYWORDS.contains(&parts[i]) {
                            searchmoves.push(parts[i].to_string());
                            i += 1;
                        }
                    }
                    key if IGNORED_GO_VALUES.contains(&key) => i += 2,
                    _ => i += 1,
                }
            }

            UciCommand::Go {
                depth,
                nodes,
                movetime,
                searchmoves,
                perft,
            }
        }
        other => UciCommand::Unknown(other.to_string()),
    }
}
