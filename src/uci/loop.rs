//! UCI event loop and engine state
//!
//! Commands are handled one at a time; `go` runs the whole search before
//! the next line is read.

use super::parser::{parse_uci_command, UciCommand};
use crate::board::Position;
use crate::error::{MoveParseError, PositionCommandError};
use crate::moves::Move;
use crate::search::{print_perft, Search, SearchParams};
use std::io::{self, BufRead, Write};

pub const DEFAULT_DEPTH: u8 = 6;

pub struct UciEngine {
    position: Position,
    running: bool,
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the position named by a `position` command.
pub fn position_from_command(
    fen: Option<&str>,
    moves: &[String],
) -> Result<Position, PositionCommandError> {
    let mut position = match fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::start(),
    };
    for text in moves {
        let mv = position.parse_move(text)?;
        if !position.is_legal(mv) {
            return Err(MoveParseError::Illegal(text.clone()).into());
        }
        position.make_move(mv);
    }
    Ok(position)
}

impl UciEngine {
    pub fn new() -> Self {
        Self {
            position: Position::start(),
            running: true,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_command(&mut self, cmd: UciCommand) -> Vec<String> {
        tracing::debug!(?cmd, "uci command");
        let mut res = Vec::new();
        match cmd {
            UciCommand::Uci => {
                res.push(format!("id name Magpie {}", env!("CARGO_PKG_VERSION")));
                res.push("id author the Magpie developers".to_string());
                res.push("uciok".to_string());
            }
            UciCommand::IsReady => {
                res.push("readyok".to_string());
            }
            UciCommand::UciNewGame => {
                self.position = Position::start();
            }
            UciCommand::Position { fen, moves } => {
                // Only commit when the FEN and every move are valid
                match position_from_command(fen.as_deref(), &moves) {
                    Ok(position) => self.position = position,
                    Err(e) => {
                        tracing::warn!(error = %e, "rejected position command");
                        res.push(format!("info string {}", e));
                    }
                }
            }
            UciCommand::Go {
                depth,
                nodes,
                movetime,
                searchmoves,
                perft,
            } => {
                if let Some(perft_depth) = perft {
                    self.run_perft(perft_depth, &mut res);
                } else {
                    let params = SearchParams::new()
                        .max_depth(depth.unwrap_or(DEFAULT_DEPTH).max(1))
                        .node_limit(nodes.unwrap_or(0))
                        .time_limit(movetime.unwrap_or(0));
                    self.run_search(params, &searchmoves, &mut res);
                }
            }
            UciCommand::Display => {
                res.extend(self.position.to_string().lines().map(str::to_string));
            }
            UciCommand::Stop => {
                // Searches finish before the next command is read
            }
            UciCommand::Quit => {
                self.running = false;
            }
            UciCommand::Unknown(s) => {
                if !s.is_empty() {
                    res.push(format!("info string unknown command: {}", s));
                }
            }
        }
        res
    }

    fn run_search(&self, params: SearchParams, searchmoves: &[String], res: &mut Vec<String>) {
        let mut restrict: Vec<Move> = Vec::with_capacity(searchmoves.len());
        for text in searchmoves {
            match self.position.parse_move(text) {
                Ok(mv) => restrict.push(mv),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring searchmoves entry");
                    res.push(format!("info string {}", e));
                }
            }
        }
        // Every entry was bad: search nothing rather than everything
        if !searchmoves.is_empty() && restrict.is_empty() {
            res.push("bestmove 0000".to_string());
            return;
        }

        let depth = params.max_depth;
        let mut search = Search::new(params);
        match search.search(&self.position, &restrict) {
            Some(result) => {
                let stats = search.stats();
                res.push(format!(
                    "info depth {} score cp {} nodes {} time {} nps {}",
                    depth,
                    result.score,
                    stats.nodes,
                    stats.search_time.as_millis(),
                    stats.nps
                ));
                res.push(format!("bestmove {}", result.best_move));
            }
            None if !restrict.is_empty() && !self.position.generate_moves().is_empty() => {
                res.push("info string no legal move among searchmoves".to_string());
                res.push("bestmove 0000".to_string());
            }
            None => {
                res.push("info string position is terminal (checkmate or stalemate)".to_string());
                res.push("bestmove 0000".to_string());
            }
        }
    }

    fn run_perft(&self, depth: u8, res: &mut Vec<String>) {
        let mut out = Vec::new();
        match print_perft(&self.position, depth, &mut out) {
            Ok(_) => res.extend(String::from_utf8_lossy(&out).lines().map(str::to_string)),
            Err(e) => res.push(format!("info string perft failed: {}", e)),
        }
    }
}

pub fn run_uci_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let mut engine = UciEngine::new();
    let mut buf = String::new();

    while engine.is_running() {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            // EOF reached
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }

        for r in process_uci_line(line, &mut engine) {
            writeln!(writer, "{}", r)?;
        }
        // GUIs wait on each reply
        writer.flush()?;
    }

    Ok(())
}

pub fn process_uci_line(line: &str, engine: &mut UciEngine) -> Vec<String> {
    let cmd = parse_uci_command(line);
    engine.handle_command(cmd)
}
