use clap::Parser;
use magpie::board::{Position, START_FEN};
use magpie::search::{perft, print_perft};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Count leaf positions to validate move generation",
    long_about = None
)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the count below every root move
    #[arg(long)]
    divide: bool,

    /// Compare against shakmaty's move generator
    #[arg(long)]
    verify: bool,
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();
    magpie::init();

    let pos = match Position::from_fen(&args.fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("invalid FEN '{}': {}", args.fen, e);
            std::process::exit(2);
        }
    };

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let start = Instant::now();
    let nodes = if args.divide {
        let stdout = std::io::stdout();
        match print_perft(&pos, args.depth, &mut stdout.lock()) {
            Ok(nodes) => nodes,
            Err(e) => {
                eprintln!("failed to write perft output: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        perft(&pos, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );

    if args.verify {
        let fen: Fen = match args.fen.parse() {
            Ok(fen) => fen,
            Err(e) => {
                eprintln!("shakmaty rejected FEN: {}", e);
                std::process::exit(2);
            }
        };
        let chess: Chess = match fen.into_position(CastlingMode::Standard) {
            Ok(chess) => chess,
            Err(e) => {
                eprintln!("shakmaty rejected position: {}", e);
                std::process::exit(2);
            }
        };
        let expected = perft_shakmaty(&chess, args.depth);
        if expected == nodes {
            println!("shakmaty agrees: {}", expected);
        } else {
            println!("MISMATCH: shakmaty counts {}, magpie counts {}", expected, nodes);
            std::process::exit(1);
        }
    }
}

fn perft_shakmaty(pos: &Chess, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
