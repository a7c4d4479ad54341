pub mod parser;
pub mod r#loop;

pub use parser::{parse_uci_command, UciCommand};
pub use r#loop::{position_from_command, process_uci_line, run_uci_loop, UciEngine, DEFAULT_DEPTH};
