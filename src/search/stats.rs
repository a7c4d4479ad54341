//! Search statistics: node counts, cutoffs and timing.

use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total negamax calls
    pub nodes: u64,

    /// Nodes answered by the static evaluation
    pub leaf_nodes: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Checkmates and stalemates met inside the tree
    pub terminal_nodes: u64,

    /// The node or time budget ran out before the search finished
    pub aborted: bool,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Milliseconds since `start_timing`
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map_or(0, |start| start.elapsed().as_millis() as u64)
    }

    /// Update elapsed time and NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    #[inline]
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    #[inline]
    pub fn inc_leaf(&mut self) {
        self.leaf_nodes += 1;
    }

    #[inline]
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    #[inline]
    pub fn inc_terminal(&mut self) {
        self.terminal_nodes += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Emit the summary as a debug event
    pub fn log_summary(&self) {
        tracing::debug!(
            nodes = self.nodes,
            leaves = self.leaf_nodes,
            cutoffs = self.cutoffs,
            terminal = self.terminal_nodes,
            aborted = self.aborted,
            ms = self.search_time.as_millis() as u64,
            nps = self.nps,
            "search statistics"
        );
    }
}
