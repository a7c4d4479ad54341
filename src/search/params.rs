//! Search parameters and configuration
//!
//! Depth is fixed per search; node and time limits only act as an abort
//! budget polled inside the recursion.

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search depth in plies
    pub max_depth: u8,

    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,

    /// Node limit (0 = unlimited)
    pub node_limit: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_limit_ms: 0,
            node_limit: 0,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set time limit in milliseconds
    pub fn time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Set node limit
    pub fn node_limit(mut self, limit: u64) -> Self {
        self.node_limit = limit;
        self
    }

    /// Whether any abort budget is set
    pub fn is_bounded(&self) -> bool {
        self.time_limit_ms > 0 || self.node_limit > 0
    }
}
