//! Interpreter settings shared by the checker and the executor.

/// Call depth at which entering one more function fails.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of simultaneously active call frames.
    pub max_call_depth: usize,
}

impl Config {
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
