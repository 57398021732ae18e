//! Engine Configuration

/// Tuning knobs for one engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How many recent turns are sent verbatim; older turns are replaced
    /// by the conversation summary
    pub history_window: usize,
    /// Tool-loop iteration cap; the model is called at most this many
    /// times plus one
    pub max_iterations: usize,
    /// Retries for transient provider failures per model call
    pub max_retries: u32,
    /// Cap on the exponential backoff delay, in seconds
    pub max_retry_delay_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_window: 50,
            max_iterations: 5,
            max_retries: 2,
            max_retry_delay_secs: 30,
        }
    }
}

impl EngineConfig {
    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}
