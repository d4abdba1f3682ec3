use thiserror::Error;

/// Errors raised by the agent core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("wall sensor probe {index} out of range (sensor has {count} probes)")]
    ProbeIndexOutOfRange { index: usize, count: usize },

    /// Elapsed time must be finite and >= 0. The frame is rejected untouched,
    /// so a pending collision notification is kept rather than cleared.
    #[error("invalid elapsed time {0}s")]
    InvalidElapsed(f32),

    #[error("invalid agent config: {0}")]
    Config(String),

    #[error("invalid arena: {0}")]
    Arena(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
