use crate::types::Nucleotide;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PwmError {
    #[error("Invalid PWM structure: {0}")]
    Structure(String),

    #[error("Invalid PWM probabilities: pos. {position} prob sums to {sum}")]
    Probability { position: usize, sum: f64 },

    #[error("Invalid PWM probabilities: nt {nucleotide} at pos. {position} is {prob}")]
    ProbabilityRange {
        position: usize,
        nucleotide: Nucleotide,
        prob: f64,
    },

    #[error("Invalid sequence: position {position} (={character}) not a valid nt ('A'/'C'/'G'/'T')")]
    Alphabet { position: usize, character: char },

    #[error("Invalid pseudocount: {pseudo} is less than 0")]
    Domain { pseudo: f64 },

    #[error("PWM longer than sequence: {pwm_len} > {seq_len}")]
    Range { pwm_len: usize, seq_len: usize },

    #[error("Data error: {0}")]
    DataError(String),
}

/// Type alias for Result with PwmError
pub type Result<T> = std::result::Result<T, PwmError>;

impl PwmError {
    /// Create a new Structure error
    pub fn structure(message: impl Into<String>) -> Self {
        PwmError::Structure(message.into())
    }

    /// Create a new Alphabet error
    pub fn alphabet(position: usize, character: char) -> Self {
        PwmError::Alphabet {
            position,
            character,
        }
    }

    /// Create a new Range error
    pub fn range(pwm_len: usize, seq_len: usize) -> Self {
        PwmError::Range { pwm_len, seq_len }
    }

    /// Whether the caller can reasonably retry with different input.
    ///
    /// Only a window wider than the searched sequence is recoverable; every
    /// validation failure is fatal to the operation that hit it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PwmError::Range { .. })
    }
}

impl From<polars::prelude::PolarsError> for PwmError {
    fn from(e: polars::prelude::PolarsError) -> Self {
        PwmError::DataError(e.to_string())
    }
}
