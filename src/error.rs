use thiserror::Error;

/// Failure of a single calculation. Nothing is partially returned when one of these is raised.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Malformed or missing input, detected before any computation.
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// Numerically degenerate input, detected at the stage that would divide by zero or leave the
    /// real numbers.
    #[error("degenerate data during {stage}: {message}")]
    Data {
        stage: &'static str,
        message: String,
    },

    /// Pairwise judgments failed the consistency check while strict consistency is enabled.
    #[error("inconsistent judgments for {subject}: CR = {ratio:.4} (threshold {threshold})")]
    Inconsistent {
        subject: String,
        ratio: f64,
        threshold: f64,
    },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn data(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Data {
            stage,
            message: message.into(),
        }
    }
}
