// Analytics engine: lineup optimization, matchup outcome flags, power
// rankings, stat breakdown normalization, and positional aggregation.
//
// Every component here is a pure function over immutable snapshot data; the
// caller owns all state (season history included) and supplies it fresh on
// each invocation.

pub mod breakdown;
pub mod optimizer;
pub mod outcome;
pub mod positions;
pub mod power;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The lineup slot template cannot be satisfied by the given roster.
    /// Fatal for that team/week; the analysis never silently under-fills
    /// slots.
    #[error("slot template cannot be satisfied: {message}")]
    Configuration { message: String },

    /// Malformed input. The analysis is aborted rather than computed from
    /// suspect data; a silently wrong ranking or optimum costs more than a
    /// hard failure.
    #[error("invalid input for {context}: {message}")]
    Validation { context: String, message: String },
}

impl AnalysisError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        AnalysisError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn validation(context: &str, message: impl Into<String>) -> Self {
        AnalysisError::Validation {
            context: context.to_string(),
            message: message.into(),
        }
    }
}
