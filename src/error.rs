//! Error types for the countdown core.

use crate::machine::Phase;
use std::fmt;

/// An operation the timer state machine can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Begin counting down.
    Start,
    /// Advance the countdown by one tick.
    Tick,
    /// Stop counting down, keeping the remaining time.
    Pause,
    /// Clear the remaining time.
    Reset,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Start => "start",
            Operation::Tick => "tick",
            Operation::Pause => "pause",
            Operation::Reset => "reset",
        })
    }
}

/// Errors reported by the countdown core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The operation is not legal from the current state.
    #[error("cannot {operation} timer in state {state}")]
    IllegalTransition {
        /// The rejected operation.
        operation: Operation,
        /// The state the machine was in.
        state: Phase,
    },

    /// A digit field was given a value outside 0-9.
    #[error("invalid digit value: {0}")]
    InvalidDigit(u32),

    /// A field id did not name one of the nine digit fields.
    #[error("unknown digit field: {0}")]
    UnknownField(String),
}
