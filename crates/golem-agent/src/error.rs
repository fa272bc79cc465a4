//! Error types for the `golem-agent` crate.
//!
//! Task-board operations return these through the standard [`Result`] type;
//! the dispatcher converts them into failure reports rather than letting
//! them cross the action boundary.

use golem_types::RejectReason;

/// Errors from task-board state transitions.
///
/// These are caller logic errors against current state -- always recoverable
/// by choosing a different action, never fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// `start_next` was called while a task is already active.
    #[error("a task is already active")]
    AlreadyActive,

    /// `start_next` was called with an empty pending queue.
    #[error("no pending task to start")]
    NoPending,

    /// `complete_active` was called with no active task.
    #[error("no active task to complete")]
    NoActive,
}

impl TaskError {
    /// The machine-readable reason code for this error.
    pub const fn reason(&self) -> RejectReason {
        match self {
            Self::AlreadyActive => RejectReason::AlreadyActive,
            Self::NoPending => RejectReason::NoPending,
            Self::NoActive => RejectReason::NoActive,
        }
    }
}
