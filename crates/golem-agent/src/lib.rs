//! The Golem agent core: task board, build ledger, and the action
//! dispatcher that drives both against a world connection.
//!
//! The crate is organized as two small state machines plus the boundary
//! that feeds them:
//!
//! - [`TaskBoard`] -- the insertion-ordered goal queue with a
//!   single-active-task invariant.
//! - [`BuildLedger`] -- every build project ever created, at most one
//!   active, each carrying its full planned block sequence.
//! - [`Orchestrator`] -- parses `(actionName, argsRecord)` calls, executes
//!   them one at a time, and always answers with an [`ActionReport`].
//!
//! [`ActionReport`]: golem_types::ActionReport

pub mod build;
pub mod dispatch;
pub mod error;
pub mod tasks;

pub use build::{BuildLedger, complete_project};
pub use dispatch::{ActionParseError, Orchestrator, parse_action};
pub use error::TaskError;
pub use tasks::TaskBoard;
