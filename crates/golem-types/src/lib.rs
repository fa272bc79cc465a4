//! Shared type definitions for the Golem agent core.
//!
//! This crate is the single source of truth for the types used across the
//! Golem workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the observer dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for tasks and build projects
//! - [`geometry`] -- Voxel coordinates, continuous positions, face normals
//! - [`enums`] -- Statuses, structure kinds, controls, failure reasons
//! - [`structs`] -- Tasks, planned blocks, build projects, snapshots
//! - [`actions`] -- The action tagged union and the uniform result record

pub mod actions;
pub mod enums;
pub mod geometry;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionReport};
pub use enums::{BuildStatus, Control, RejectReason, StructureKind, TaskStatus};
pub use geometry::{BlockPos, Face, Position};
pub use ids::{ProjectId, TaskId};
pub use structs::{
    AgentSnapshot, BuildProject, BuildSnapshot, ItemStack, PlannedBlock, StructureSize, Task,
};
