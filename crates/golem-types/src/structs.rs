//! Core entity structs: tasks, planned blocks, build projects, inventory
//! stacks, and the read-only observation snapshots.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildStatus, TaskStatus};
use crate::geometry::BlockPos;
use crate::ids::{ProjectId, TaskId};

/// A named stack of identical items in the agent's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// The item's registry name (e.g. `cobblestone`).
    pub name: String,
    /// How many items are in the stack.
    pub count: u32,
}

/// A goal declared by the decision-maker, tracked on the task board.
///
/// Tasks are created on demand, mutated only by the task board, and never
/// deleted -- the list grows for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Task {
    /// Stable identifier.
    pub id: TaskId,
    /// Short human-readable goal.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// When the task was added.
    pub created_at: DateTime<Utc>,
    /// When the task was promoted to active, if it has been.
    pub started_at: Option<DateTime<Utc>>,
    /// When the task was completed, if it has been.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a fresh pending task.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }
}

/// One block of a planned structure: an absolute coordinate and the
/// material to place there.
///
/// Produced once by the planner at project creation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlannedBlock {
    /// Absolute world coordinate of the block.
    pub pos: BlockPos,
    /// Material (block registry name) to place.
    pub material: String,
}

/// Requested dimensions for a planned structure.
///
/// All dimensions are optional; the planner floors each one and clamps it
/// to a minimum of 1, defaulting to 3 when absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StructureSize {
    /// Extent along x.
    pub width: Option<f64>,
    /// Extent along z.
    pub depth: Option<f64>,
    /// Extent along y.
    pub height: Option<f64>,
}

/// One structure under construction: the full planned block list plus the
/// set of indices already placed.
///
/// `blocks` is fixed at creation and owned exclusively by the project.
/// `placed` grows monotonically -- entries are never removed -- and is
/// always a subset of `0..blocks.len()`. The project is completed exactly
/// when every index is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildProject {
    /// Stable identifier.
    pub id: ProjectId,
    /// Display name (defaults to the structure kind).
    pub name: String,
    /// The structure kind as requested by the decision-maker.
    pub structure_type: String,
    /// Anchor corner of the structure.
    pub origin: BlockPos,
    /// Material every planned block uses.
    pub material: String,
    /// The planned blocks in planner order. Fixed at creation.
    pub blocks: Vec<PlannedBlock>,
    /// Indices into `blocks` that have been placed (or reconciled as
    /// already present in the world).
    pub placed: BTreeSet<usize>,
    /// Current lifecycle status.
    pub status: BuildStatus,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When construction started, if it has.
    pub started_at: Option<DateTime<Utc>>,
    /// When the last block was placed, if construction finished.
    pub completed_at: Option<DateTime<Utc>>,
}

impl BuildProject {
    /// Create a fresh pending project around an already-planned block list.
    pub fn new(
        name: impl Into<String>,
        structure_type: impl Into<String>,
        origin: BlockPos,
        material: impl Into<String>,
        blocks: Vec<PlannedBlock>,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            structure_type: structure_type.into(),
            origin,
            material: material.into(),
            blocks,
            placed: BTreeSet::new(),
            status: BuildStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Number of planned blocks.
    pub fn total(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks placed so far.
    pub fn done(&self) -> usize {
        self.placed.len()
    }

    /// Whether every planned block has been placed.
    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.blocks.len()
    }

    /// Record index `index` as placed.
    ///
    /// Out-of-range indices are ignored; the placed set stays a subset of
    /// the block list. Returns whether the index was accepted.
    pub fn mark_placed(&mut self, index: usize) -> bool {
        if index < self.blocks.len() {
            self.placed.insert(index);
            true
        } else {
            false
        }
    }

    /// The next up-to-`limit` unplaced indices, in ascending planner order.
    ///
    /// This defines the batch-processing order for incremental construction:
    /// always lowest-index-first, never reordered by proximity.
    pub fn next_unplaced(&self, limit: usize) -> Vec<usize> {
        (0..self.blocks.len())
            .filter(|i| !self.placed.contains(i))
            .take(limit)
            .collect()
    }
}

/// Read-only summary of the active build project for observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildSnapshot {
    /// Project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// The structure kind as requested.
    pub structure_type: String,
    /// Anchor corner.
    pub origin: BlockPos,
    /// Construction material.
    pub material: String,
    /// Total planned blocks.
    pub total: usize,
    /// Blocks placed so far.
    pub done: usize,
}

/// Combined read-only view of the orchestrator's state.
///
/// This is what the dashboard serializes; it is a value clone and carries
/// no way to mutate the underlying state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentSnapshot {
    /// Every task ever added, in insertion order.
    pub tasks: Vec<Task>,
    /// The single active task, if any.
    pub active_task: Option<Task>,
    /// Summary of the active build project, if any.
    pub active_build: Option<BuildSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_blocks(n: usize) -> BuildProject {
        let blocks = (0..n)
            .map(|i| PlannedBlock {
                pos: BlockPos::new(i32::try_from(i).unwrap_or(0), 64, 0),
                material: String::from("stone"),
            })
            .collect();
        BuildProject::new("test", "wall", BlockPos::new(0, 64, 0), "stone", blocks)
    }

    #[test]
    fn next_unplaced_skips_placed_indices() {
        let mut proj = project_with_blocks(5);
        proj.mark_placed(0);
        proj.mark_placed(2);
        assert_eq!(proj.next_unplaced(10), vec![1, 3, 4]);
        assert_eq!(proj.next_unplaced(2), vec![1, 3]);
    }

    #[test]
    fn next_unplaced_never_returns_placed() {
        let mut proj = project_with_blocks(4);
        for i in 0..4 {
            proj.mark_placed(i);
        }
        assert!(proj.next_unplaced(16).is_empty());
    }

    #[test]
    fn mark_placed_rejects_out_of_range() {
        let mut proj = project_with_blocks(3);
        assert!(!proj.mark_placed(3));
        assert!(proj.placed.is_empty());
    }

    #[test]
    fn complete_exactly_when_all_placed() {
        let mut proj = project_with_blocks(3);
        proj.mark_placed(0);
        proj.mark_placed(1);
        assert!(!proj.is_complete());
        proj.mark_placed(2);
        assert!(proj.is_complete());
    }

    #[test]
    fn placed_set_is_monotone_under_repeats() {
        let mut proj = project_with_blocks(2);
        proj.mark_placed(1);
        proj.mark_placed(1);
        assert_eq!(proj.done(), 1);
    }
}
