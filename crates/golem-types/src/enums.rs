//! Enumeration types: lifecycle statuses, structure kinds, movement
//! controls, and the machine-readable failure taxonomy.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle status of a task on the task board.
///
/// Tasks are never deleted, only transitioned. At most one task is
/// `Active` at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TaskStatus {
    /// Queued, waiting to be started.
    Pending,
    /// The single task currently being worked on.
    Active,
    /// Finished successfully.
    Completed,
    /// Abandoned. Reachable from pending or active; no dispatcher action
    /// currently drives this transition.
    Cancelled,
}

/// Lifecycle status of a build project.
///
/// Mirrors [`TaskStatus`] but tracked independently -- the task queue and
/// the build queue are not coupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BuildStatus {
    /// Planned but not yet started.
    Pending,
    /// The single project currently under construction.
    Active,
    /// Every planned block has been placed.
    Completed,
    /// Abandoned. In the type but unused by current operations.
    Cancelled,
}

/// The structure kinds the planner knows how to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StructureKind {
    /// One flat `width x depth` layer.
    Floor,
    /// One vertical `width x height` sheet.
    Wall,
    /// A hollow rectangular prism: perimeter cells only, stacked `height` high.
    Tower,
    /// Floor, perimeter walls with a door gap, and a full roof layer.
    HouseSimple,
}

impl StructureKind {
    /// Parse a structure kind from its external name.
    ///
    /// Unknown names fall back to [`StructureKind::Floor`] rather than
    /// failing; the planner never rejects a request.
    pub fn from_name(name: &str) -> Self {
        match name {
            "wall" => Self::Wall,
            "tower" => Self::Tower,
            "house_simple" => Self::HouseSimple,
            _ => Self::Floor,
        }
    }
}

/// A movement-intent flag on the game client.
///
/// The mover asserts all three while steering and clears all three on
/// every exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Control {
    /// Walk forward.
    Forward,
    /// Sprint while walking.
    Sprint,
    /// Hop continuously (clears single-block steps).
    Jump,
}

/// Machine-readable reason attached to a failed [`ActionReport`].
///
/// Every failure in the core is a value carrying one of these codes; no
/// error escapes the dispatcher as a propagated exception.
///
/// [`ActionReport`]: crate::actions::ActionReport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectReason {
    /// No inventory item matched the requested material. Aborts a batch.
    NoMaterialInInventory,
    /// All six neighbors of the target voxel are air-like. Transient;
    /// skipped and retried on a later batch.
    NoSupportBlock,
    /// The underlying place call was refused by the client. Treated as
    /// transient, same as a missing support.
    PlaceFailed,
    /// A task is already active; `start_next_task` was rejected.
    AlreadyActive,
    /// No pending task exists to start.
    NoPending,
    /// No active task exists to complete.
    NoActive,
    /// A build project is already active; `start_building` was rejected.
    BuildAlreadyActive,
    /// No active build project for `continue_building`.
    NoActiveBuild,
    /// The dispatcher did not recognize the action name.
    UnknownAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_kind_falls_back_to_floor() {
        assert_eq!(StructureKind::from_name("wall"), StructureKind::Wall);
        assert_eq!(StructureKind::from_name("house_simple"), StructureKind::HouseSimple);
        assert_eq!(StructureKind::from_name("ziggurat"), StructureKind::Floor);
        assert_eq!(StructureKind::from_name(""), StructureKind::Floor);
    }

    #[test]
    fn reject_reason_serializes_snake_case() {
        let json = serde_json::to_string(&RejectReason::NoMaterialInInventory).ok();
        assert_eq!(json.as_deref(), Some("\"no_material_in_inventory\""));
    }
}
