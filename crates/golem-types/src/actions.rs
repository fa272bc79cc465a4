//! The action surface between the decision-maker and the dispatcher.
//!
//! The decision-maker supplies `(actionName, argsRecord)` pairs; those
//! deserialize into the [`Action`] tagged union, so argument validation
//! happens once at the dispatcher boundary instead of per-field inside each
//! handler. Every dispatch returns an [`ActionReport`]: a JSON-serializable
//! record with a `success` flag, a human-readable `message`, and (on
//! failure) a machine-readable [`RejectReason`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::RejectReason;
use crate::structs::StructureSize;

/// A validated action request, keyed by action name.
///
/// The wire form is internally tagged: `{"action": "move_to_position",
/// "x": 1, ...}` with camelCase argument fields, matching the tool-call
/// records emitted by the decision-maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "action", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Steer toward a world position until within tolerance or timed out.
    #[serde(rename_all = "camelCase")]
    MoveToPosition {
        /// Target x coordinate.
        x: f64,
        /// Target y coordinate.
        y: f64,
        /// Target z coordinate.
        z: f64,
        /// Arrival tolerance in blocks (clamped to a minimum of 0.5).
        #[serde(default)]
        tolerance: Option<f64>,
        /// Give-up timeout in milliseconds (clamped to a minimum of 1000).
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
    /// Place a single block of the given material at a voxel coordinate.
    #[serde(rename_all = "camelCase")]
    PlaceBlock {
        /// Material to place (matched case-insensitively against inventory).
        block_type: String,
        /// Target voxel x.
        x: i32,
        /// Target voxel y.
        y: i32,
        /// Target voxel z.
        z: i32,
    },
    /// Plan a structure and activate it as the current build project.
    #[serde(rename_all = "camelCase")]
    StartBuilding {
        /// Structure kind name (`floor`, `wall`, `tower`, `house_simple`).
        structure_type: String,
        /// Material for every block of the structure.
        material: String,
        /// Origin voxel x.
        start_x: i32,
        /// Origin voxel y.
        start_y: i32,
        /// Origin voxel z.
        start_z: i32,
        /// Requested dimensions; missing axes default to 3.
        #[serde(default)]
        size: StructureSize,
        /// Optional display name for the project.
        #[serde(default)]
        name: Option<String>,
    },
    /// Place the next batch of unplaced blocks of the active project.
    #[serde(rename_all = "camelCase")]
    ContinueBuilding {
        /// Batch size, clamped to `1..=50` (default 16).
        #[serde(default)]
        batch_size: Option<u32>,
    },
    /// Report progress of the active build project.
    CheckBuildProgress,
    /// Append a new pending task to the task board.
    AddTask {
        /// Short goal title.
        title: String,
        /// Optional longer description.
        #[serde(default)]
        description: Option<String>,
    },
    /// Promote the oldest pending task to active.
    StartNextTask,
    /// Complete the currently active task.
    CompleteActiveTask,
    /// Drop items matching a name from the inventory.
    #[serde(rename_all = "camelCase")]
    DropItem {
        /// Item name, matched case-insensitively as a substring.
        item_name: String,
        /// How many to drop; absent means every matching item.
        #[serde(default)]
        count: Option<u32>,
    },
    /// Report the agent's current (floored) position.
    CurrentPosition,
}

impl Action {
    /// Every action name the dispatcher understands, in wire form.
    pub const KNOWN_NAMES: [&'static str; 10] = [
        "move_to_position",
        "place_block",
        "start_building",
        "continue_building",
        "check_build_progress",
        "add_task",
        "start_next_task",
        "complete_active_task",
        "drop_item",
        "current_position",
    ];
}

/// The uniform result record returned by every dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionReport {
    /// Whether the action succeeded.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Machine-readable failure code, for programmatic consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    /// Action-specific payload (progress counts, positions, task echoes).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl ActionReport {
    /// A successful report with no extra payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            reason: None,
            details: serde_json::Value::Null,
        }
    }

    /// A successful report carrying a payload.
    pub fn ok_with(message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            reason: None,
            details,
        }
    }

    /// A failure report with no machine-readable reason.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            reason: None,
            details: serde_json::Value::Null,
        }
    }

    /// A failure report carrying a reason code.
    pub fn rejected(reason: RejectReason, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            reason: Some(reason),
            details: serde_json::Value::Null,
        }
    }

    /// A failure report carrying a reason code and a payload.
    pub fn rejected_with(
        reason: RejectReason,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            reason: Some(reason),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_deserializes_from_tagged_record() {
        let value = json!({
            "action": "move_to_position",
            "x": 1.0, "y": 64.0, "z": -3.0,
            "timeoutMs": 500
        });
        let action: Option<Action> = serde_json::from_value(value).ok();
        assert_eq!(
            action,
            Some(Action::MoveToPosition {
                x: 1.0,
                y: 64.0,
                z: -3.0,
                tolerance: None,
                timeout_ms: Some(500),
            })
        );
    }

    #[test]
    fn optional_args_default_when_absent() {
        let value = json!({
            "action": "start_building",
            "structureType": "wall",
            "material": "cobblestone",
            "startX": 0, "startY": 64, "startZ": 0
        });
        let action: Result<Action, _> = serde_json::from_value(value);
        assert!(matches!(
            action,
            Ok(Action::StartBuilding { size: StructureSize { width: None, .. }, name: None, .. })
        ));
    }

    #[test]
    fn unit_actions_need_no_args() {
        let value = json!({ "action": "check_build_progress" });
        let action: Result<Action, _> = serde_json::from_value(value);
        assert!(matches!(action, Ok(Action::CheckBuildProgress)));
    }

    #[test]
    fn report_serializes_reason_code() {
        let report = ActionReport::rejected(RejectReason::NoPending, "cannot start: no_pending");
        let value = serde_json::to_value(&report).unwrap_or_default();
        assert_eq!(value.get("reason"), Some(&json!("no_pending")));
        assert_eq!(value.get("success"), Some(&json!(false)));
        // Null details are omitted from the wire form.
        assert!(value.get("details").is_none());
    }
}
