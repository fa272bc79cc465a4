//! The action dispatcher: the single entry point the decision-maker calls.
//!
//! [`Orchestrator`] owns the task board and the build ledger and translates
//! validated [`Action`]s into state-machine transitions and world
//! primitives. Every dispatch returns an [`ActionReport`]; no collaborator
//! error propagates past this boundary, and an unrecognized action name is
//! itself just a failure report.
//!
//! The batch-continuation loop lives here: it walks the active project's
//! unplaced indices in strict ascending planner order, reconciles blocks
//! the world already has, aborts the batch on missing material, and skips
//! (to retry on a later batch) placements that fail on support or on the
//! place call itself.

use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, warn};

use golem_types::{
    Action, ActionReport, AgentSnapshot, BlockPos, BuildSnapshot, BuildStatus, Position,
    RejectReason, StructureSize, Task,
};
use golem_world::{
    MoveOptions, MovementConfig, PlaceError, PlaceOutcome, PlacementConfig, WorldClient,
    drop_items, is_air_like, move_to_position, place_block_at,
};

use crate::build::{BuildLedger, complete_project};
use crate::tasks::TaskBoard;

/// Default number of blocks attempted per `continue_building` call.
const DEFAULT_BATCH_SIZE: usize = 16;

/// Bounds on the caller-supplied batch size.
const BATCH_SIZE_RANGE: (usize, usize) = (1, 50);

/// Errors turning an `(actionName, argsRecord)` pair into an [`Action`].
#[derive(Debug, thiserror::Error)]
pub enum ActionParseError {
    /// The action name is not in the catalog.
    #[error("unknown action: {name}")]
    UnknownAction {
        /// The unrecognized name.
        name: String,
    },

    /// The name is known but the argument record did not validate.
    #[error("invalid arguments for {action}: {source}")]
    InvalidArgs {
        /// The action whose arguments failed validation.
        action: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The argument record was not a JSON object (or null).
    #[error("arguments for {action} must be a JSON object")]
    ArgsNotObject {
        /// The action whose arguments were malformed.
        action: String,
    },
}

/// Validate an `(actionName, argsRecord)` pair into an [`Action`].
///
/// Validation happens once, here, at the boundary: handlers receive typed
/// variants and never re-check individual fields.
pub fn parse_action(name: &str, args: Value) -> Result<Action, ActionParseError> {
    let mut record = match args {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        _ => {
            return Err(ActionParseError::ArgsNotObject {
                action: name.to_owned(),
            });
        }
    };
    record.insert(String::from("action"), Value::String(name.to_owned()));
    serde_json::from_value(Value::Object(record)).map_err(|source| {
        if Action::KNOWN_NAMES.contains(&name) {
            ActionParseError::InvalidArgs {
                action: name.to_owned(),
                source,
            }
        } else {
            ActionParseError::UnknownAction {
                name: name.to_owned(),
            }
        }
    })
}

/// The orchestration context: owns all mutable run state and dispatches
/// actions against a [`WorldClient`].
///
/// Single logical thread of control -- each `execute` call runs to
/// completion before the next is accepted, so the board and ledger need no
/// locking.
#[derive(Debug, Default)]
pub struct Orchestrator {
    tasks: TaskBoard,
    builds: BuildLedger,
    movement: MovementConfig,
    placement: PlacementConfig,
}

impl Orchestrator {
    /// Create an orchestrator with default tunables and empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an orchestrator with explicit tunables.
    pub const fn with_configs(movement: MovementConfig, placement: PlacementConfig) -> Self {
        Self {
            tasks: TaskBoard::new(),
            builds: BuildLedger::new(),
            movement,
            placement,
        }
    }

    /// Read-only access to the task board.
    pub const fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    /// Read-only access to the build ledger.
    pub const fn builds(&self) -> &BuildLedger {
        &self.builds
    }

    /// The active-build summary for observers, if a build is active.
    pub fn build_snapshot(&self) -> Option<BuildSnapshot> {
        self.builds.snapshot()
    }

    /// A combined value-clone of the observable run state.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            tasks: self.tasks.all().to_vec(),
            active_task: self.tasks.active().cloned(),
            active_build: self.builds.snapshot(),
        }
    }

    /// Parse and execute a raw `(actionName, argsRecord)` call.
    ///
    /// This is the decision-maker's entry point. Parse failures become
    /// failure reports; nothing is thrown.
    pub async fn execute_call<W: WorldClient>(
        &mut self,
        world: &mut W,
        name: &str,
        args: Value,
    ) -> ActionReport {
        match parse_action(name, args) {
            Ok(action) => self.execute(world, action).await,
            Err(err @ ActionParseError::UnknownAction { .. }) => {
                ActionReport::rejected(RejectReason::UnknownAction, err.to_string())
            }
            Err(err) => ActionReport::failed(err.to_string()),
        }
    }

    /// Execute one validated action to completion.
    pub async fn execute<W: WorldClient>(&mut self, world: &mut W, action: Action) -> ActionReport {
        match action {
            Action::MoveToPosition {
                x,
                y,
                z,
                tolerance,
                timeout_ms,
            } => {
                let target = Position::new(x, y, z);
                let opts = MoveOptions {
                    tolerance,
                    timeout_ms,
                };
                let outcome = move_to_position(world, target, opts, self.movement).await;
                if outcome.reached {
                    ActionReport::ok(format!("arrived at {x},{y},{z}"))
                } else {
                    ActionReport::failed(format!("move timed out or unreachable to {x},{y},{z}"))
                }
            }

            Action::PlaceBlock { block_type, x, y, z } => {
                self.place_block(world, &block_type, BlockPos::new(x, y, z))
                    .await
            }

            Action::StartBuilding {
                structure_type,
                material,
                start_x,
                start_y,
                start_z,
                size,
                name,
            } => self.start_building(
                &structure_type,
                &material,
                BlockPos::new(start_x, start_y, start_z),
                size,
                name,
            ),

            Action::ContinueBuilding { batch_size } => {
                self.continue_building(world, batch_size).await
            }

            Action::CheckBuildProgress => self.check_build_progress(),

            Action::AddTask { title, description } => {
                let task = self.tasks.add(title, description);
                ActionReport::ok_with(format!("task added: {}", task.title), task_echo(&task))
            }

            Action::StartNextTask => match self.tasks.start_next() {
                Ok(task) => {
                    let message = format!("started: {}", task.title);
                    let details = task_echo(task);
                    ActionReport::ok_with(message, details)
                }
                Err(err) => {
                    ActionReport::rejected(err.reason(), format!("cannot start: {err}"))
                }
            },

            Action::CompleteActiveTask => match self.tasks.complete_active() {
                Ok(task) => {
                    let message = format!("completed: {}", task.title);
                    let details = task_echo(task);
                    ActionReport::ok_with(message, details)
                }
                Err(err) => {
                    ActionReport::rejected(err.reason(), format!("cannot complete: {err}"))
                }
            },

            Action::DropItem { item_name, count } => {
                match drop_items(world, &item_name, count).await {
                    Ok(outcome) => ActionReport::ok_with(
                        format!("dropped {} of {item_name}", outcome.dropped),
                        json!({ "dropped": outcome.dropped }),
                    ),
                    Err(err) => ActionReport::failed(err.to_string()),
                }
            }

            Action::CurrentPosition => {
                let block = world.position().block();
                ActionReport::ok_with(
                    format!("at {block}"),
                    json!({ "position": { "x": block.x, "y": block.y, "z": block.z } }),
                )
            }
        }
    }

    /// Place one block and reconcile it against the active project.
    ///
    /// Placement outside any tracked project is legal and simply untracked.
    async fn place_block<W: WorldClient>(
        &mut self,
        world: &mut W,
        block_type: &str,
        pos: BlockPos,
    ) -> ActionReport {
        match place_block_at(world, block_type, pos, self.placement, self.movement).await {
            Err(err) => {
                warn!(%pos, %err, "placement failed");
                ActionReport::rejected(place_reason(&err), format!("failed to place: {err}"))
            }
            Ok(_) => {
                self.reconcile_placement(pos);
                ActionReport::ok(format!("placed {block_type} at {pos}"))
            }
        }
    }

    /// Mark any planned block of the active project at `pos` as placed,
    /// completing the project if that was the last one.
    fn reconcile_placement(&mut self, pos: BlockPos) {
        let Some(project) = self.builds.active_mut() else {
            return;
        };
        let matches: Vec<usize> = project
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.pos == pos)
            .map(|(i, _)| i)
            .collect();
        for index in matches {
            project.mark_placed(index);
        }
        if project.is_complete() {
            complete_project(project);
        }
    }

    /// Plan and activate a new build project, enforcing the single-active
    /// invariant first.
    fn start_building(
        &mut self,
        structure_type: &str,
        material: &str,
        origin: BlockPos,
        size: StructureSize,
        name: Option<String>,
    ) -> ActionReport {
        if self.builds.active().is_some() {
            return ActionReport::rejected(
                RejectReason::BuildAlreadyActive,
                "a build project is already active",
            );
        }
        let id = self.builds.create(structure_type, material, origin, size, name);
        let Some(project) = self.builds.get_mut(id) else {
            return ActionReport::failed("build project registration failed");
        };
        project.status = BuildStatus::Active;
        project.started_at = Some(Utc::now());
        let message = format!("build started: {}", project.name);
        let details = json!({
            "project": {
                "id": project.id,
                "name": project.name.clone(),
                "type": project.structure_type.clone(),
                "origin": project.origin,
                "material": project.material.clone(),
                "total": project.total(),
            }
        });
        ActionReport::ok_with(message, details)
    }

    /// Place the next batch of the active project, in ascending planner
    /// order.
    ///
    /// Blocks the world already has are reconciled without consuming
    /// material. A missing material aborts the remaining batch (it will be
    /// missing for every remaining block of the same project); support and
    /// place failures are skipped and come around again on a later batch.
    async fn continue_building<W: WorldClient>(
        &mut self,
        world: &mut W,
        batch_size: Option<u32>,
    ) -> ActionReport {
        let (min_batch, max_batch) = BATCH_SIZE_RANGE;
        let batch = batch_size
            .map_or(DEFAULT_BATCH_SIZE, |b| {
                usize::try_from(b).unwrap_or(DEFAULT_BATCH_SIZE)
            })
            .clamp(min_batch, max_batch);

        let movement = self.movement;
        let placement = self.placement;
        let Some(project) = self.builds.active_mut() else {
            return ActionReport::rejected(RejectReason::NoActiveBuild, "no active build project");
        };

        let mut placed: u32 = 0;
        for index in project.next_unplaced(batch) {
            let Some(planned) = project.blocks.get(index).cloned() else {
                continue;
            };
            // Reconcile blocks the world already has (external changes,
            // prior partial success) without spending material.
            if !is_air_like(world.block_name_at(planned.pos).as_deref()) {
                project.mark_placed(index);
                continue;
            }
            match place_block_at(world, &planned.material, planned.pos, placement, movement).await
            {
                Ok(PlaceOutcome::Placed) => {
                    project.mark_placed(index);
                    placed = placed.saturating_add(1);
                }
                Ok(PlaceOutcome::AlreadyPresent) => {
                    project.mark_placed(index);
                }
                Err(err @ PlaceError::NoMaterialInInventory { .. }) => {
                    // Hard stop: the same material is missing for every
                    // remaining block of this project.
                    warn!(%err, "aborting batch");
                    let need = project.material.clone();
                    return ActionReport::rejected_with(
                        RejectReason::NoMaterialInInventory,
                        format!("materials missing: need {need}"),
                        json!({ "placed": placed }),
                    );
                }
                Err(err) => {
                    debug!(index, %err, "skipping block this batch");
                }
            }
        }

        let done = project.done();
        let total = project.total();
        if project.is_complete() {
            complete_project(project);
        }
        ActionReport::ok_with(
            format!("placed {placed}, progress {done}/{total}"),
            json!({ "placed": placed, "done": done, "total": total }),
        )
    }

    /// Report the active project's progress. No active project is a
    /// successful (empty) report, not an error.
    fn check_build_progress(&self) -> ActionReport {
        let Some(project) = self.builds.active() else {
            return ActionReport::ok("no active build");
        };
        let total = project.total();
        let done = project.done();
        let pct = done
            .saturating_mul(100)
            .checked_div(total)
            .unwrap_or_default();
        ActionReport::ok_with(
            format!(
                "progress {done}/{total} ({pct}%) at {origin}",
                origin = project.origin
            ),
            json!({
                "project": {
                    "id": project.id,
                    "name": project.name.clone(),
                    "type": project.structure_type.clone(),
                    "origin": project.origin,
                    "material": project.material.clone(),
                    "total": total,
                    "done": done,
                    "pct": pct,
                }
            }),
        )
    }
}

/// The task echo payload attached to task-action reports.
fn task_echo(task: &Task) -> Value {
    json!({
        "task": {
            "id": task.id,
            "title": task.title.clone(),
            "status": task.status,
        }
    })
}

/// Map a placement error to its wire reason code.
const fn place_reason(err: &PlaceError) -> RejectReason {
    match err {
        PlaceError::NoMaterialInInventory { .. } => RejectReason::NoMaterialInInventory,
        PlaceError::NoSupportBlock { .. } => RejectReason::NoSupportBlock,
        PlaceError::PlaceFailed { .. } => RejectReason::PlaceFailed,
    }
}
