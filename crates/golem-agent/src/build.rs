//! The build ledger: every build project ever created, with at most one
//! active at a time.
//!
//! The ledger owns the project list outright. Creation plans the full block
//! sequence up front and registers the project as pending; activating it is
//! the dispatcher's move, made only after it has verified the single-active
//! invariant. Projects are never deleted, only transitioned.

use chrono::Utc;
use tracing::info;

use golem_types::{
    BlockPos, BuildProject, BuildSnapshot, BuildStatus, ProjectId, StructureKind, StructureSize,
};
use golem_world::plan_structure;

/// The ordered collection of build projects, owned by the orchestrator.
#[derive(Debug, Default)]
pub struct BuildLedger {
    projects: Vec<BuildProject>,
}

impl BuildLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            projects: Vec::new(),
        }
    }

    /// Every project ever created, in creation order.
    pub fn all(&self) -> &[BuildProject] {
        &self.projects
    }

    /// The single active project, if any.
    pub fn active(&self) -> Option<&BuildProject> {
        self.projects
            .iter()
            .find(|p| p.status == BuildStatus::Active)
    }

    /// Mutable access to the single active project, if any.
    pub fn active_mut(&mut self) -> Option<&mut BuildProject> {
        self.projects
            .iter_mut()
            .find(|p| p.status == BuildStatus::Active)
    }

    /// Mutable access to a project by id.
    pub fn get_mut(&mut self, id: ProjectId) -> Option<&mut BuildProject> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Plan a structure and register it as a fresh pending project,
    /// returning its id. Look it up with [`Self::get_mut`] to activate it.
    ///
    /// Does not check for an existing active project -- that invariant is
    /// the caller's to enforce before creation.
    pub fn create(
        &mut self,
        structure_type: &str,
        material: &str,
        origin: BlockPos,
        size: StructureSize,
        name: Option<String>,
    ) -> ProjectId {
        let kind = StructureKind::from_name(structure_type);
        let blocks = plan_structure(kind, material, origin, size);
        let name = name.unwrap_or_else(|| structure_type.to_owned());
        let project = BuildProject::new(name, structure_type, origin, material, blocks);
        info!(
            project = %project.id,
            name = %project.name,
            structure_type,
            total = project.total(),
            "build project planned"
        );
        let id = project.id;
        self.projects.push(project);
        id
    }

    /// Read-only summary of the active project for observers.
    pub fn snapshot(&self) -> Option<BuildSnapshot> {
        self.active().map(|p| BuildSnapshot {
            id: p.id,
            name: p.name.clone(),
            structure_type: p.structure_type.clone(),
            origin: p.origin,
            material: p.material.clone(),
            total: p.total(),
            done: p.done(),
        })
    }
}

/// Transition a project to completed and stamp the completion time.
///
/// Invoked automatically once every planned index is placed, from both the
/// single-place and batch-continuation paths.
pub fn complete_project(project: &mut BuildProject) {
    project.status = BuildStatus::Completed;
    project.completed_at = Some(Utc::now());
    info!(
        project = %project.id,
        name = %project.name,
        total = project.total(),
        "build project completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: BlockPos = BlockPos::new(0, 64, 0);

    fn wall_size() -> StructureSize {
        StructureSize {
            width: Some(3.0),
            depth: None,
            height: Some(2.0),
        }
    }

    #[test]
    fn create_registers_pending_project_with_planned_blocks() {
        let mut ledger = BuildLedger::new();
        let id = ledger.create("wall", "cobblestone", ORIGIN, wall_size(), None);
        let project = ledger.get_mut(id);
        assert!(project.is_some_and(|p| {
            p.status == BuildStatus::Pending
                && p.total() == 6
                && p.name == "wall"
                && p.placed.is_empty()
        }));
    }

    #[test]
    fn explicit_name_overrides_kind_default() {
        let mut ledger = BuildLedger::new();
        let id = ledger.create(
            "tower",
            "stone",
            ORIGIN,
            StructureSize::default(),
            Some(String::from("watchtower")),
        );
        let project = ledger.get_mut(id);
        assert!(project.is_some_and(|p| p.name == "watchtower" && p.structure_type == "tower"));
    }

    #[test]
    fn pending_projects_are_not_active() {
        let mut ledger = BuildLedger::new();
        let _ = ledger.create("wall", "stone", ORIGIN, wall_size(), None);
        assert!(ledger.active().is_none());
        assert!(ledger.snapshot().is_none());
    }

    #[test]
    fn snapshot_reflects_active_progress() {
        let mut ledger = BuildLedger::new();
        let id = ledger.create("wall", "cobblestone", ORIGIN, wall_size(), None);
        if let Some(project) = ledger.get_mut(id) {
            project.status = BuildStatus::Active;
            project.mark_placed(0);
            project.mark_placed(1);
        }
        let snapshot = ledger.snapshot();
        assert!(snapshot.is_some_and(|s| s.total == 6 && s.done == 2));
    }

    #[test]
    fn unknown_id_yields_nothing() {
        let mut ledger = BuildLedger::new();
        let _ = ledger.create("wall", "stone", ORIGIN, wall_size(), None);
        assert!(ledger.get_mut(ProjectId::new()).is_none());
    }

    #[test]
    fn complete_project_stamps_time() {
        let blocks = plan_structure(
            StructureKind::Floor,
            "dirt",
            ORIGIN,
            StructureSize::default(),
        );
        let mut project = BuildProject::new("shed floor", "floor", ORIGIN, "dirt", blocks);
        complete_project(&mut project);
        assert_eq!(project.status, BuildStatus::Completed);
        assert!(project.completed_at.is_some());
    }
}
