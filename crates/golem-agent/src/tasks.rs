//! The task board: an insertion-ordered queue of declared goals with a
//! single-active-task invariant.
//!
//! Tasks are appended by the decision-maker, promoted strictly in insertion
//! order (there is no priority field), and never deleted -- the board grows
//! for the life of the process. Display truncation is the observer's
//! problem, not the board's.

use chrono::Utc;
use tracing::info;

use golem_types::{Task, TaskStatus};

use crate::error::TaskError;

/// How many recently completed tasks the summary shows.
const SUMMARY_COMPLETED_LIMIT: usize = 3;

/// The ordered collection of all tasks, owned by the orchestrator.
#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Create an empty board.
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Every task ever added, in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// The single active task, if any.
    pub fn active(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.status == TaskStatus::Active)
    }

    /// Append a new pending task. Always succeeds; returns a copy of the
    /// created task for the caller's echo.
    pub fn add(&mut self, title: impl Into<String>, description: Option<String>) -> Task {
        let task = Task::new(title, description);
        info!(task = %task.id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        task
    }

    /// Promote the first pending task (insertion order) to active.
    ///
    /// Fails with [`TaskError::AlreadyActive`] if any task is active,
    /// regardless of the pending queue's contents, and with
    /// [`TaskError::NoPending`] when nothing is waiting.
    pub fn start_next(&mut self) -> Result<&Task, TaskError> {
        if self.active().is_some() {
            return Err(TaskError::AlreadyActive);
        }
        let index = self
            .tasks
            .iter()
            .position(|t| t.status == TaskStatus::Pending)
            .ok_or(TaskError::NoPending)?;
        let task = self.tasks.get_mut(index).ok_or(TaskError::NoPending)?;
        task.status = TaskStatus::Active;
        task.started_at = Some(Utc::now());
        info!(task = %task.id, title = %task.title, "task started");
        Ok(task)
    }

    /// Complete the currently active task.
    ///
    /// Fails with [`TaskError::NoActive`] when nothing is active.
    pub fn complete_active(&mut self) -> Result<&Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.status == TaskStatus::Active)
            .ok_or(TaskError::NoActive)?;
        let task = self.tasks.get_mut(index).ok_or(TaskError::NoActive)?;
        task.status = TaskStatus::Completed;
        task.completed_at = Some(Utc::now());
        info!(task = %task.id, title = %task.title, "task completed");
        Ok(task)
    }

    /// A compact human-readable board summary for the decision-maker's
    /// context window: the active task, everything waiting, and the last
    /// few completed.
    pub fn summary(&self) -> String {
        let status = |s: TaskStatus| match s {
            TaskStatus::Pending => "pending",
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        };
        let line = |t: &Task| format!("- [{}] {}", status(t.status), t.title);
        let mut lines: Vec<String> = Vec::new();
        if let Some(active) = self.active() {
            lines.push(String::from("active task:"));
            lines.push(line(active));
        }
        let pending: Vec<_> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .collect();
        if !pending.is_empty() {
            lines.push(String::from("waiting:"));
            lines.extend(pending.iter().map(|t| line(t)));
        }
        let completed: Vec<_> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .collect();
        if !completed.is_empty() {
            lines.push(String::from("recently completed:"));
            let skip = completed.len().saturating_sub(SUMMARY_COMPLETED_LIMIT);
            lines.extend(completed.iter().skip(skip).map(|t| line(t)));
        }
        if lines.is_empty() {
            return String::from("no tasks");
        }
        lines.join("\n")
    }
}
