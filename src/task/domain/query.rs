//! Task list filtering.

use super::{Task, TaskStatus, UserId};

/// Filter applied when listing tasks.
///
/// All criteria are optional and combine with logical AND. The search term
/// matches case-insensitively against the title, building address,
/// checklist title, and inspector name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    status: Option<TaskStatus>,
    inspector: Option<UserId>,
    search: Option<String>,
}

impl TaskListQuery {
    /// Creates a query that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to tasks assigned to one inspector.
    #[must_use]
    pub const fn assigned_to(mut self, inspector: UserId) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Restricts results to tasks whose display fields contain `term`.
    ///
    /// Blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let lowered = term.into().trim().to_lowercase();
        self.search = (!lowered.is_empty()).then_some(lowered);
        self
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the inspector criterion, if any.
    #[must_use]
    pub const fn inspector(&self) -> Option<UserId> {
        self.inspector
    }

    /// Returns `true` when `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|status| task.status() != status) {
            return false;
        }
        if self
            .inspector
            .is_some_and(|inspector| task.inspector().id() != inspector)
        {
            return false;
        }
        self.search.as_deref().is_none_or(|term| {
            [
                task.title(),
                task.building().address.as_str(),
                task.checklist().title.as_str(),
                task.inspector().name(),
            ]
            .into_iter()
            .any(|field| field.to_lowercase().contains(term))
        })
    }
}
