//! Checklist elements, recorded results, and completeness tracking.

use super::{ChecklistElementId, ConditionStatus, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An inspectable item on a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistElement {
    id: ChecklistElementId,
    name: String,
    category: String,
    order_index: u32,
}

impl ChecklistElement {
    /// Creates a checklist element.
    #[must_use]
    pub fn new(
        id: ChecklistElementId,
        name: impl Into<String>,
        category: impl Into<String>,
        order_index: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            order_index,
        }
    }

    /// Returns the element identifier.
    #[must_use]
    pub const fn id(&self) -> ChecklistElementId {
        self.id
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the element's position within its checklist.
    #[must_use]
    pub const fn order_index(&self) -> u32 {
        self.order_index
    }
}

/// Condition recorded by an inspector for one element of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistElementResult {
    task_id: TaskId,
    element_id: ChecklistElementId,
    condition: ConditionStatus,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedResultData {
    /// Owning task.
    pub task_id: TaskId,
    /// Inspected element.
    pub element_id: ChecklistElementId,
    /// Recorded condition.
    pub condition: ConditionStatus,
    /// Optional inspector comment.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ChecklistElementResult {
    /// Records a new result.
    ///
    /// Blank comments are stored as `None`.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        element_id: ChecklistElementId,
        condition: ConditionStatus,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            task_id,
            element_id,
            condition,
            comment: normalize_comment(comment),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a result from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedResultData) -> Self {
        Self {
            task_id: data.task_id,
            element_id: data.element_id,
            condition: data.condition,
            comment: data.comment,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces the recorded condition and comment, keeping `created_at`.
    pub fn revise(
        &mut self,
        condition: ConditionStatus,
        comment: Option<String>,
        clock: &impl Clock,
    ) {
        self.condition = condition;
        self.comment = normalize_comment(comment);
        self.updated_at = clock.utc();
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the inspected element.
    #[must_use]
    pub const fn element_id(&self) -> ChecklistElementId {
        self.element_id
    }

    /// Returns the recorded condition.
    #[must_use]
    pub const fn condition(&self) -> ConditionStatus {
        self.condition
    }

    /// Returns the inspector comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Progress of a task's checklist: how many required elements have a
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Completeness {
    completed: usize,
    total: usize,
}

impl Completeness {
    /// Creates a completeness value from raw counts.
    #[must_use]
    pub const fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Derives completeness from the checklist and the recorded results.
    ///
    /// Only results for elements on the checklist count, and each element
    /// counts once.
    #[must_use]
    pub fn from_results(
        elements: &[ChecklistElement],
        results: &[ChecklistElementResult],
    ) -> Self {
        let required: HashSet<ChecklistElementId> =
            elements.iter().map(ChecklistElement::id).collect();
        let completed = results
            .iter()
            .map(ChecklistElementResult::element_id)
            .filter(|id| required.contains(id))
            .collect::<HashSet<_>>()
            .len();
        Self::new(completed, required.len())
    }

    /// Returns the number of elements with a result.
    #[must_use]
    pub const fn completed(self) -> usize {
        self.completed
    }

    /// Returns the number of elements required by the checklist.
    #[must_use]
    pub const fn total(self) -> usize {
        self.total
    }

    /// Returns the number of elements still without a result.
    #[must_use]
    pub const fn remaining(self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Returns `true` when every required element has a result.
    ///
    /// An empty checklist is never complete.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// A recorded result joined with its checklist element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// The checklist element.
    pub element: ChecklistElement,
    /// The recorded result.
    pub result: ChecklistElementResult,
}

/// Results of a task with progress counts, ordered by element position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResultsSummary {
    /// Task the results belong to.
    pub task_id: TaskId,
    /// Task title at the time of the read.
    pub task_title: String,
    /// Progress counts.
    pub completeness: Completeness,
    /// Recorded results ordered by element `order_index`.
    pub entries: Vec<ResultEntry>,
}

impl TaskResultsSummary {
    /// Returns the most severe condition recorded, if any.
    #[must_use]
    pub fn worst_condition(&self) -> Option<ConditionStatus> {
        self.entries
            .iter()
            .map(|entry| entry.result.condition())
            .max()
    }
}
