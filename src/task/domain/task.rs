//! Task aggregate root and the snapshots of the entities it references.

use super::{
    BuildingId, ChecklistId, TaskDomainError, TaskId, TaskPriority, TaskStatus, UserId,
    request_transition,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Building referenced by a task, with its display address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRef {
    /// Building identifier.
    pub id: BuildingId,
    /// Street address shown in listings.
    pub address: String,
}

impl BuildingRef {
    /// Creates a building reference.
    #[must_use]
    pub fn new(id: BuildingId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
        }
    }
}

/// Checklist referenced by a task, with its display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRef {
    /// Checklist identifier.
    pub id: ChecklistId,
    /// Checklist title shown in listings.
    pub title: String,
}

impl ChecklistRef {
    /// Creates a checklist reference.
    #[must_use]
    pub fn new(id: ChecklistId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Inspector assigned to a task, with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InspectorRecord")]
pub struct InspectorRef {
    id: UserId,
    name: String,
}

#[derive(Deserialize)]
struct InspectorRecord {
    id: UserId,
    name: String,
}

impl TryFrom<InspectorRecord> for InspectorRef {
    type Error = TaskDomainError;

    fn try_from(record: InspectorRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.name)
    }
}

impl InspectorRef {
    /// Creates a validated inspector reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyInspectorName`] when the name is blank.
    pub fn new(id: UserId, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyInspectorName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
        })
    }

    /// Returns the inspector's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the inspector's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parameter object describing a task to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Short task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Date by which the inspection should take place.
    pub scheduled_for: DateTime<Utc>,
    /// Building to inspect.
    pub building: BuildingRef,
    /// Checklist to inspect against.
    pub checklist: ChecklistRef,
    /// Assigned inspector.
    pub inspector: InspectorRef,
}

/// Inspection task aggregate root.
///
/// Deserialization goes through [`PersistedTaskData`] and rejects blank
/// titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    scheduled_for: DateTime<Utc>,
    building: BuildingRef,
    checklist: ChecklistRef,
    inspector: InspectorRef,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted scheduled date.
    pub scheduled_for: DateTime<Utc>,
    /// Persisted building snapshot.
    pub building: BuildingRef,
    /// Persisted checklist snapshot.
    pub checklist: ChecklistRef,
    /// Persisted inspector snapshot.
    pub inspector: InspectorRef,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in [`TaskStatus::New`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(id: TaskId, draft: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let description = draft
            .description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        let timestamp = clock.utc();

        Ok(Self {
            id,
            title: title.to_owned(),
            description,
            status: TaskStatus::New,
            priority: draft.priority,
            scheduled_for: draft.scheduled_for,
            building: draft.building,
            checklist: draft.checklist,
            inspector: draft.inspector,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            scheduled_for: data.scheduled_for,
            building: data.building,
            checklist: data.checklist,
            inspector: data.inspector,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the scheduled inspection date.
    #[must_use]
    pub const fn scheduled_for(&self) -> DateTime<Utc> {
        self.scheduled_for
    }

    /// Returns the building snapshot.
    #[must_use]
    pub const fn building(&self) -> &BuildingRef {
        &self.building
    }

    /// Returns the checklist snapshot.
    #[must_use]
    pub const fn checklist(&self) -> &ChecklistRef {
        &self.checklist
    }

    /// Returns the assigned inspector.
    #[must_use]
    pub const fn inspector(&self) -> &InspectorRef {
        &self.inspector
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target` when the transition table permits it.
    ///
    /// The task is left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IllegalTransition`] when the edge is not in
    /// the table.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        request_transition(self.status, target)?;
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Assigns a different inspector.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReassignmentClosed`] when the task is in a
    /// terminal status.
    pub fn assign_inspector(
        &mut self,
        inspector: InspectorRef,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::ReassignmentClosed {
                task_id: self.id,
                status: self.status,
            });
        }
        self.inspector = inspector;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        if data.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self::from_persisted(data))
    }
}
