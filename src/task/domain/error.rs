//! Error types for task lifecycle decisions and value parsing.

use super::{ChecklistElementId, ChecklistId, Role, TaskAction, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by lifecycle decisions and domain value construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A status value outside the known enumeration was encountered.
    #[error(transparent)]
    UnknownState(#[from] ParseTaskStatusError),

    /// The requested edge is not present in the transition table.
    #[error("transition from {from} to {to} is not available")]
    IllegalTransition {
        /// Status the task is currently in.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// Submission was blocked because checklist results are incomplete.
    #[error("checklist incomplete: {completed} of {total} elements filled")]
    IncompleteChecklist {
        /// Number of elements with a recorded result.
        completed: usize,
        /// Number of elements required by the checklist.
        total: usize,
    },

    /// The requester may not perform the action.
    #[error("{role} may not perform {action}")]
    Forbidden {
        /// Action that was requested.
        action: TaskAction,
        /// Role of the requester.
        role: Role,
    },

    /// Results cannot be changed while the task is in its current status.
    #[error("results for task {task_id} are locked in status {status}")]
    ResultsLocked {
        /// Task whose results were targeted.
        task_id: TaskId,
        /// Current task status.
        status: TaskStatus,
    },

    /// The element does not belong to the task's checklist.
    #[error("element {element_id} is not part of checklist {checklist_id}")]
    ElementNotInChecklist {
        /// Checklist assigned to the task.
        checklist_id: ChecklistId,
        /// Element that was targeted.
        element_id: ChecklistElementId,
    },

    /// The task already has recorded results and policy forbids deletion.
    #[error("task {task_id} has {count} recorded results and cannot be deleted")]
    ResultsExist {
        /// Task that was targeted for deletion.
        task_id: TaskId,
        /// Number of recorded results.
        count: usize,
    },

    /// Terminal tasks cannot be reassigned.
    #[error("task {task_id} is {status} and cannot be reassigned")]
    ReassignmentClosed {
        /// Task that was targeted.
        task_id: TaskId,
        /// Current (terminal) task status.
        status: TaskStatus,
    },

    /// An identifier was zero or negative.
    #[error("invalid {entity} identifier {value}, expected a positive integer")]
    InvalidIdentifier {
        /// Entity kind the identifier refers to.
        entity: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The inspector display name is empty after trimming.
    #[error("inspector name must not be empty")]
    EmptyInspectorName,
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a requester role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing an element condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown condition status: {0}")]
pub struct ParseConditionStatusError(pub String);
