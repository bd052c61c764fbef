//! Requester identity, roles, and the actions they may request.

use super::{ParseRoleError, TaskStatus, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by an authenticated requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Plans, dispatches, reviews, and cancels tasks.
    Coordinator,
    /// Accepts assigned tasks and records inspection results.
    Inspector,
}

impl Role {
    /// Returns the canonical role tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coordinator => "coordinator",
            Self::Inspector => "inspector",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "coordinator" => Ok(Self::Coordinator),
            "inspector" => Ok(Self::Inspector),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Identity of the caller, passed explicitly into every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    role: Role,
}

impl Session {
    /// Creates a session for the given user and role.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates a coordinator session.
    #[must_use]
    pub const fn coordinator(user_id: UserId) -> Self {
        Self::new(user_id, Role::Coordinator)
    }

    /// Creates an inspector session.
    #[must_use]
    pub const fn inspector(user_id: UserId) -> Self {
        Self::new(user_id, Role::Inspector)
    }

    /// Returns the requester's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the requester's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Who is expected to initiate a [`TaskAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// Any coordinator.
    Coordinator,
    /// The inspector currently assigned to the task.
    AssignedInspector,
}

/// An intent a requester can express against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Create a new task.
    Create,
    /// Release a new task to its inspector (`New -> Pending`).
    Dispatch,
    /// Take on a dispatched task (`Pending -> InProgress`).
    Accept,
    /// Hand in results for review (`InProgress | ForRevision -> OnReview`).
    Submit,
    /// Accept reviewed work (`OnReview -> Approved`).
    Approve,
    /// Send reviewed work back (`OnReview -> ForRevision`).
    RequestRevision,
    /// Abandon the task (`* -> Canceled`).
    Cancel,
    /// Assign a different inspector.
    Reassign,
    /// Remove the task record.
    Delete,
    /// Record, update, or delete a checklist element result.
    RecordResult,
}

impl TaskAction {
    /// Returns the action that moves a task into `target`.
    ///
    /// Every edge of the transition table is keyed by its target status;
    /// `New` is only entered on creation, so it has no action.
    #[must_use]
    pub const fn for_target(target: TaskStatus) -> Option<Self> {
        match target {
            TaskStatus::New => None,
            TaskStatus::Pending => Some(Self::Dispatch),
            TaskStatus::InProgress => Some(Self::Accept),
            TaskStatus::OnReview => Some(Self::Submit),
            TaskStatus::Approved => Some(Self::Approve),
            TaskStatus::ForRevision => Some(Self::RequestRevision),
            TaskStatus::Canceled => Some(Self::Cancel),
        }
    }

    /// Returns the status this action moves a task into, if it is a
    /// transition at all.
    #[must_use]
    pub const fn target_status(self) -> Option<TaskStatus> {
        match self {
            Self::Dispatch => Some(TaskStatus::Pending),
            Self::Accept => Some(TaskStatus::InProgress),
            Self::Submit => Some(TaskStatus::OnReview),
            Self::Approve => Some(TaskStatus::Approved),
            Self::RequestRevision => Some(TaskStatus::ForRevision),
            Self::Cancel => Some(TaskStatus::Canceled),
            Self::Create | Self::Reassign | Self::Delete | Self::RecordResult => None,
        }
    }

    /// Returns who is expected to initiate this action.
    #[must_use]
    pub const fn required_actor(self) -> Actor {
        match self {
            Self::Accept | Self::Submit | Self::RecordResult => Actor::AssignedInspector,
            Self::Create
            | Self::Dispatch
            | Self::Approve
            | Self::RequestRevision
            | Self::Cancel
            | Self::Reassign
            | Self::Delete => Actor::Coordinator,
        }
    }

    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Dispatch => "dispatch",
            Self::Accept => "accept",
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::RequestRevision => "request_revision",
            Self::Cancel => "cancel",
            Self::Reassign => "reassign",
            Self::Delete => "delete",
            Self::RecordResult => "record_result",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
