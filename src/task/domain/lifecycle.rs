//! Task lifecycle engine.
//!
//! Pure decision functions over the transition table below. Nothing here
//! reads or writes storage; callers persist the outcome through the
//! repository ports.
//!
//! | From          | Legal next statuses       |
//! |---------------|---------------------------|
//! | `New`         | `Pending`, `Canceled`     |
//! | `Pending`     | `InProgress`, `Canceled`  |
//! | `InProgress`  | `OnReview`, `Canceled`    |
//! | `OnReview`    | `Approved`, `ForRevision` |
//! | `ForRevision` | `OnReview`, `Canceled`    |
//! | `Approved`    | none                      |
//! | `Canceled`    | none                      |
//!
//! Legality (is the edge in the table) and authorization (may this session
//! request it) are separate checks. Services run both.

use super::{
    Actor, Completeness, Role, Session, TaskAction, TaskDomainError, TaskStatus, TaskStatusSet,
    UserId,
};

/// Returns the statuses reachable from `current` in one step.
#[must_use]
pub const fn legal_next_states(current: TaskStatus) -> TaskStatusSet {
    let none = TaskStatusSet::EMPTY;
    match current {
        TaskStatus::New => none.with(TaskStatus::Pending).with(TaskStatus::Canceled),
        TaskStatus::Pending => none.with(TaskStatus::InProgress).with(TaskStatus::Canceled),
        TaskStatus::InProgress => none.with(TaskStatus::OnReview).with(TaskStatus::Canceled),
        TaskStatus::OnReview => none.with(TaskStatus::Approved).with(TaskStatus::ForRevision),
        TaskStatus::ForRevision => none.with(TaskStatus::OnReview).with(TaskStatus::Canceled),
        TaskStatus::Approved | TaskStatus::Canceled => none,
    }
}

/// Validates a move from `current` to `target`.
///
/// # Errors
///
/// Returns [`TaskDomainError::IllegalTransition`] when the edge is not in
/// the transition table.
pub const fn request_transition(
    current: TaskStatus,
    target: TaskStatus,
) -> Result<(), TaskDomainError> {
    if legal_next_states(current).contains(target) {
        Ok(())
    } else {
        Err(TaskDomainError::IllegalTransition {
            from: current,
            to: target,
        })
    }
}

/// Parses both statuses and validates the move between them.
///
/// Returns the parsed target status on success.
///
/// # Errors
///
/// Returns [`TaskDomainError::UnknownState`] when either value is not a known
/// status, or [`TaskDomainError::IllegalTransition`] when the edge is not in
/// the table.
pub fn request_transition_raw(current: &str, target: &str) -> Result<TaskStatus, TaskDomainError> {
    let from = TaskStatus::try_from(current)?;
    let to = TaskStatus::try_from(target)?;
    request_transition(from, to)?;
    Ok(to)
}

/// Returns `true` when results are complete enough to submit for review.
#[must_use]
pub const fn can_submit_for_review(completeness: Completeness) -> bool {
    completeness.is_complete()
}

/// Checks that results are complete enough to submit for review.
///
/// # Errors
///
/// Returns [`TaskDomainError::IncompleteChecklist`] carrying the progress
/// counts when any required element lacks a result, or the checklist is
/// empty.
pub const fn ensure_submittable(completeness: Completeness) -> Result<(), TaskDomainError> {
    if can_submit_for_review(completeness) {
        Ok(())
    } else {
        Err(TaskDomainError::IncompleteChecklist {
            completed: completeness.completed(),
            total: completeness.total(),
        })
    }
}

/// Returns `true` when a task in `status` can be accepted by its inspector.
#[must_use]
pub const fn can_accept_task(status: TaskStatus) -> bool {
    matches!(status, TaskStatus::Pending)
}

/// Checks that `session` may request `action` on a task assigned to
/// `task_inspector`.
///
/// Pass `None` for `task_inspector` when no task exists yet (creation).
///
/// # Errors
///
/// Returns [`TaskDomainError::Forbidden`] when the role does not match the
/// expected actor, or when an inspector acts on a task assigned to someone
/// else.
pub fn authorize_action(
    action: TaskAction,
    session: &Session,
    task_inspector: Option<UserId>,
) -> Result<(), TaskDomainError> {
    let permitted = match action.required_actor() {
        Actor::Coordinator => session.role() == Role::Coordinator,
        Actor::AssignedInspector => {
            session.role() == Role::Inspector && task_inspector == Some(session.user_id())
        }
    };
    if permitted {
        Ok(())
    } else {
        Err(TaskDomainError::Forbidden {
            action,
            role: session.role(),
        })
    }
}

/// Returns the legal next statuses that `session` may also request.
#[must_use]
pub fn authorized_next_states(
    current: TaskStatus,
    session: &Session,
    task_inspector: UserId,
) -> TaskStatusSet {
    legal_next_states(current)
        .iter()
        .filter(|target| {
            TaskAction::for_target(*target).is_some_and(|action| {
                authorize_action(action, session, Some(task_inspector)).is_ok()
            })
        })
        .collect()
}

impl TaskStatus {
    /// Returns the statuses reachable from this one in one step.
    #[must_use]
    pub const fn legal_next_states(self) -> TaskStatusSet {
        legal_next_states(self)
    }

    /// Returns `true` when moving to `target` is legal.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        legal_next_states(self).contains(target)
    }

    /// Returns `true` for statuses with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        legal_next_states(self).is_empty()
    }
}
