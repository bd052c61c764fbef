//! Service layer for task creation, listing, and status changes.

use crate::task::{
    domain::{
        BuildingRef, ChecklistRef, InspectorRef, NewTask, Session, Task, TaskAction,
        TaskDomainError, TaskId, TaskListQuery, TaskPolicy, TaskPriority, TaskStatus,
        TaskStatusSet, authorize_action, authorized_next_states,
    },
    ports::{
        InspectionResultRepository, InspectionResultRepositoryError, TaskRepository,
        TaskRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    scheduled_for: DateTime<Utc>,
    building: BuildingRef,
    checklist: ChecklistRef,
    inspector: InspectorRef,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        building: BuildingRef,
        checklist: ChecklistRef,
        inspector: InspectorRef,
        scheduled_for: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            scheduled_for,
            building,
            checklist,
            inspector,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for a generic status change.
///
/// The target status arrives as a raw string, as it would from a form or
/// an API payload, and is parsed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
        }
    }
}

/// Coordinator's disposition of a task under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewDecision {
    /// Accept the inspection (`OnReview -> Approved`).
    Approve,
    /// Send the inspection back (`OnReview -> ForRevision`).
    RequestRevision,
}

impl ReviewDecision {
    const fn action(self) -> TaskAction {
        match self {
            Self::Approve => TaskAction::Approve,
            Self::RequestRevision => TaskAction::RequestRevision,
        }
    }

    const fn target(self) -> TaskStatus {
        match self {
            Self::Approve => TaskStatus::Approved,
            Self::RequestRevision => TaskStatus::ForRevision,
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// A lifecycle decision or domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Result repository operation failed.
    #[error(transparent)]
    Results(#[from] InspectionResultRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Submission must go through the inspection service, which checks
    /// checklist completeness.
    #[error("task {0} must be submitted through the inspection service")]
    SubmissionRequired(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every operation re-reads the task from the repository, runs the
/// authorization check and then the transition check, and only then
/// persists.
#[derive(Clone)]
pub struct TaskLifecycleService<R, I, C>
where
    R: TaskRepository,
    I: InspectionResultRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    results: Arc<I>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, I, C> TaskLifecycleService<R, I, C>
where
    R: TaskRepository,
    I: InspectionResultRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default policy.
    #[must_use]
    pub fn new(tasks: Arc<R>, results: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            results,
            clock,
            policy: TaskPolicy::default(),
        }
    }

    /// Replaces the lifecycle policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: TaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active lifecycle policy.
    #[must_use]
    pub const fn policy(&self) -> TaskPolicy {
        self.policy
    }

    /// Creates a task in [`TaskStatus::New`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not a
    /// coordinator or the request is invalid, and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        session: &Session,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        guard(authorize_action(TaskAction::Create, session, None), session)?;

        let id = self.tasks.next_id().await?;
        let draft = NewTask {
            title: request.title,
            description: request.description,
            priority: request.priority,
            scheduled_for: request.scheduled_for,
            building: request.building,
            checklist: request.checklist,
            inspector: request.inspector,
        };
        let task = Task::new(id, draft, &*self.clock)?;
        self.tasks.store(&task).await?;

        info!(
            task_id = %task.id(),
            inspector_id = %task.inspector().id(),
            created_by = %session.user_id(),
            "task created"
        );
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks(&self, query: &TaskListQuery) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list(query).await?)
    }

    /// Lists tasks assigned to the session's user, narrowed by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_assigned(
        &self,
        session: &Session,
        query: TaskListQuery,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let scoped = query.assigned_to(session.user_id());
        Ok(self.tasks.list(&scoped).await?)
    }

    /// Returns the next statuses that are both legal and permitted for
    /// `session`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn available_transitions(
        &self,
        session: &Session,
        id: TaskId,
    ) -> TaskLifecycleResult<TaskStatusSet> {
        let task = self.load(id).await?;
        Ok(authorized_next_states(
            task.status(),
            session,
            task.inspector().id(),
        ))
    }

    /// Applies a status change given as a raw status string.
    ///
    /// Moves into `OnReview` are rejected with
    /// [`TaskLifecycleError::SubmissionRequired`]; use
    /// [`crate::task::services::InspectionService::submit_task`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] with `UnknownState`,
    /// `Forbidden`, or `IllegalTransition` when the request is rejected.
    pub async fn transition_task(
        &self,
        session: &Session,
        request: TransitionTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let target = TaskStatus::try_from(request.target_status.as_str())
            .map_err(TaskDomainError::from)?;
        let task = self.load(request.task_id).await?;
        let Some(action) = TaskAction::for_target(target) else {
            return Err(TaskDomainError::IllegalTransition {
                from: task.status(),
                to: target,
            }
            .into());
        };
        if action == TaskAction::Submit {
            return Err(TaskLifecycleError::SubmissionRequired(task.id()));
        }
        self.apply(session, task, action, target).await
    }

    /// Moves a `New` task to `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not a
    /// coordinator or the task is not `New`.
    pub async fn dispatch_task(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.load(id).await?;
        self.apply(session, task, TaskAction::Dispatch, TaskStatus::Pending).await
    }

    /// Accepts a `Pending` task on behalf of its assigned inspector.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not the
    /// assigned inspector or the task is not `Pending`.
    pub async fn accept_task(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.load(id).await?;
        self.apply(session, task, TaskAction::Accept, TaskStatus::InProgress).await
    }

    /// Records the coordinator's review decision for an `OnReview` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not a
    /// coordinator or the task is not `OnReview`.
    pub async fn review_task(
        &self,
        session: &Session,
        id: TaskId,
        decision: ReviewDecision,
    ) -> TaskLifecycleResult<Task> {
        let task = self.load(id).await?;
        self.apply(session, task, decision.action(), decision.target()).await
    }

    /// Cancels a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not a
    /// coordinator or the task cannot be canceled from its status.
    pub async fn cancel_task(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.load(id).await?;
        self.apply(session, task, TaskAction::Cancel, TaskStatus::Canceled).await
    }

    /// Assigns a different inspector to a non-terminal task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not a
    /// coordinator or the task is terminal.
    pub async fn assign_inspector(
        &self,
        session: &Session,
        id: TaskId,
        inspector: InspectorRef,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(id).await?;
        guard(
            authorize_action(TaskAction::Reassign, session, Some(task.inspector().id())),
            session,
        )?;
        let previous = task.inspector().id();
        task.assign_inspector(inspector, &*self.clock)?;
        self.tasks.update(&task).await?;

        info!(
            task_id = %task.id(),
            from = %previous,
            to = %task.inspector().id(),
            "task reassigned"
        );
        Ok(task)
    }

    /// Deletes a task and any results recorded against it.
    ///
    /// When the policy disallows deleting tasks with results, such tasks
    /// are kept and [`TaskDomainError::ResultsExist`] is returned. Results
    /// are removed before the task, so a failed removal leaves the task in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the session is not a
    /// coordinator or policy blocks the deletion.
    pub async fn delete_task(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.load(id).await?;
        guard(
            authorize_action(TaskAction::Delete, session, Some(task.inspector().id())),
            session,
        )?;

        let recorded = self.results.find_for_task(id).await?.len();
        if recorded > 0 && !self.policy.allow_delete_with_results {
            return Err(TaskDomainError::ResultsExist {
                task_id: id,
                count: recorded,
            }
            .into());
        }

        let removed = self.results.remove_for_task(id).await?;
        self.tasks.delete(id).await?;
        info!(
            task_id = %id,
            status = %task.status(),
            removed_results = removed,
            "task deleted"
        );
        Ok(())
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    async fn apply(
        &self,
        session: &Session,
        mut task: Task,
        action: TaskAction,
        target: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        guard(
            authorize_action(action, session, Some(task.inspector().id())),
            session,
        )?;
        let from = task.status();
        task.transition_to(target, &*self.clock)?;
        self.tasks.update(&task).await?;

        info!(
            task_id = %task.id(),
            %from,
            to = %target,
            %action,
            requested_by = %session.user_id(),
            "task transitioned"
        );
        Ok(task)
    }
}

/// Logs rejected authorization checks before propagating them.
pub(super) fn guard(
    decision: Result<(), TaskDomainError>,
    session: &Session,
) -> Result<(), TaskDomainError> {
    if let Err(ref err) = decision {
        warn!(
            user_id = %session.user_id(),
            role = %session.role(),
            error = %err,
            "request forbidden"
        );
    }
    decision
}
