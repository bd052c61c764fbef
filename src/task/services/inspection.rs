//! Service layer for recording inspection results and submitting tasks.

use super::lifecycle::guard;
use crate::task::{
    domain::{
        ChecklistElement, ChecklistElementId, ChecklistElementResult, Completeness,
        ConditionStatus, ResultEntry, Session, Task, TaskAction, TaskDomainError, TaskId,
        TaskPolicy, TaskResultsSummary, TaskStatus, authorize_action, ensure_submittable,
        request_transition,
    },
    ports::{
        ChecklistCatalog, ChecklistCatalogError, InspectionResultRepository,
        InspectionResultRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for recording the condition of one checklist element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordResultRequest {
    task_id: TaskId,
    element_id: ChecklistElementId,
    condition: ConditionStatus,
    comment: Option<String>,
}

impl RecordResultRequest {
    /// Creates a request without a comment.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        element_id: ChecklistElementId,
        condition: ConditionStatus,
    ) -> Self {
        Self {
            task_id,
            element_id,
            condition,
            comment: None,
        }
    }

    /// Attaches an inspector comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Service-level errors for inspection operations.
#[derive(Debug, Error)]
pub enum InspectionError {
    /// A lifecycle decision or domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Result repository operation failed.
    #[error(transparent)]
    Results(#[from] InspectionResultRepositoryError),
    /// Checklist lookup failed.
    #[error(transparent)]
    Catalog(#[from] ChecklistCatalogError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for inspection service operations.
pub type InspectionServiceResult<T> = Result<T, InspectionError>;

/// Inspection result recording and submission service.
#[derive(Clone)]
pub struct InspectionService<R, I, K, C>
where
    R: TaskRepository,
    I: InspectionResultRepository,
    K: ChecklistCatalog,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    results: Arc<I>,
    catalog: Arc<K>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, I, K, C> InspectionService<R, I, K, C>
where
    R: TaskRepository,
    I: InspectionResultRepository,
    K: ChecklistCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default policy.
    #[must_use]
    pub fn new(tasks: Arc<R>, results: Arc<I>, catalog: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            results,
            catalog,
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

    /// Records or updates the result for one checklist element.
    ///
    /// Only the assigned inspector may record results, and only while the
    /// policy deems the task's results editable.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::Domain`] with `Forbidden`, `ResultsLocked`,
    /// or `ElementNotInChecklist` when the request is rejected.
    pub async fn record_result(
        &self,
        session: &Session,
        request: RecordResultRequest,
    ) -> InspectionServiceResult<ChecklistElementResult> {
        let task = self.editable_task(session, request.task_id).await?;
        let elements = self.catalog.elements(task.checklist().id).await?;
        ensure_on_checklist(&task, &elements, request.element_id)?;

        let existing = self.results.find(task.id(), request.element_id).await?;
        let result = match existing {
            Some(mut result) => {
                result.revise(request.condition, request.comment, &*self.clock);
                result
            }
            None => ChecklistElementResult::new(
                task.id(),
                request.element_id,
                request.condition,
                request.comment,
                &*self.clock,
            ),
        };
        self.results.upsert(&result).await?;

        debug!(
            task_id = %task.id(),
            element_id = %result.element_id(),
            condition = %result.condition(),
            "inspection result recorded"
        );
        Ok(result)
    }

    /// Deletes the result for one checklist element.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::Domain`] when the request is rejected, and
    /// [`InspectionError::Results`] when no result exists for the element.
    pub async fn delete_result(
        &self,
        session: &Session,
        task_id: TaskId,
        element_id: ChecklistElementId,
    ) -> InspectionServiceResult<()> {
        let task = self.editable_task(session, task_id).await?;
        self.results.remove(task.id(), element_id).await?;
        debug!(task_id = %task_id, element_id = %element_id, "inspection result deleted");
        Ok(())
    }

    /// Returns the task's checklist progress.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::NotFound`] when the task does not exist and
    /// [`InspectionError::Catalog`] when its checklist cannot be read.
    pub async fn completeness(&self, task_id: TaskId) -> InspectionServiceResult<Completeness> {
        let task = self.load(task_id).await?;
        self.completeness_of(&task).await
    }

    /// Returns the task's results with element metadata and progress
    /// counts, ordered by element position.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::NotFound`] when the task does not exist and
    /// [`InspectionError::Catalog`] when its checklist cannot be read.
    pub async fn results_summary(
        &self,
        task_id: TaskId,
    ) -> InspectionServiceResult<TaskResultsSummary> {
        let task = self.load(task_id).await?;
        let elements = self.catalog.elements(task.checklist().id).await?;
        let results = self.results.find_for_task(task_id).await?;
        let completeness = Completeness::from_results(&elements, &results);

        let mut by_element: HashMap<ChecklistElementId, ChecklistElementResult> = results
            .into_iter()
            .map(|result| (result.element_id(), result))
            .collect();
        let mut ordered = elements;
        ordered.sort_by_key(ChecklistElement::order_index);
        let entries = ordered
            .into_iter()
            .filter_map(|element| {
                by_element
                    .remove(&element.id())
                    .map(|result| ResultEntry { element, result })
            })
            .collect();

        Ok(TaskResultsSummary {
            task_id,
            task_title: task.title().to_owned(),
            completeness,
            entries,
        })
    }

    /// Submits the task for review on behalf of its assigned inspector.
    ///
    /// Legal from `InProgress` and `ForRevision`, and only when every
    /// checklist element has a result.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::Domain`] with `Forbidden`,
    /// `IllegalTransition`, or `IncompleteChecklist` when submission is
    /// rejected. Nothing is persisted in that case.
    pub async fn submit_task(
        &self,
        session: &Session,
        task_id: TaskId,
    ) -> InspectionServiceResult<Task> {
        let mut task = self.load(task_id).await?;
        guard(
            authorize_action(TaskAction::Submit, session, Some(task.inspector().id())),
            session,
        )?;
        let from = task.status();
        request_transition(from, TaskStatus::OnReview)?;

        let completeness = self.completeness_of(&task).await?;
        if let Err(err) = ensure_submittable(completeness) {
            warn!(
                task_id = %task_id,
                completed = completeness.completed(),
                total = completeness.total(),
                "submission blocked by incomplete checklist"
            );
            return Err(err.into());
        }

        task.transition_to(TaskStatus::OnReview, &*self.clock)?;
        self.tasks.update(&task).await?;

        info!(
            task_id = %task_id,
            %from,
            inspector_id = %session.user_id(),
            elements = completeness.total(),
            "task submitted for review"
        );
        Ok(task)
    }

    async fn load(&self, id: TaskId) -> InspectionServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(InspectionError::NotFound(id))
    }

    async fn completeness_of(&self, task: &Task) -> InspectionServiceResult<Completeness> {
        let elements = self.catalog.elements(task.checklist().id).await?;
        let results = self.results.find_for_task(task.id()).await?;
        Ok(Completeness::from_results(&elements, &results))
    }

    async fn editable_task(
        &self,
        session: &Session,
        task_id: TaskId,
    ) -> InspectionServiceResult<Task> {
        let task = self.load(task_id).await?;
        guard(
            authorize_action(
                TaskAction::RecordResult,
                session,
                Some(task.inspector().id()),
            ),
            session,
        )?;
        if !self.policy.results_editable_in(task.status()) {
            return Err(TaskDomainError::ResultsLocked {
                task_id,
                status: task.status(),
            }
            .into());
        }
        Ok(task)
    }
}

fn ensure_on_checklist(
    task: &Task,
    elements: &[ChecklistElement],
    element_id: ChecklistElementId,
) -> Result<(), TaskDomainError> {
    if elements.iter().any(|element| element.id() == element_id) {
        Ok(())
    } else {
        Err(TaskDomainError::ElementNotInChecklist {
            checklist_id: task.checklist().id,
            element_id,
        })
    }
}
