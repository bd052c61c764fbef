//! Repository port for checklist element results.

use crate::task::domain::{ChecklistElementId, ChecklistElementResult, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for inspection result repository operations.
pub type InspectionResultRepositoryResult<T> = Result<T, InspectionResultRepositoryError>;

/// Persistence contract for results, keyed by (task, element).
#[async_trait]
pub trait InspectionResultRepository: Send + Sync {
    /// Inserts the result, or replaces the existing result for the same
    /// task and element.
    async fn upsert(&self, result: &ChecklistElementResult)
    -> InspectionResultRepositoryResult<()>;

    /// Finds the result for one element of a task.
    async fn find(
        &self,
        task_id: TaskId,
        element_id: ChecklistElementId,
    ) -> InspectionResultRepositoryResult<Option<ChecklistElementResult>>;

    /// Returns every result recorded for a task.
    async fn find_for_task(
        &self,
        task_id: TaskId,
    ) -> InspectionResultRepositoryResult<Vec<ChecklistElementResult>>;

    /// Removes the result for one element of a task.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionResultRepositoryError::NotFound`] when no result
    /// exists for the pair.
    async fn remove(
        &self,
        task_id: TaskId,
        element_id: ChecklistElementId,
    ) -> InspectionResultRepositoryResult<()>;

    /// Removes every result recorded for a task, returning how many were
    /// removed.
    async fn remove_for_task(&self, task_id: TaskId) -> InspectionResultRepositoryResult<usize>;
}

/// Errors returned by inspection result repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InspectionResultRepositoryError {
    /// No result exists for the task and element.
    #[error("no result for element {element_id} of task {task_id}")]
    NotFound {
        /// Task that was queried.
        task_id: TaskId,
        /// Element that was queried.
        element_id: ChecklistElementId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InspectionResultRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
