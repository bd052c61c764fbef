//! In-memory inspection result repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ChecklistElementId, ChecklistElementResult, TaskId},
    ports::{
        InspectionResultRepository, InspectionResultRepositoryError,
        InspectionResultRepositoryResult,
    },
};

/// Thread-safe in-memory result repository.
///
/// Keyed by (task, element), so each pair holds at most one result.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultRepository {
    results: Arc<RwLock<BTreeMap<(TaskId, ChecklistElementId), ChecklistElementResult>>>,
}

impl InMemoryResultRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> InspectionResultRepositoryError {
    InspectionResultRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InspectionResultRepository for InMemoryResultRepository {
    async fn upsert(
        &self,
        result: &ChecklistElementResult,
    ) -> InspectionResultRepositoryResult<()> {
        let mut results = self.results.write().map_err(lock_error)?;
        results.insert((result.task_id(), result.element_id()), result.clone());
        Ok(())
    }

    async fn find(
        &self,
        task_id: TaskId,
        element_id: ChecklistElementId,
    ) -> InspectionResultRepositoryResult<Option<ChecklistElementResult>> {
        let results = self.results.read().map_err(lock_error)?;
        Ok(results.get(&(task_id, element_id)).cloned())
    }

    async fn find_for_task(
        &self,
        task_id: TaskId,
    ) -> InspectionResultRepositoryResult<Vec<ChecklistElementResult>> {
        let results = self.results.read().map_err(lock_error)?;
        Ok(results
            .values()
            .filter(|result| result.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn remove(
        &self,
        task_id: TaskId,
        element_id: ChecklistElementId,
    ) -> InspectionResultRepositoryResult<()> {
        let mut results = self.results.write().map_err(lock_error)?;
        results
            .remove(&(task_id, element_id))
            .map(|_| ())
            .ok_or(InspectionResultRepositoryError::NotFound {
                task_id,
                element_id,
            })
    }

    async fn remove_for_task(&self, task_id: TaskId) -> InspectionResultRepositoryResult<usize> {
        let mut results = self.results.write().map_err(lock_error)?;
        let before = results.len();
        results.retain(|(owner, _), _| *owner != task_id);
        Ok(before - results.len())
    }
}
