//! Read-only port for checklist definitions.

use crate::task::domain::{ChecklistElement, ChecklistId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for checklist catalog operations.
pub type ChecklistCatalogResult<T> = Result<T, ChecklistCatalogError>;

/// Source of the elements each checklist requires.
#[async_trait]
pub trait ChecklistCatalog: Send + Sync {
    /// Returns the elements of a checklist ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistCatalogError::NotFound`] when the checklist does not
    /// exist.
    async fn elements(&self, checklist_id: ChecklistId)
    -> ChecklistCatalogResult<Vec<ChecklistElement>>;
}

/// Errors returned by checklist catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum ChecklistCatalogError {
    /// The checklist was not found.
    #[error("checklist not found: {0}")]
    NotFound(ChecklistId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChecklistCatalogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
