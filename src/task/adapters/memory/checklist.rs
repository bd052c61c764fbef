//! In-memory checklist catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ChecklistElement, ChecklistId},
    ports::{ChecklistCatalog, ChecklistCatalogError, ChecklistCatalogResult},
};

/// Thread-safe in-memory checklist catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChecklistCatalog {
    checklists: Arc<RwLock<HashMap<ChecklistId, Vec<ChecklistElement>>>>,
}

impl InMemoryChecklistCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the elements of a checklist.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistCatalogError::Persistence`] when the catalog lock is
    /// poisoned.
    pub fn insert(
        &self,
        checklist_id: ChecklistId,
        elements: impl IntoIterator<Item = ChecklistElement>,
    ) -> ChecklistCatalogResult<()> {
        let mut ordered: Vec<ChecklistElement> = elements.into_iter().collect();
        ordered.sort_by_key(ChecklistElement::order_index);
        let mut checklists = self.checklists.write().map_err(lock_error)?;
        checklists.insert(checklist_id, ordered);
        Ok(())
    }
}

fn lock_error(err: impl ToString) -> ChecklistCatalogError {
    ChecklistCatalogError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ChecklistCatalog for InMemoryChecklistCatalog {
    async fn elements(
        &self,
        checklist_id: ChecklistId,
    ) -> ChecklistCatalogResult<Vec<ChecklistElement>> {
        let checklists = self.checklists.read().map_err(lock_error)?;
        checklists
            .get(&checklist_id)
            .cloned()
            .ok_or(ChecklistCatalogError::NotFound(checklist_id))
    }
}
