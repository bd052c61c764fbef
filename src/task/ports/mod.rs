//! Port contracts for the inspection task lifecycle.
//!
//! Ports stand in for the backend that durably owns tasks, results, and
//! checklists. Services depend only on these traits.

pub mod checklist;
pub mod repository;
pub mod results;

pub use checklist::{ChecklistCatalog, ChecklistCatalogError, ChecklistCatalogResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use results::{
    InspectionResultRepository, InspectionResultRepositoryError, InspectionResultRepositoryResult,
};
