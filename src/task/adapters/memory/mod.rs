//! Thread-safe in-memory adapters for tests and embedding.

mod checklist;
mod results;
mod task;

pub use checklist::InMemoryChecklistCatalog;
pub use results::InMemoryResultRepository;
pub use task::InMemoryTaskRepository;
