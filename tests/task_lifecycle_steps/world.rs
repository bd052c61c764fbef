//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use inspectorate::task::{
    adapters::memory::{InMemoryChecklistCatalog, InMemoryResultRepository, InMemoryTaskRepository},
    domain::Task,
    services::{InspectionError, InspectionService, TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryResultRepository, DefaultClock>;

/// Inspection service type used by the BDD world.
pub type TestInspectionService = InspectionService<
    InMemoryTaskRepository,
    InMemoryResultRepository,
    InMemoryChecklistCatalog,
    DefaultClock,
>;

/// Outcome of the last request issued by a `When` step.
#[derive(Debug)]
pub enum StepOutcome {
    /// Result of a lifecycle service call.
    Lifecycle(Result<Task, TaskLifecycleError>),
    /// Result of an inspection service call.
    Inspection(Result<Task, InspectionError>),
}

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub lifecycle: TestLifecycleService,
    pub inspection: TestInspectionService,
    pub catalog: Arc<InMemoryChecklistCatalog>,
    pub checklist_len: u64,
    pub task: Option<Task>,
    pub last_outcome: Option<StepOutcome>,
}

impl TaskLifecycleWorld {
    /// Creates a world over empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let results = Arc::new(InMemoryResultRepository::new());
        let catalog = Arc::new(InMemoryChecklistCatalog::new());
        let clock = Arc::new(DefaultClock);

        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&results),
                Arc::clone(&clock),
            ),
            inspection: InspectionService::new(tasks, results, Arc::clone(&catalog), clock),
            catalog,
            checklist_len: 0,
            task: None,
            last_outcome: None,
        }
    }

    /// Returns the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Re-reads the scenario task from the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is missing or the lookup fails.
    pub fn reload(&mut self) -> Result<(), eyre::Report> {
        let id = self.current_task()?.id();
        let task = run_async(self.lifecycle.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("task {id} disappeared"))?;
        self.task = Some(task);
        Ok(())
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
