//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use inspectorate::task::{
    adapters::memory::{InMemoryChecklistCatalog, InMemoryResultRepository, InMemoryTaskRepository},
    domain::{
        BuildingId, BuildingRef, ChecklistElement, ChecklistElementId, ChecklistId, ChecklistRef,
        InspectorRef, Session, TaskPolicy, UserId,
    },
    services::{CreateTaskRequest, InspectionService, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Checklist every helper-created task uses.
pub const CHECKLIST_ID: i64 = 4;
/// Number of elements on [`CHECKLIST_ID`].
pub const CHECKLIST_LEN: i64 = 3;
/// Identifier of the coordinator session.
pub const COORDINATOR_ID: i64 = 1;
/// Identifier of the inspector sessions.
pub const INSPECTOR_ID: i64 = 20;

/// Lifecycle service wired to in-memory adapters.
pub type Lifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryResultRepository, DefaultClock>;

/// Inspection service wired to in-memory adapters.
pub type Inspection = InspectionService<
    InMemoryTaskRepository,
    InMemoryResultRepository,
    InMemoryChecklistCatalog,
    DefaultClock,
>;

/// Both services sharing the same adapters.
pub struct Services {
    pub lifecycle: Lifecycle,
    pub inspection: Inspection,
    pub results: Arc<InMemoryResultRepository>,
}

/// Builds services over fresh adapters with `policy`.
///
/// # Errors
///
/// Returns an error if the checklist catalog cannot be seeded.
pub fn services_with(policy: TaskPolicy) -> Result<Services, eyre::Report> {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let results = Arc::new(InMemoryResultRepository::new());
    let catalog = Arc::new(InMemoryChecklistCatalog::new());
    let elements = (1..=CHECKLIST_LEN)
        .map(|id| -> Result<ChecklistElement, eyre::Report> {
            let order = u32::try_from(id)?;
            Ok(ChecklistElement::new(
                ChecklistElementId::new(id)?,
                format!("Элемент {id}"),
                "Инженерные системы",
                order,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    catalog.insert(ChecklistId::new(CHECKLIST_ID)?, elements)?;
    let clock = Arc::new(DefaultClock);

    Ok(Services {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&results),
            Arc::clone(&clock),
        )
        .with_policy(policy),
        inspection: InspectionService::new(tasks, Arc::clone(&results), catalog, clock)
            .with_policy(policy),
        results,
    })
}

/// Provides services using the default policy.
///
/// # Errors
///
/// Returns an error if the checklist catalog cannot be seeded.
#[fixture]
pub fn services() -> Result<Services, eyre::Report> {
    services_with(TaskPolicy::default())
}

/// Coordinator session used by the tests.
///
/// # Errors
///
/// Returns an error if the identifier is invalid.
pub fn coordinator() -> Result<Session, eyre::Report> {
    Ok(Session::coordinator(UserId::new(COORDINATOR_ID)?))
}

/// Inspector session for `id`.
///
/// # Errors
///
/// Returns an error if the identifier is invalid.
pub fn inspector_session(id: i64) -> Result<Session, eyre::Report> {
    Ok(Session::inspector(UserId::new(id)?))
}

/// Builds a create request assigned to inspector `inspector_id`.
///
/// # Errors
///
/// Returns an error if any identifier or name is invalid.
pub fn request_for(title: &str, inspector_id: i64) -> Result<CreateTaskRequest, eyre::Report> {
    let scheduled_for = Utc
        .with_ymd_and_hms(2026, 10, 20, 10, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid schedule"))?;
    Ok(CreateTaskRequest::new(
        title,
        BuildingRef::new(BuildingId::new(77)?, "пр. Мира, 5"),
        ChecklistRef::new(ChecklistId::new(CHECKLIST_ID)?, "Плановый осмотр"),
        InspectorRef::new(UserId::new(inspector_id)?, format!("Inspector {inspector_id}"))?,
        scheduled_for,
    ))
}
