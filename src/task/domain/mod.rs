//! Domain model for the inspection task lifecycle.
//!
//! The lifecycle engine in [`lifecycle`] is pure: it decides which status
//! transitions are legal, whether a session may request them, and whether a
//! checklist is complete enough to submit. Aggregates and value types live
//! alongside it; no infrastructure concern crosses this boundary.

mod access;
mod condition;
mod error;
mod ids;
pub mod lifecycle;
mod policy;
mod priority;
mod query;
mod result;
mod status;
mod task;

pub use access::{Actor, Role, Session, TaskAction};
pub use condition::ConditionStatus;
pub use error::{
    ParseConditionStatusError, ParsePriorityError, ParseRoleError, ParseTaskStatusError,
    TaskDomainError,
};
pub use ids::{BuildingId, ChecklistElementId, ChecklistId, TaskId, UserId};
pub use lifecycle::{
    authorize_action, authorized_next_states, can_accept_task, can_submit_for_review,
    ensure_submittable, legal_next_states, request_transition, request_transition_raw,
};
pub use policy::TaskPolicy;
pub use priority::TaskPriority;
pub use query::TaskListQuery;
pub use result::{
    ChecklistElement, ChecklistElementResult, Completeness, PersistedResultData, ResultEntry,
    TaskResultsSummary,
};
pub use status::{TaskStatus, TaskStatusSet};
pub use task::{BuildingRef, ChecklistRef, InspectorRef, NewTask, PersistedTaskData, Task};
