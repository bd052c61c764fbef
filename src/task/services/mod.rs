//! Application services for the inspection task lifecycle.

mod inspection;
mod lifecycle;

pub use inspection::{
    InspectionError, InspectionService, InspectionServiceResult, RecordResultRequest,
};
pub use lifecycle::{
    CreateTaskRequest, ReviewDecision, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TransitionTaskRequest,
};
