//! In-memory integration tests for the inspection workflow.

use super::helpers::{
    CHECKLIST_LEN, INSPECTOR_ID, Services, coordinator, inspector_session, request_for, services,
    services_with,
};
use inspectorate::task::{
    domain::{
        ChecklistElementId, ConditionStatus, TaskDomainError, TaskId, TaskListQuery, TaskPolicy,
        TaskPriority, TaskStatus,
    },
    services::{
        InspectionError, RecordResultRequest, ReviewDecision, TaskLifecycleError,
        TransitionTaskRequest,
    },
};
use rstest::rstest;

async fn start_inspection(services: &Services, title: &str) -> Result<TaskId, eyre::Report> {
    let coordinator = coordinator()?;
    let task = services
        .lifecycle
        .create_task(&coordinator, request_for(title, INSPECTOR_ID)?)
        .await?;
    services.lifecycle.dispatch_task(&coordinator, task.id()).await?;
    services
        .lifecycle
        .accept_task(&inspector_session(INSPECTOR_ID)?, task.id())
        .await?;
    Ok(task.id())
}

async fn record_all(
    services: &Services,
    id: TaskId,
    condition: ConditionStatus,
) -> Result<(), eyre::Report> {
    let session = inspector_session(INSPECTOR_ID)?;
    for element in 1..=CHECKLIST_LEN {
        services
            .inspection
            .record_result(
                &session,
                RecordResultRequest::new(id, ChecklistElementId::new(element)?, condition),
            )
            .await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_inspection_reaches_approval(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    let services = setup?;
    let id = start_inspection(&services, "Осмотр кровли").await?;
    record_all(&services, id, ConditionStatus::Satisfactory).await?;

    let submitted = services
        .inspection
        .submit_task(&inspector_session(INSPECTOR_ID)?, id)
        .await?;
    let approved = services
        .lifecycle
        .review_task(&coordinator()?, id, ReviewDecision::Approve)
        .await?;

    eyre::ensure!(submitted.status() == TaskStatus::OnReview);
    eyre::ensure!(approved.status() == TaskStatus::Approved);
    eyre::ensure!(
        services
            .lifecycle
            .available_transitions(&coordinator()?, id)
            .await?
            .is_empty(),
        "approved task should offer no transitions"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_round_trip_returns_to_review(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    let services = setup?;
    let inspector = inspector_session(INSPECTOR_ID)?;
    let id = start_inspection(&services, "Осмотр подъезда").await?;
    record_all(&services, id, ConditionStatus::Serviceable).await?;
    services.inspection.submit_task(&inspector, id).await?;

    let returned = services
        .lifecycle
        .review_task(&coordinator()?, id, ReviewDecision::RequestRevision)
        .await?;
    let resubmitted = services.inspection.submit_task(&inspector, id).await?;

    eyre::ensure!(returned.status() == TaskStatus::ForRevision);
    eyre::ensure!(resubmitted.status() == TaskStatus::OnReview);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_cannot_restart_progress(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    let services = setup?;
    let id = start_inspection(&services, "Осмотр").await?;
    record_all(&services, id, ConditionStatus::Serviceable).await?;
    services
        .inspection
        .submit_task(&inspector_session(INSPECTOR_ID)?, id)
        .await?;
    services
        .lifecycle
        .review_task(&coordinator()?, id, ReviewDecision::RequestRevision)
        .await?;

    let result = services
        .lifecycle
        .transition_task(
            &inspector_session(INSPECTOR_ID)?,
            TransitionTaskRequest::new(id, "InProgress"),
        )
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(TaskDomainError::IllegalTransition {
                from: TaskStatus::ForRevision,
                to: TaskStatus::InProgress,
            }))
        ),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_progress_blocks_submission(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    let services = setup?;
    let inspector = inspector_session(INSPECTOR_ID)?;
    let id = start_inspection(&services, "Осмотр").await?;
    services
        .inspection
        .record_result(
            &inspector,
            RecordResultRequest::new(id, ChecklistElementId::new(1)?, ConditionStatus::Emergency)
                .with_comment("Трещина в несущей стене"),
        )
        .await?;

    let result = services.inspection.submit_task(&inspector, id).await;
    let progress = services.inspection.completeness(id).await?;

    eyre::ensure!(matches!(
        result,
        Err(InspectionError::Domain(TaskDomainError::IncompleteChecklist {
            completed: 1,
            total: 3,
        }))
    ));
    eyre::ensure!(progress.remaining() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn canceled_task_is_terminal(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    let services = setup?;
    let id = start_inspection(&services, "Осмотр").await?;
    let coordinator = coordinator()?;

    services.lifecycle.cancel_task(&coordinator, id).await?;
    let again = services.lifecycle.dispatch_task(&coordinator, id).await;
    let record = services
        .inspection
        .record_result(
            &inspector_session(INSPECTOR_ID)?,
            RecordResultRequest::new(id, ChecklistElementId::new(1)?, ConditionStatus::Serviceable),
        )
        .await;

    eyre::ensure!(matches!(
        again,
        Err(TaskLifecycleError::Domain(TaskDomainError::IllegalTransition { .. }))
    ));
    eyre::ensure!(matches!(
        record,
        Err(InspectionError::Domain(TaskDomainError::ResultsLocked {
            status: TaskStatus::Canceled,
            ..
        }))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_and_filters_narrow_task_lists(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    let services = setup?;
    let coordinator = coordinator()?;
    services
        .lifecycle
        .create_task(
            &coordinator,
            request_for("Осмотр лифта", INSPECTOR_ID)?.with_priority(TaskPriority::Urgent),
        )
        .await?;
    services
        .lifecycle
        .create_task(&coordinator, request_for("Осмотр крыши", 21)?)
        .await?;

    let lifts = services
        .lifecycle
        .list_tasks(&TaskListQuery::new().with_search("ЛИФТ"))
        .await?;
    let by_address = services
        .lifecycle
        .list_tasks(&TaskListQuery::new().with_search("мира"))
        .await?;
    let assigned = services
        .lifecycle
        .list_assigned(&inspector_session(21)?, TaskListQuery::new())
        .await?;

    eyre::ensure!(lifts.len() == 1);
    eyre::ensure!(
        lifts
            .first()
            .is_some_and(|task| task.priority() == TaskPriority::Urgent)
    );
    eyre::ensure!(by_address.len() == 2);
    eyre::ensure!(assigned.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_policy_protects_recorded_work() -> Result<(), eyre::Report> {
    let services = services_with(TaskPolicy::strict())?;
    let id = start_inspection(&services, "Осмотр").await?;
    record_all(&services, id, ConditionStatus::Serviceable).await?;

    let result = services.lifecycle.delete_task(&coordinator()?, id).await;

    eyre::ensure!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::ResultsExist { count: 3, .. }))
    ));
    eyre::ensure!(services.lifecycle.find_by_id(id).await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_policy_deletes_task_with_results(
    #[from(services)] setup: Result<Services, eyre::Report>,
) -> Result<(), eyre::Report> {
    use inspectorate::task::ports::InspectionResultRepository;

    let services = setup?;
    let id = start_inspection(&services, "Осмотр").await?;
    record_all(&services, id, ConditionStatus::Serviceable).await?;

    services.lifecycle.delete_task(&coordinator()?, id).await?;

    eyre::ensure!(services.lifecycle.find_by_id(id).await?.is_none());
    eyre::ensure!(services.results.find_for_task(id).await?.is_empty());
    Ok(())
}
