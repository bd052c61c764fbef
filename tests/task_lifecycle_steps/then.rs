//! Then steps for task lifecycle BDD scenarios.

use super::world::{StepOutcome, TaskLifecycleWorld};
use inspectorate::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{InspectionError, TaskLifecycleError},
};
use rstest_bdd_macros::then;

fn domain_error(world: &TaskLifecycleWorld) -> Result<&TaskDomainError, eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing request outcome"))?;
    match outcome {
        StepOutcome::Lifecycle(Err(TaskLifecycleError::Domain(err)))
        | StepOutcome::Inspection(Err(InspectionError::Domain(err))) => Ok(err),
        other => Err(eyre::eyre!("expected a domain error, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.current_task()?.status();
    eyre::ensure!(actual == expected, "expected status {expected}, found {actual}");
    Ok(())
}

#[then("the request is forbidden")]
fn request_forbidden(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = domain_error(world)?;
    eyre::ensure!(
        matches!(err, TaskDomainError::Forbidden { .. }),
        "expected Forbidden, got {err:?}"
    );
    Ok(())
}

#[then("submission fails with {completed:u64} of {total:u64} elements complete")]
fn submission_incomplete(
    world: &TaskLifecycleWorld,
    completed: u64,
    total: u64,
) -> Result<(), eyre::Report> {
    let expected = TaskDomainError::IncompleteChecklist {
        completed: usize::try_from(completed)?,
        total: usize::try_from(total)?,
    };
    let err = domain_error(world)?;
    eyre::ensure!(
        *err == expected,
        "expected IncompleteChecklist {completed}/{total}, got {err:?}"
    );
    Ok(())
}

#[then("the transition fails with an unknown state error")]
fn unknown_state(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = domain_error(world)?;
    eyre::ensure!(
        matches!(err, TaskDomainError::UnknownState(_)),
        "expected UnknownState, got {err:?}"
    );
    Ok(())
}

#[then("the transition fails with an illegal transition error")]
fn illegal_transition(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = domain_error(world)?;
    eyre::ensure!(
        matches!(err, TaskDomainError::IllegalTransition { .. }),
        "expected IllegalTransition, got {err:?}"
    );
    Ok(())
}
