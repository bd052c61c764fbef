//! Configurable lifecycle policy.

use super::TaskStatus;
use serde::{Deserialize, Serialize, de};

/// Policy switches for behaviour the lifecycle table leaves open.
///
/// # Examples
///
/// ```
/// use inspectorate::task::domain::{TaskPolicy, TaskStatus};
///
/// let policy = TaskPolicy::default();
/// assert!(policy.allow_delete_with_results);
/// assert!(!policy.results_editable_in(TaskStatus::ForRevision));
///
/// let strict = TaskPolicy::strict();
/// assert!(!strict.allow_delete_with_results);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskPolicy {
    /// Whether coordinators may delete tasks that already have results.
    pub allow_delete_with_results: bool,
    /// Whether results may be edited while a task is `ForRevision`.
    pub allow_rework_in_revision: bool,
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self {
            allow_delete_with_results: true,
            allow_rework_in_revision: false,
        }
    }
}

impl TaskPolicy {
    /// Creates a strict policy: results are never orphaned and never edited
    /// outside `InProgress`.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            allow_delete_with_results: false,
            allow_rework_in_revision: false,
        }
    }

    /// Creates a lenient policy that allows rework during revision.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            allow_delete_with_results: true,
            allow_rework_in_revision: true,
        }
    }

    /// Loads a policy from a JSON object; missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the input is not a JSON object
    /// or names a field the policy does not have.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let document: serde_json::Value = serde_json::from_str(input)?;
        if !document.is_object() {
            return Err(de::Error::custom("policy document must be a JSON object"));
        }
        serde_json::from_value(document)
    }

    /// Returns `true` when results may be recorded in `status`.
    #[must_use]
    pub const fn results_editable_in(self, status: TaskStatus) -> bool {
        match status {
            TaskStatus::InProgress => true,
            TaskStatus::ForRevision => self.allow_rework_in_revision,
            TaskStatus::New
            | TaskStatus::Pending
            | TaskStatus::OnReview
            | TaskStatus::Approved
            | TaskStatus::Canceled => false,
        }
    }
}
